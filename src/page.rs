use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, PointerEvent, WheelEvent, Window};

use tiempos_core::consts::{CLASS_LOADING, REVEAL_DELAY_MS};
use tiempos_core::{CanvasSession, GestureRecognizer, LogSink, Theme, ViewCommand};

use crate::dispatch::{DispatchTable, InputKind};
use crate::dom;
use crate::dom_view::DomView;
use crate::error::PageError;
use crate::highlight;
use crate::input::{self, PointerSample, WheelSample, CARD_SELECTOR};
use crate::local_store::BrowserStorage;
use crate::page_config::{load_page_config, PageConfig};
use crate::theme_select::{find_selector, ThemeSelector};

type Session = CanvasSession<BrowserStorage>;

/// Ties the session to the document. Handlers borrow the session for one event
/// and the queued view commands are applied after the borrow ends.
pub(crate) struct Page {
    window: Window,
    session: RefCell<Session>,
    gestures: RefCell<GestureRecognizer>,
    view: DomView,
    selector: Rc<dyn ThemeSelector>,
    config: PageConfig,
}

struct InstalledPage {
    _page: Rc<Page>,
    _listeners: Vec<EventListener>,
}

thread_local! {
    static PAGE: RefCell<Option<InstalledPage>> = RefCell::new(None);
}

impl Page {
    pub(crate) fn window(&self) -> &Window {
        &self.window
    }

    pub(crate) fn with_session<R>(&self, action: impl FnOnce(&mut Session) -> R) -> R {
        let (result, commands) = {
            let mut session = self.session.borrow_mut();
            let result = action(&mut session);
            (result, session.drain_commands())
        };
        self.render(commands);
        result
    }

    fn with_gestures(&self, action: impl FnOnce(&mut GestureRecognizer, &mut Session)) {
        let commands = {
            let mut gestures = self.gestures.borrow_mut();
            let mut session = self.session.borrow_mut();
            action(&mut gestures, &mut session);
            session.drain_commands()
        };
        self.render(commands);
    }

    pub(crate) fn apply_theme(&self, theme: Theme) {
        if self.config.verbose {
            gloo::console::log!(format!("theme -> {theme}"));
        }
        self.with_session(|session| session.apply_theme(theme));
    }

    fn render(&self, commands: Vec<ViewCommand>) {
        for command in commands {
            self.view.apply(command, self.selector.as_ref());
        }
    }
}

/// Boots once the document is parsed.
pub(crate) fn start() {
    let document = match dom::document() {
        Ok(document) => document,
        Err(err) => {
            gloo::console::error!(format!("tiempos: {err}"));
            return;
        }
    };
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| launch()).forget();
    } else {
        launch();
    }
}

fn launch() {
    match init() {
        Ok(installed) => PAGE.with(|slot| {
            *slot.borrow_mut() = Some(installed);
        }),
        Err(err) => gloo::console::error!(format!("tiempos: {err}")),
    }
}

fn init() -> Result<InstalledPage, PageError> {
    let window = dom::window()?;
    let document = dom::document()?;
    let config = load_page_config(&document);
    gloo::console::log!(format!("tiempos: starting with {:?} theme selector", config.selector));

    let view = DomView::find(&document)?;
    let selector = find_selector(&document, config.selector)?;

    let log_sink: LogSink = Rc::new(|line: &str| gloo::console::warn!(line.to_string()));
    let mut session = CanvasSession::new(BrowserStorage::open(), log_sink);
    let card_ids: Vec<String> = dom::query_all(&document, CARD_SELECTOR)
        .iter()
        .map(Element::id)
        .filter(|id| !id.is_empty())
        .collect();
    session.boot(card_ids);
    let boot_commands = session.drain_commands();

    let page = Rc::new(Page {
        window,
        session: RefCell::new(session),
        gestures: RefCell::new(GestureRecognizer::new()),
        view,
        selector: selector.clone(),
        config,
    });
    page.render(boot_commands);

    let mut table = DispatchTable::new();
    bind_pointer_input(&page, &mut table);
    bind_wheel(&page, &mut table);
    bind_highlight(&page, &mut table);
    bind_controls(&page, &mut table);
    selector.bind(&page, &mut table);
    if page.config.verbose {
        gloo::console::log!(format!(
            "tiempos: attaching {} listeners {:?}",
            table.len(),
            table.kinds()
        ));
    }
    let listeners = table.attach();

    let body: Element = page.view.body().clone().into();
    dom::remove_class_later(body, CLASS_LOADING, REVEAL_DELAY_MS);

    Ok(InstalledPage {
        _page: page,
        _listeners: listeners,
    })
}

fn pointer_event(event: &Event) -> Option<&PointerEvent> {
    event.dyn_ref::<PointerEvent>()
}

fn bind_pointer_input(page: &Rc<Page>, table: &mut DispatchTable) {
    {
        let page_ref = page.clone();
        table.bind(InputKind::PointerDown, page.view.body(), move |event| {
            let Some(pointer) = pointer_event(event) else {
                return;
            };
            let sample = PointerSample::from_event(pointer);
            if !input::accepts_pointer_down(sample.kind, pointer.button()) {
                return;
            }
            let element = dom::event_element(event);
            let target = element.as_ref().and_then(input::drag_target_for);
            if target.is_some() {
                event.prevent_default();
                if let Some(element) = element.as_ref() {
                    let _ = element.set_pointer_capture(sample.id);
                }
            }
            page_ref.with_gestures(|gestures, session| {
                gestures.pointer_down(sample.id, sample.x, sample.y, target, session);
            });
        });
    }
    {
        let page_ref = page.clone();
        table.bind(InputKind::PointerMove, page.window(), move |event| {
            let Some(pointer) = pointer_event(event) else {
                return;
            };
            let sample = PointerSample::from_event(pointer);
            page_ref.with_gestures(|gestures, session| {
                if sample.is_released_mouse() {
                    gestures.pointer_up(sample.id, session);
                } else {
                    gestures.pointer_move(sample.id, sample.x, sample.y, session);
                }
            });
        });
    }
    for kind in [InputKind::PointerUp, InputKind::PointerCancel] {
        let page_ref = page.clone();
        table.bind(kind, page.window(), move |event| {
            let Some(pointer) = pointer_event(event) else {
                return;
            };
            let pointer_id = pointer.pointer_id();
            page_ref.with_gestures(|gestures, session| {
                gestures.pointer_up(pointer_id, session);
            });
        });
    }
}

fn bind_wheel(page: &Rc<Page>, table: &mut DispatchTable) {
    let page_ref = page.clone();
    table.bind(InputKind::Wheel, page.window(), move |event| {
        let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
            return;
        };
        event.prevent_default();
        let sample = WheelSample::from_event(wheel);
        page_ref.with_session(|session| session.wheel(sample.x, sample.y, sample.delta_y));
    });
}

fn bind_highlight(page: &Rc<Page>, table: &mut DispatchTable) {
    for (kind, on) in [(InputKind::MouseOver, true), (InputKind::MouseOut, false)] {
        let document = page.view.document().clone();
        table.bind(kind, page.view.canvas(), move |event| {
            highlight::apply_hover(&document, event, on);
        });
    }
}

fn bind_controls(page: &Rc<Page>, table: &mut DispatchTable) {
    let indicator = page.view.zoom_indicator();
    {
        let page_ref = page.clone();
        table.bind(InputKind::Click, indicator, move |_| {
            page_ref.with_session(|session| session.reset_canvas());
        });
    }
    for (kind, hovered) in [(InputKind::MouseOver, true), (InputKind::MouseOut, false)] {
        let page_ref = page.clone();
        table.bind(kind, indicator, move |_| {
            page_ref.with_session(|session| session.set_zoom_hovered(hovered));
        });
    }
    {
        let page_ref = page.clone();
        table.bind(InputKind::Click, page.view.reset_button(), move |_| {
            page_ref.with_session(|session| session.reset_positions());
        });
    }
}
