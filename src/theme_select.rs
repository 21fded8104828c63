use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlSelectElement, Node};

use tiempos_core::consts::{CLASS_SELECT_ARROW_ACTIVE, CLASS_SELECT_HIDE};
use tiempos_core::{Theme, ThemeDropdown, ThemeOption};

use crate::dispatch::{DispatchTable, InputKind};
use crate::dom;
use crate::error::PageError;
use crate::page::Page;
use crate::page_config::{SelectorKind, CUSTOM_SELECT_ID, NATIVE_SELECT_ID};

const TRIGGER_SELECTOR: &str = ".select-selected";
const ITEMS_SELECTOR: &str = ".select-items";
const ITEM_SELECTOR: &str = ".select-item";
const ITEM_VALUE_ATTR: &str = "data-value";

/// The widget the visitor picks a theme with.
pub(crate) trait ThemeSelector {
    /// Reflects the committed theme in the widget.
    fn show(&self, theme: &Theme);
    fn bind(self: Rc<Self>, page: &Rc<Page>, table: &mut DispatchTable);
}

pub(crate) fn find_selector(
    document: &Document,
    kind: SelectorKind,
) -> Result<Rc<dyn ThemeSelector>, PageError> {
    let selector: Rc<dyn ThemeSelector> = match kind {
        SelectorKind::Native => Rc::new(NativeSelect::find(document)?),
        SelectorKind::Dropdown => Rc::new(CustomDropdown::find(document)?),
    };
    Ok(selector)
}

pub(crate) struct NativeSelect {
    select: HtmlSelectElement,
}

impl NativeSelect {
    pub(crate) fn find(document: &Document) -> Result<Self, PageError> {
        let select = dom::element_by_id_as::<HtmlSelectElement>(document, NATIVE_SELECT_ID, "select")?;
        Ok(Self { select })
    }
}

impl ThemeSelector for NativeSelect {
    fn show(&self, theme: &Theme) {
        self.select.set_value(theme.as_value());
    }

    fn bind(self: Rc<Self>, page: &Rc<Page>, table: &mut DispatchTable) {
        let page = page.clone();
        let select = self.select.clone();
        table.bind(InputKind::Change, &self.select, move |_| {
            page.apply_theme(Theme::from_value(&select.value()));
        });
    }
}

pub(crate) struct CustomDropdown {
    container: Element,
    trigger: Element,
    items: Element,
    options: Vec<(Element, Theme)>,
    state: RefCell<ThemeDropdown>,
}

impl CustomDropdown {
    pub(crate) fn find(document: &Document) -> Result<Self, PageError> {
        let container = dom::element_by_id(document, CUSTOM_SELECT_ID)?;
        let trigger = dom::query_within(&container, TRIGGER_SELECTOR)?;
        let items = dom::query_within(&container, ITEMS_SELECTOR)?;
        let options: Vec<(Element, Theme)> = dom::query_all_within(&items, ITEM_SELECTOR)
            .into_iter()
            .filter_map(|element| {
                let value = element.get_attribute(ITEM_VALUE_ATTR)?;
                Some((element, Theme::from_value(&value)))
            })
            .collect();
        let labels = options
            .iter()
            .map(|(element, theme)| ThemeOption {
                theme: theme.clone(),
                label: element
                    .text_content()
                    .map(|text| text.trim().to_string())
                    .unwrap_or_default(),
            })
            .collect();
        Ok(Self {
            container,
            trigger,
            items,
            options,
            state: RefCell::new(ThemeDropdown::new(labels)),
        })
    }

    fn sync_classes(&self) {
        let open = self.state.borrow().is_open();
        dom::set_class(&self.items, CLASS_SELECT_HIDE, !open);
        dom::set_class(&self.trigger, CLASS_SELECT_ARROW_ACTIVE, open);
    }

    fn toggle(&self) {
        self.state.borrow_mut().toggle();
        self.sync_classes();
    }

    fn close(&self) {
        self.state.borrow_mut().close();
        self.sync_classes();
    }

    fn contains(&self, target: Option<EventTarget>) -> bool {
        let Some(node) = target.and_then(|target| target.dyn_into::<Node>().ok()) else {
            return false;
        };
        self.container.contains(Some(&node))
    }
}

impl ThemeSelector for CustomDropdown {
    fn show(&self, theme: &Theme) {
        let state = self.state.borrow();
        if let Some(label) = state.label_for(theme) {
            self.trigger.set_text_content(Some(label));
        }
    }

    fn bind(self: Rc<Self>, page: &Rc<Page>, table: &mut DispatchTable) {
        {
            let dropdown = self.clone();
            table.bind(InputKind::Click, &self.trigger, move |event| {
                event.stop_propagation();
                dropdown.toggle();
            });
        }

        for (element, theme) in &self.options {
            {
                let dropdown = self.clone();
                let page = page.clone();
                let theme = theme.clone();
                table.bind(InputKind::Click, element, move |event| {
                    event.stop_propagation();
                    dropdown.close();
                    page.apply_theme(theme.clone());
                });
            }
            {
                let page = page.clone();
                let theme = theme.clone();
                table.bind(InputKind::MouseEnter, element, move |_| {
                    page.with_session(|session| session.preview_option(&theme));
                });
            }
        }

        {
            let page = page.clone();
            table.bind(InputKind::MouseLeave, &self.items, move |_| {
                page.with_session(|session| session.end_preview());
            });
        }

        let dropdown = self.clone();
        table.bind(InputKind::Click, page.window(), move |event| {
            if !dropdown.contains(event.target()) {
                dropdown.close();
            }
        });
    }
}
