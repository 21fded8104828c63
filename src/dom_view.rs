use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement};

use tiempos_core::{swap_theme_class, CardPosition, ResetButtonState, Surface, ViewCommand};

use crate::dom;
use crate::error::PageError;
use crate::highlight;
use crate::page_config::{CANVAS_ID, RESET_POSITIONS_ID, ZOOM_INDICATOR_ID};
use crate::theme_select::ThemeSelector;

/// The document nodes view commands write to.
pub(crate) struct DomView {
    document: Document,
    body: HtmlElement,
    canvas: HtmlElement,
    zoom_indicator: Element,
    reset_button: HtmlButtonElement,
}

impl DomView {
    pub(crate) fn find(document: &Document) -> Result<Self, PageError> {
        Ok(Self {
            document: document.clone(),
            body: dom::body(document)?,
            canvas: dom::element_by_id_as::<HtmlElement>(document, CANVAS_ID, "html element")?,
            zoom_indicator: dom::element_by_id(document, ZOOM_INDICATOR_ID)?,
            reset_button: dom::element_by_id_as::<HtmlButtonElement>(
                document,
                RESET_POSITIONS_ID,
                "button",
            )?,
        })
    }

    pub(crate) fn document(&self) -> &Document {
        &self.document
    }

    pub(crate) fn body(&self) -> &HtmlElement {
        &self.body
    }

    pub(crate) fn canvas(&self) -> &HtmlElement {
        &self.canvas
    }

    pub(crate) fn zoom_indicator(&self) -> &Element {
        &self.zoom_indicator
    }

    pub(crate) fn reset_button(&self) -> &HtmlButtonElement {
        &self.reset_button
    }

    fn surface(&self, surface: &Surface) -> Option<Element> {
        match surface {
            Surface::Body => Some(self.body.clone().into()),
            Surface::Canvas => Some(self.canvas.clone().into()),
            Surface::Card(card_id) => self.document.get_element_by_id(card_id),
        }
    }

    pub(crate) fn apply(&self, command: ViewCommand, selector: &dyn ThemeSelector) {
        match command {
            ViewCommand::SetThemeClass(theme) => {
                let classes = swap_theme_class(&self.body.class_name(), &theme);
                self.body.set_class_name(&classes);
            }
            ViewCommand::ShowSelectedTheme(theme) => selector.show(&theme),
            ViewCommand::SetCanvasTransform(css) => {
                let _ = self.canvas.style().set_property("transform", &css);
            }
            ViewCommand::SetZoomLabel(label) => {
                self.zoom_indicator.set_text_content(Some(&label));
            }
            ViewCommand::SetCardOffset { card_id, offset } => self.set_card_offset(&card_id, offset),
            ViewCommand::SetClass { surface, class, on } => {
                if let Some(element) = self.surface(&surface) {
                    dom::set_class(&element, class, on);
                }
            }
            ViewCommand::RemoveClassAfter {
                surface,
                class,
                delay_ms,
            } => {
                if let Some(element) = self.surface(&surface) {
                    dom::remove_class_later(element, class, delay_ms);
                }
            }
            ViewCommand::SetResetButton(state) => self.set_reset_button(&state),
            ViewCommand::SetPreviewHighlight(on) => {
                highlight::set_preview_highlight(&self.document, on);
            }
        }
    }

    fn set_card_offset(&self, card_id: &str, offset: CardPosition) {
        let Some(card) = self
            .document
            .get_element_by_id(card_id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let _ = card.style().set_property("transform", &offset.css());
        let _ = card.set_attribute("data-x", &offset.x.to_string());
        let _ = card.set_attribute("data-y", &offset.y.to_string());
    }

    fn set_reset_button(&self, state: &ResetButtonState) {
        self.reset_button.set_disabled(!state.enabled);
        self.reset_button.set_text_content(Some(state.label));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiempos_core::{CardPositions, Theme};
    use wasm_bindgen_test::*;

    use crate::dispatch::DispatchTable;
    use crate::page::Page;
    use std::rc::Rc;

    wasm_bindgen_test_configure!(run_in_browser);

    struct NoSelector;

    impl ThemeSelector for NoSelector {
        fn show(&self, _theme: &Theme) {}
        fn bind(self: Rc<Self>, _page: &Rc<Page>, _table: &mut DispatchTable) {}
    }

    fn document() -> Document {
        web_sys::window()
            .and_then(|window| window.document())
            .expect("document")
    }

    fn fixture(document: &Document) -> Element {
        let root = document.create_element("div").expect("root");
        root.set_inner_html(
            r#"<div id="canvas"><div class="tense-card" id="v-card"><h2>Presente</h2></div></div>
               <div id="zoom-indicator"></div>
               <button id="reset-positions-btn"></button>"#,
        );
        document
            .body()
            .expect("body")
            .append_child(&root)
            .expect("append");
        root
    }

    #[wasm_bindgen_test]
    fn commands_write_to_the_document() {
        let document = document();
        let root = fixture(&document);
        let view = DomView::find(&document).expect("view");
        view.body().set_class_name("is-loading theme-light");

        let commands = vec![
            ViewCommand::SetThemeClass(Theme::Dark),
            ViewCommand::SetCanvasTransform("translate(-5px, -5px) scale(1.05)".to_string()),
            ViewCommand::SetZoomLabel("105%".to_string()),
            ViewCommand::SetCardOffset {
                card_id: "v-card".to_string(),
                offset: CardPosition::new(12.5, -4.0),
            },
            ViewCommand::SetResetButton(ResetButtonState::for_positions(&CardPositions::new())),
        ];
        for command in commands {
            view.apply(command, &NoSelector);
        }

        assert_eq!(view.body().class_name(), "is-loading theme-dark");
        assert_eq!(
            view.canvas().style().get_property_value("transform").ok().as_deref(),
            Some("translate(-5px, -5px) scale(1.05)")
        );
        assert_eq!(view.zoom_indicator().text_content().as_deref(), Some("105%"));
        let card = document.get_element_by_id("v-card").expect("card");
        assert_eq!(card.get_attribute("data-x").as_deref(), Some("12.5"));
        assert_eq!(card.get_attribute("data-y").as_deref(), Some("-4"));
        assert!(view.reset_button().disabled());
        assert_eq!(
            view.reset_button().text_content().as_deref(),
            Some("Drag by title")
        );

        view.body().set_class_name("");
        root.remove();
    }
}
