use web_sys::{Element, Node, PointerEvent, WheelEvent};

use tiempos_core::DragTarget;

use crate::dom;

pub(crate) const CARD_SELECTOR: &str = ".tense-card";
pub(crate) const CARD_TITLE_SELECTOR: &str = "h2";
pub(crate) const CONTROLS_SELECTOR: &str = ".controls";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PointerKind {
    Mouse,
    Touch,
    Pen,
    Unknown,
}

impl PointerKind {
    pub(crate) fn from_pointer_type(value: &str) -> Self {
        match value {
            "mouse" => PointerKind::Mouse,
            "touch" => PointerKind::Touch,
            "pen" => PointerKind::Pen,
            _ => PointerKind::Unknown,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PointerSample {
    pub id: i32,
    pub x: f64,
    pub y: f64,
    pub kind: PointerKind,
    pub buttons: u16,
}

impl PointerSample {
    pub(crate) fn from_event(event: &PointerEvent) -> Self {
        Self {
            id: event.pointer_id(),
            x: event.client_x() as f64,
            y: event.client_y() as f64,
            kind: PointerKind::from_pointer_type(&event.pointer_type()),
            buttons: event.buttons(),
        }
    }

    /// A mouse moving with no button held has been released somewhere the
    /// page never saw.
    pub(crate) fn is_released_mouse(&self) -> bool {
        self.kind == PointerKind::Mouse && self.buttons == 0
    }
}

/// Only the primary mouse button starts anything; touch and pen always do.
pub(crate) fn accepts_pointer_down(kind: PointerKind, button: i16) -> bool {
    match kind {
        PointerKind::Mouse => button == 0,
        _ => true,
    }
}

/// Resolves what a pointer landing on `element` may drag. A card moves only
/// when grabbed by its own title; the rest of a card and the controls never
/// drag; everything else pans the canvas.
pub(crate) fn drag_target_for(element: &Element) -> Option<DragTarget> {
    if dom::closest(element, CONTROLS_SELECTOR).is_some() {
        return None;
    }
    let Some(card) = dom::closest(element, CARD_SELECTOR) else {
        return Some(DragTarget::Canvas);
    };
    let title = dom::closest(element, CARD_TITLE_SELECTOR)?;
    let title: &Node = &title;
    if !card.contains(Some(title)) {
        return None;
    }
    let card_id = card.id();
    if card_id.is_empty() {
        return None;
    }
    Some(DragTarget::Card(card_id))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct WheelSample {
    pub x: f64,
    pub y: f64,
    pub delta_y: f64,
}

impl WheelSample {
    pub(crate) fn from_event(event: &WheelEvent) -> Self {
        Self {
            x: event.client_x() as f64,
            y: event.client_y() as f64,
            delta_y: event.delta_y(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::Document;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window()
            .and_then(|window| window.document())
            .expect("document")
    }

    fn fixture(document: &Document) -> Element {
        let root = document.create_element("div").expect("root");
        root.set_inner_html(
            r#"<div class="controls"><button id="t-btn">x</button></div>
               <div class="tense-card" id="t-card"><h2 id="t-title"><span id="t-span">Presente</span></h2>
               <p id="t-body">hablo</p></div>
               <div class="tense-card"><h2 id="t-anon">Sin id</h2></div>
               <section id="t-blank"></section>"#,
        );
        document
            .body()
            .expect("body")
            .append_child(&root)
            .expect("append");
        root
    }

    fn target(document: &Document, id: &str) -> Option<DragTarget> {
        let element = document.get_element_by_id(id).expect(id);
        drag_target_for(&element)
    }

    #[wasm_bindgen_test]
    fn drag_targets_follow_dom_regions() {
        let document = document();
        let root = fixture(&document);

        assert_eq!(
            target(&document, "t-title"),
            Some(DragTarget::Card("t-card".to_string()))
        );
        assert_eq!(
            target(&document, "t-span"),
            Some(DragTarget::Card("t-card".to_string()))
        );
        assert_eq!(target(&document, "t-body"), None);
        assert_eq!(target(&document, "t-anon"), None);
        assert_eq!(target(&document, "t-btn"), None);
        assert_eq!(target(&document, "t-blank"), Some(DragTarget::Canvas));

        root.remove();
    }

    #[wasm_bindgen_test]
    fn secondary_mouse_buttons_are_ignored() {
        assert!(accepts_pointer_down(PointerKind::Mouse, 0));
        assert!(!accepts_pointer_down(PointerKind::Mouse, 2));
        assert!(accepts_pointer_down(PointerKind::Touch, 0));
        assert_eq!(PointerKind::from_pointer_type("pen"), PointerKind::Pen);
        assert_eq!(PointerKind::from_pointer_type(""), PointerKind::Unknown);
    }

    #[wasm_bindgen_test]
    fn buttonless_mouse_move_counts_as_release() {
        let sample = |kind, buttons| PointerSample {
            id: 1,
            x: 0.0,
            y: 0.0,
            kind,
            buttons,
        };
        assert!(sample(PointerKind::Mouse, 0).is_released_mouse());
        assert!(!sample(PointerKind::Mouse, 1).is_released_mouse());
        assert!(!sample(PointerKind::Touch, 0).is_released_mouse());
    }
}
