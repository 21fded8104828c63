use web_sys::{Document, Element, Event};

use tiempos_core::consts::{CLASS_HIGHLIGHT, PREVIEW_GROUP};
use tiempos_core::{highlight_targets, GroupTags};

use crate::dom;

const GROUP_ATTR: &str = "data-group";
const GROUP_SELECTOR: &str = "[data-group]";

fn group_tags(element: &Element) -> GroupTags {
    element
        .get_attribute(GROUP_ATTR)
        .map(|raw| GroupTags::parse(&raw))
        .unwrap_or_default()
}

/// Adds or removes `highlight` on every grouped element sharing a tag with
/// `hovered`.
pub(crate) fn toggle_group_members(document: &Document, hovered: &GroupTags, on: bool) {
    let candidates = dom::query_all(document, GROUP_SELECTOR);
    let tags: Vec<GroupTags> = candidates.iter().map(group_tags).collect();
    for index in highlight_targets(hovered, tags.iter()) {
        if let Some(element) = candidates.get(index) {
            dom::set_class(element, CLASS_HIGHLIGHT, on);
        }
    }
}

/// Mouse over/out anywhere inside the canvas.
pub(crate) fn apply_hover(document: &Document, event: &Event, on: bool) {
    let Some(element) = dom::event_element(event) else {
        return;
    };
    let Some(grouped) = dom::closest(&element, GROUP_SELECTOR) else {
        return;
    };
    let hovered = group_tags(&grouped);
    if hovered.is_empty() {
        return;
    }
    toggle_group_members(document, &hovered, on);
}

pub(crate) fn set_preview_highlight(document: &Document, on: bool) {
    toggle_group_members(document, &GroupTags::single(PREVIEW_GROUP), on);
}
