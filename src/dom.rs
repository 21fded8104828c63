use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, NodeList, Window};

use crate::error::PageError;

pub(crate) fn window() -> Result<Window, PageError> {
    web_sys::window().ok_or(PageError::NoWindow)
}

pub(crate) fn document() -> Result<Document, PageError> {
    window()?.document().ok_or(PageError::NoDocument)
}

pub(crate) fn body(document: &Document) -> Result<HtmlElement, PageError> {
    document.body().ok_or(PageError::NoBody)
}

pub(crate) fn element_by_id(document: &Document, id: &str) -> Result<Element, PageError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| PageError::MissingElement {
            selector: format!("#{id}"),
        })
}

pub(crate) fn element_by_id_as<T: JsCast>(
    document: &Document,
    id: &str,
    expected: &'static str,
) -> Result<T, PageError> {
    element_by_id(document, id)?
        .dyn_into::<T>()
        .map_err(|_| PageError::WrongElementType {
            id: id.to_string(),
            expected,
        })
}

pub(crate) fn query_within(root: &Element, selector: &str) -> Result<Element, PageError> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .ok_or_else(|| PageError::MissingElement {
            selector: selector.to_string(),
        })
}

pub(crate) fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(node_list_elements)
        .unwrap_or_default()
}

pub(crate) fn query_all_within(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(node_list_elements)
        .unwrap_or_default()
}

fn node_list_elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

pub(crate) fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

pub(crate) fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let _ = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
}

pub(crate) fn remove_class_later(element: Element, class: &'static str, delay_ms: u32) {
    Timeout::new(delay_ms, move || {
        let _ = element.class_list().remove_1(class);
    })
    .forget();
}
