use web_sys::{Document, UrlSearchParams};

pub(crate) const CANVAS_ID: &str = "canvas";
pub(crate) const ZOOM_INDICATOR_ID: &str = "zoom-indicator";
pub(crate) const RESET_POSITIONS_ID: &str = "reset-positions-btn";
pub(crate) const CUSTOM_SELECT_ID: &str = "custom-theme-select";
pub(crate) const NATIVE_SELECT_ID: &str = "theme-select";

const SELECTOR_PARAM: &str = "selector";
const VERBOSE_PARAM: &str = "verbose";
const SELECTOR_ATTR: &str = "data-theme-selector";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SelectorKind {
    Dropdown,
    Native,
}

impl SelectorKind {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dropdown" | "custom" => Some(SelectorKind::Dropdown),
            "native" | "select" => Some(SelectorKind::Native),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PageConfig {
    pub(crate) selector: SelectorKind,
    pub(crate) verbose: bool,
}

/// Query parameters win over the body attribute; without either the widget
/// present in the document decides.
pub(crate) fn load_page_config(document: &Document) -> PageConfig {
    let search = document
        .location()
        .and_then(|location| location.search().ok())
        .unwrap_or_default();
    let from_query = parse_selector_from_query(&search);
    let from_attr = document
        .body()
        .and_then(|body| body.get_attribute(SELECTOR_ATTR))
        .and_then(|raw| SelectorKind::parse(&raw));
    let detected = if document.get_element_by_id(CUSTOM_SELECT_ID).is_some() {
        SelectorKind::Dropdown
    } else {
        SelectorKind::Native
    };
    PageConfig {
        selector: from_query.or(from_attr).unwrap_or(detected),
        verbose: parse_verbose_from_query(&search),
    }
}

fn search_params(search: &str) -> Option<UrlSearchParams> {
    let search = search.trim();
    if search.is_empty() {
        return None;
    }
    UrlSearchParams::new_with_str(search).ok()
}

fn parse_selector_from_query(search: &str) -> Option<SelectorKind> {
    let params = search_params(search)?;
    let raw = params.get(SELECTOR_PARAM)?;
    SelectorKind::parse(&raw)
}

fn parse_verbose_from_query(search: &str) -> bool {
    let Some(params) = search_params(search) else {
        return false;
    };
    match params.get(VERBOSE_PARAM) {
        Some(value) => !matches!(value.trim(), "0" | "false" | "no"),
        None => false,
    }
}
