use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PageError {
    NoWindow,
    NoDocument,
    NoBody,
    MissingElement { selector: String },
    WrongElementType { id: String, expected: &'static str },
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::NoWindow => write!(f, "window unavailable"),
            PageError::NoDocument => write!(f, "document unavailable"),
            PageError::NoBody => write!(f, "document has no body"),
            PageError::MissingElement { selector } => write!(f, "missing element {selector}"),
            PageError::WrongElementType { id, expected } => {
                write!(f, "element #{id} is not a {expected}")
            }
        }
    }
}

impl std::error::Error for PageError {}
