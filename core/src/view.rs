use crate::positions::{CardPosition, ResetButtonState};
use crate::theme::Theme;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Surface {
    Body,
    Canvas,
    Card(String),
}

/// A change the page must make to the document. Produced by the session,
/// applied by the DOM layer in order.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewCommand {
    SetThemeClass(Theme),
    ShowSelectedTheme(Theme),
    SetCanvasTransform(String),
    SetZoomLabel(String),
    SetCardOffset {
        card_id: String,
        offset: CardPosition,
    },
    SetClass {
        surface: Surface,
        class: &'static str,
        on: bool,
    },
    RemoveClassAfter {
        surface: Surface,
        class: &'static str,
        delay_ms: u32,
    },
    SetResetButton(ResetButtonState),
    SetPreviewHighlight(bool),
}
