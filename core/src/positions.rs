use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::{RESET_ACTION_LABEL, RESET_HINT_LABEL};

/// Offset of a card from its laid-out position, in unscaled canvas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardPosition {
    pub x: f64,
    pub y: f64,
}

impl CardPosition {
    pub const ORIGIN: CardPosition = CardPosition { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Adds a screen-space pointer delta, converted through the canvas scale.
    pub fn dragged_by(self, dx_screen: f64, dy_screen: f64, canvas_scale: f64) -> Self {
        let scale = canvas_scale.max(1.0e-4);
        Self {
            x: self.x + dx_screen / scale,
            y: self.y + dy_screen / scale,
        }
    }

    pub fn css(&self) -> String {
        format!("translate({}px, {}px)", self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Committed offsets of every card the user has moved.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardPositions(BTreeMap<String, CardPosition>);

impl CardPositions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, card_id: &str) -> Option<CardPosition> {
        self.0.get(card_id).copied()
    }

    pub fn insert(&mut self, card_id: impl Into<String>, position: CardPosition) {
        self.0.insert(card_id.into(), position);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, CardPosition)> {
        self.0.iter().map(|(id, pos)| (id.as_str(), *pos))
    }

    pub(crate) fn retain_finite(&mut self) {
        self.0.retain(|_, pos| pos.is_finite());
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResetButtonState {
    pub enabled: bool,
    pub label: &'static str,
}

impl ResetButtonState {
    pub fn for_positions(positions: &CardPositions) -> Self {
        if positions.is_empty() {
            Self {
                enabled: false,
                label: RESET_HINT_LABEL,
            }
        } else {
            Self {
                enabled: true,
                label: RESET_ACTION_LABEL,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_delta_is_divided_by_scale() {
        let start = CardPosition::new(10.0, -4.0);
        let moved = start.dragged_by(30.0, -12.0, 2.0);
        assert_eq!(moved, CardPosition::new(25.0, -10.0));
        let moved = start.dragged_by(30.0, -12.0, 0.5);
        assert_eq!(moved, CardPosition::new(70.0, -28.0));
    }

    #[test]
    fn insert_overwrites_previous_offset() {
        let mut positions = CardPositions::new();
        positions.insert("presente", CardPosition::new(1.0, 2.0));
        positions.insert("presente", CardPosition::new(3.0, 4.0));
        assert_eq!(positions.len(), 1);
        assert_eq!(positions.get("presente"), Some(CardPosition::new(3.0, 4.0)));
        assert_eq!(positions.get("futuro"), None);
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut positions = CardPositions::new();
        positions.insert("preterito", CardPosition::new(12.5, -3.0));
        let raw = serde_json::to_string(&positions).unwrap();
        assert_eq!(raw, r#"{"preterito":{"x":12.5,"y":-3.0}}"#);
    }

    #[test]
    fn reset_button_follows_mapping() {
        let mut positions = CardPositions::new();
        let state = ResetButtonState::for_positions(&positions);
        assert!(!state.enabled);
        assert_eq!(state.label, RESET_HINT_LABEL);
        positions.insert("imperfecto", CardPosition::ORIGIN);
        let state = ResetButtonState::for_positions(&positions);
        assert!(state.enabled);
        assert_eq!(state.label, RESET_ACTION_LABEL);
    }

    #[test]
    fn css_uses_translate_only() {
        assert_eq!(CardPosition::new(-2.0, 7.25).css(), "translate(-2px, 7.25px)");
    }
}
