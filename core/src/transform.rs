use serde::{Deserialize, Serialize};

use crate::consts::{
    SCALE_DEFAULT, SCALE_MAX, SCALE_MIN, WHEEL_ZOOM_FACTOR, ZOOM_HINT_LABEL, ZOOM_RESET_LABEL,
};

/// Pan and zoom of the whole canvas. Translation is in screen pixels and is
/// applied before the scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    pub scale: f64,
    pub x: f64,
    pub y: f64,
}

impl TransformState {
    pub const IDENTITY: TransformState = TransformState {
        scale: SCALE_DEFAULT,
        x: 0.0,
        y: 0.0,
    };

    pub fn clamp_scale(value: f64) -> f64 {
        value.clamp(SCALE_MIN, SCALE_MAX)
    }

    /// Scales by `factor` while keeping the canvas point under
    /// `(cursor_x, cursor_y)` fixed on screen.
    pub fn zoom_at(&mut self, cursor_x: f64, cursor_y: f64, factor: f64) {
        let old_scale = self.scale;
        let new_scale = Self::clamp_scale(old_scale * factor);
        let ratio = new_scale / old_scale;
        self.x = cursor_x - (cursor_x - self.x) * ratio;
        self.y = cursor_y - (cursor_y - self.y) * ratio;
        self.scale = new_scale;
    }

    pub fn zoom_by_wheel(&mut self, cursor_x: f64, cursor_y: f64, delta_y: f64) {
        let factor = if delta_y < 0.0 {
            WHEEL_ZOOM_FACTOR
        } else {
            1.0 / WHEEL_ZOOM_FACTOR
        };
        self.zoom_at(cursor_x, cursor_y, factor);
    }

    pub fn zoom_by_gesture(&mut self, focal_x: f64, focal_y: f64, ds: f64) {
        self.zoom_at(focal_x, focal_y, 1.0 + ds);
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    pub fn css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.x, self.y, self.scale
        )
    }

    pub fn zoom_percent(&self) -> i64 {
        (self.scale * 100.0).round() as i64
    }

    pub fn canvas_to_screen(&self, canvas_x: f64, canvas_y: f64) -> (f64, f64) {
        (canvas_x * self.scale + self.x, canvas_y * self.scale + self.y)
    }

    pub fn screen_to_canvas(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        ((screen_x - self.x) / self.scale, (screen_y - self.y) / self.scale)
    }

    /// Restored states must be finite with a positive scale; an out-of-range
    /// scale is pulled back into bounds.
    pub fn sanitized(self) -> Option<Self> {
        if !self.scale.is_finite() || !self.x.is_finite() || !self.y.is_finite() {
            return None;
        }
        if self.scale <= 0.0 {
            return None;
        }
        Some(Self {
            scale: Self::clamp_scale(self.scale),
            ..self
        })
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

pub fn zoom_indicator_label(state: &TransformState, hovered: bool) -> String {
    if hovered {
        return ZOOM_RESET_LABEL.to_string();
    }
    let percent = state.zoom_percent();
    if percent == 100 {
        ZOOM_HINT_LABEL.to_string()
    } else {
        format!("{percent}%")
    }
}
