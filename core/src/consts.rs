pub const SCALE_MIN: f64 = 0.2;
pub const SCALE_MAX: f64 = 5.0;
pub const SCALE_DEFAULT: f64 = 1.0;
pub const WHEEL_ZOOM_FACTOR: f64 = 1.05;

pub const RESET_ANIMATION_MS: u32 = 400;
pub const REVEAL_DELAY_MS: u32 = 50;

pub const CARD_POSITIONS_KEY: &str = "spanishCheatsheetCardPositions";
pub const CANVAS_TRANSFORM_KEY: &str = "spanishCheatsheetCanvasTransform";
pub const THEME_KEY: &str = "spanishCheatsheetTheme";

pub const ZOOM_HINT_LABEL: &str = "Scroll to zoom?";
pub const ZOOM_RESET_LABEL: &str = "Сбросить на 100%";
pub const RESET_HINT_LABEL: &str = "Drag by title";
pub const RESET_ACTION_LABEL: &str = "Сбросить позиции";

pub const PREVIEW_GROUP: &str = "p2";

pub const THEME_CLASS_PREFIX: &str = "theme-";
pub const CLASS_HIGHLIGHT: &str = "highlight";
pub const CLASS_DRAGGING: &str = "is-dragging";
pub const CLASS_ANIMATING: &str = "is-animating";
pub const CLASS_PANNING: &str = "is-panning";
pub const CLASS_LOADING: &str = "is-loading";
pub const CLASS_SELECT_HIDE: &str = "select-hide";
pub const CLASS_SELECT_ARROW_ACTIVE: &str = "select-arrow-active";
