pub mod consts;
pub mod gesture;
pub mod highlight;
pub mod persisted;
pub mod positions;
pub mod session;
pub mod storage;
pub mod theme;
pub mod transform;
pub mod view;

pub use gesture::{DragTarget, GestureHandler, GestureRecognizer};
pub use highlight::{highlight_targets, GroupTags};
pub use persisted::{LoadIssue, PersistedPage};
pub use positions::{CardPosition, CardPositions, ResetButtonState};
pub use session::{silent_log, CanvasSession, LogSink};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use theme::{swap_theme_class, Theme, ThemeDropdown, ThemeOption};
pub use transform::{zoom_indicator_label, TransformState};
pub use view::{Surface, ViewCommand};
