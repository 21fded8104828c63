use crate::consts::{CANVAS_TRANSFORM_KEY, CARD_POSITIONS_KEY, THEME_KEY};
use crate::positions::CardPositions;
use crate::storage::{KeyValueStore, StorageError};
use crate::theme::Theme;
use crate::transform::TransformState;

/// Everything a returning visitor gets back.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PersistedPage {
    pub transform: TransformState,
    pub positions: CardPositions,
    pub theme: Theme,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadIssue {
    Unreadable { key: &'static str, error: StorageError },
    Malformed { key: &'static str },
}

impl std::fmt::Display for LoadIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadIssue::Unreadable { key, error } => write!(f, "{key}: {error}"),
            LoadIssue::Malformed { key } => write!(f, "{key}: malformed value, using default"),
        }
    }
}

impl PersistedPage {
    /// Reads every key, substituting defaults for anything absent or
    /// undecodable. Problems are reported, never raised.
    pub fn load(store: &impl KeyValueStore) -> (Self, Vec<LoadIssue>) {
        let mut issues = Vec::new();
        let mut page = PersistedPage::default();

        if let Some(raw) = read_key(store, CANVAS_TRANSFORM_KEY, &mut issues) {
            match decode_transform(&raw) {
                Some(transform) => page.transform = transform,
                None => issues.push(LoadIssue::Malformed {
                    key: CANVAS_TRANSFORM_KEY,
                }),
            }
        }
        if let Some(raw) = read_key(store, CARD_POSITIONS_KEY, &mut issues) {
            match decode_positions(&raw) {
                Some(positions) => page.positions = positions,
                None => issues.push(LoadIssue::Malformed {
                    key: CARD_POSITIONS_KEY,
                }),
            }
        }
        if let Some(raw) = read_key(store, THEME_KEY, &mut issues) {
            if let Some(theme) = decode_theme(&raw) {
                page.theme = theme;
            }
        }
        (page, issues)
    }
}

fn read_key(
    store: &impl KeyValueStore,
    key: &'static str,
    issues: &mut Vec<LoadIssue>,
) -> Option<String> {
    match store.get(key) {
        Ok(Some(raw)) if !raw.trim().is_empty() => Some(raw),
        Ok(_) => None,
        Err(error) => {
            issues.push(LoadIssue::Unreadable { key, error });
            None
        }
    }
}

pub fn decode_transform(raw: &str) -> Option<TransformState> {
    let state: TransformState = serde_json::from_str(raw).ok()?;
    state.sanitized()
}

pub fn decode_positions(raw: &str) -> Option<CardPositions> {
    // JSON.stringify of a missing mapping
    if raw.trim() == "null" {
        return Some(CardPositions::new());
    }
    let mut positions: CardPositions = serde_json::from_str(raw).ok()?;
    positions.retain_finite();
    Some(positions)
}

/// Themes are stored bare; a JSON-quoted string is accepted too.
pub fn decode_theme(raw: &str) -> Option<Theme> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('"') {
        let value: String = serde_json::from_str(trimmed).ok()?;
        return Some(Theme::from_value(&value));
    }
    Some(Theme::from_value(trimmed))
}

pub fn save_transform(
    store: &impl KeyValueStore,
    transform: &TransformState,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(transform).map_err(|err| StorageError::Encode {
        key: CANVAS_TRANSFORM_KEY.to_string(),
        reason: err.to_string(),
    })?;
    store.set(CANVAS_TRANSFORM_KEY, &raw)
}

pub fn save_positions(
    store: &impl KeyValueStore,
    positions: &CardPositions,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(positions).map_err(|err| StorageError::Encode {
        key: CARD_POSITIONS_KEY.to_string(),
        reason: err.to_string(),
    })?;
    store.set(CARD_POSITIONS_KEY, &raw)
}

pub fn clear_positions(store: &impl KeyValueStore) -> Result<(), StorageError> {
    store.remove(CARD_POSITIONS_KEY)
}

pub fn save_theme(store: &impl KeyValueStore, theme: &Theme) -> Result<(), StorageError> {
    store.set(THEME_KEY, theme.as_value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::positions::CardPosition;
    use crate::storage::MemoryStore;

    #[test]
    fn empty_store_yields_defaults() {
        let store = MemoryStore::new();
        let (page, issues) = PersistedPage::load(&store);
        assert_eq!(page, PersistedPage::default());
        assert_eq!(page.theme, Theme::System);
        assert_eq!(page.transform, TransformState::IDENTITY);
        assert!(issues.is_empty());
    }

    #[test]
    fn corrupt_values_fall_back_per_key() {
        let store = MemoryStore::with_entries([
            (CANVAS_TRANSFORM_KEY, "{\"scale\":"),
            (CARD_POSITIONS_KEY, "[1,2,3]"),
            (THEME_KEY, "dark"),
        ]);
        let (page, issues) = PersistedPage::load(&store);
        assert_eq!(page.transform, TransformState::IDENTITY);
        assert!(page.positions.is_empty());
        assert_eq!(page.theme, Theme::Dark);
        assert_eq!(
            issues,
            vec![
                LoadIssue::Malformed {
                    key: CANVAS_TRANSFORM_KEY
                },
                LoadIssue::Malformed {
                    key: CARD_POSITIONS_KEY
                },
            ]
        );
    }

    #[test]
    fn reads_values_written_by_the_page_script() {
        let store = MemoryStore::with_entries([
            (CANVAS_TRANSFORM_KEY, r#"{"scale":1.05,"x":-5,"y":-5}"#),
            (
                CARD_POSITIONS_KEY,
                r#"{"presente":{"x":120,"y":-40.5},"gerundio":{"x":0,"y":3}}"#,
            ),
            (THEME_KEY, "light"),
        ]);
        let (page, issues) = PersistedPage::load(&store);
        assert!(issues.is_empty());
        assert_eq!(
            page.transform,
            TransformState {
                scale: 1.05,
                x: -5.0,
                y: -5.0
            }
        );
        assert_eq!(
            page.positions.get("presente"),
            Some(CardPosition::new(120.0, -40.5))
        );
        assert_eq!(page.positions.len(), 2);
        assert_eq!(page.theme, Theme::Light);
    }

    #[test]
    fn round_trip_restores_identical_state() {
        let store = MemoryStore::new();
        let transform = TransformState {
            scale: 2.25,
            x: -310.5,
            y: 44.0,
        };
        let mut positions = CardPositions::new();
        positions.insert("futuro", CardPosition::new(-8.0, 16.5));
        save_transform(&store, &transform).unwrap();
        save_positions(&store, &positions).unwrap();
        save_theme(&store, &Theme::Dark).unwrap();

        let (page, issues) = PersistedPage::load(&store);
        assert!(issues.is_empty());
        assert_eq!(page.transform, transform);
        assert_eq!(page.positions, positions);
        assert_eq!(page.theme, Theme::Dark);
    }

    #[test]
    fn theme_accepts_json_quoted_and_unknown_values() {
        assert_eq!(decode_theme("\"dark\""), Some(Theme::Dark));
        assert_eq!(
            decode_theme("sepia"),
            Some(Theme::Unrecognized("sepia".to_string()))
        );
        assert_eq!(decode_theme("  "), None);
    }

    #[test]
    fn null_positions_mean_empty() {
        assert_eq!(decode_positions("null"), Some(CardPositions::new()));
    }

    #[test]
    fn write_failures_surface_as_errors() {
        let store = MemoryStore::new().read_only();
        let err = save_theme(&store, &Theme::Light).unwrap_err();
        assert!(matches!(err, StorageError::Rejected { .. }));
    }
}
