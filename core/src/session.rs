use std::collections::BTreeMap;
use std::rc::Rc;

use crate::consts::{CLASS_ANIMATING, CLASS_DRAGGING, CLASS_PANNING, RESET_ANIMATION_MS};
use crate::gesture::{DragTarget, GestureHandler};
use crate::persisted::{self, PersistedPage};
use crate::positions::{CardPosition, CardPositions, ResetButtonState};
use crate::storage::{KeyValueStore, StorageError};
use crate::theme::Theme;
use crate::transform::{zoom_indicator_label, TransformState};
use crate::view::{Surface, ViewCommand};

pub type LogSink = Rc<dyn Fn(&str)>;

pub fn silent_log() -> LogSink {
    Rc::new(|_| {})
}

/// All mutable page state for one visit. Every operation queues the view
/// commands it implies; settled changes are committed to the store before
/// the operation returns.
pub struct CanvasSession<S: KeyValueStore> {
    store: S,
    log: LogSink,
    transform: TransformState,
    committed: CardPositions,
    offsets: BTreeMap<String, CardPosition>,
    cards: Vec<String>,
    active_theme: Theme,
    zoom_hovered: bool,
    commands: Vec<ViewCommand>,
}

impl<S: KeyValueStore> CanvasSession<S> {
    pub fn new(store: S, log: LogSink) -> Self {
        let (page, issues) = PersistedPage::load(&store);
        for issue in &issues {
            log(&format!("persisted state: {issue}"));
        }
        let PersistedPage {
            transform,
            positions,
            theme,
        } = page;
        Self {
            store,
            log,
            transform,
            committed: positions,
            offsets: BTreeMap::new(),
            cards: Vec::new(),
            active_theme: theme,
            zoom_hovered: false,
            commands: Vec::new(),
        }
    }

    /// Applies restored state to the cards present in the document. Stored
    /// offsets for ids without a card stay in the mapping untouched.
    pub fn boot<I, T>(&mut self, card_ids: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let theme = self.active_theme.clone();
        self.apply_theme(theme);

        self.cards = card_ids.into_iter().map(Into::into).collect();
        self.offsets.clear();
        for card_id in self.cards.clone() {
            let offset = match self.committed.get(&card_id) {
                Some(offset) => {
                    self.commands.push(ViewCommand::SetCardOffset {
                        card_id: card_id.clone(),
                        offset,
                    });
                    offset
                }
                None => CardPosition::ORIGIN,
            };
            self.offsets.insert(card_id, offset);
        }

        self.render_transform();
        self.refresh_reset_button();
    }

    pub fn transform(&self) -> TransformState {
        self.transform
    }

    pub fn active_theme(&self) -> &Theme {
        &self.active_theme
    }

    pub fn card_offset(&self, card_id: &str) -> CardPosition {
        self.offsets
            .get(card_id)
            .copied()
            .unwrap_or(CardPosition::ORIGIN)
    }

    pub fn committed_positions(&self) -> &CardPositions {
        &self.committed
    }

    pub fn reset_button(&self) -> ResetButtonState {
        ResetButtonState::for_positions(&self.committed)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn drain_commands(&mut self) -> Vec<ViewCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn apply_theme(&mut self, theme: Theme) {
        self.commands.push(ViewCommand::SetThemeClass(theme.clone()));
        if let Err(err) = persisted::save_theme(&self.store, &theme) {
            self.report("theme", &err);
        }
        self.commands
            .push(ViewCommand::ShowSelectedTheme(theme.clone()));
        self.active_theme = theme;
    }

    pub fn preview_theme(&mut self, theme: &Theme) {
        self.commands.push(ViewCommand::SetThemeClass(theme.clone()));
    }

    /// Hovering a dropdown option.
    pub fn preview_option(&mut self, theme: &Theme) {
        self.preview_theme(theme);
        self.commands.push(ViewCommand::SetPreviewHighlight(true));
    }

    /// Leaving the dropdown options restores the committed theme.
    pub fn end_preview(&mut self) {
        let theme = self.active_theme.clone();
        self.preview_theme(&theme);
        self.commands.push(ViewCommand::SetPreviewHighlight(false));
    }

    pub fn wheel(&mut self, cursor_x: f64, cursor_y: f64, delta_y: f64) {
        self.transform.zoom_by_wheel(cursor_x, cursor_y, delta_y);
        self.render_transform();
        self.commit_transform();
    }

    pub fn reset_canvas(&mut self) {
        self.commands.push(ViewCommand::SetClass {
            surface: Surface::Canvas,
            class: CLASS_ANIMATING,
            on: true,
        });
        self.transform.reset();
        self.commit_transform();
        self.render_transform();
        self.commands.push(ViewCommand::RemoveClassAfter {
            surface: Surface::Canvas,
            class: CLASS_ANIMATING,
            delay_ms: RESET_ANIMATION_MS,
        });
    }

    pub fn reset_positions(&mut self) {
        if let Err(err) = persisted::clear_positions(&self.store) {
            self.report("card positions", &err);
        }
        self.committed.clear();
        for card_id in self.cards.clone() {
            let surface = Surface::Card(card_id.clone());
            self.commands.push(ViewCommand::SetClass {
                surface: surface.clone(),
                class: CLASS_ANIMATING,
                on: true,
            });
            self.offsets.insert(card_id.clone(), CardPosition::ORIGIN);
            self.commands.push(ViewCommand::SetCardOffset {
                card_id,
                offset: CardPosition::ORIGIN,
            });
            self.commands.push(ViewCommand::RemoveClassAfter {
                surface,
                class: CLASS_ANIMATING,
                delay_ms: RESET_ANIMATION_MS,
            });
        }
        self.refresh_reset_button();
    }

    pub fn set_zoom_hovered(&mut self, hovered: bool) {
        self.zoom_hovered = hovered;
        self.commands.push(ViewCommand::SetZoomLabel(zoom_indicator_label(
            &self.transform,
            hovered,
        )));
    }

    fn render_transform(&mut self) {
        self.commands
            .push(ViewCommand::SetCanvasTransform(self.transform.css()));
        // a hover label stays until the pointer leaves
        if !self.zoom_hovered {
            self.commands.push(ViewCommand::SetZoomLabel(zoom_indicator_label(
                &self.transform,
                false,
            )));
        }
    }

    fn refresh_reset_button(&mut self) {
        self.commands
            .push(ViewCommand::SetResetButton(self.reset_button()));
    }

    fn commit_transform(&mut self) {
        if let Err(err) = persisted::save_transform(&self.store, &self.transform) {
            self.report("canvas transform", &err);
        }
    }

    fn commit_positions(&mut self) {
        if let Err(err) = persisted::save_positions(&self.store, &self.committed) {
            self.report("card positions", &err);
        }
    }

    fn report(&self, what: &str, err: &StorageError) {
        (self.log)(&format!("failed to persist {what}: {err}"));
    }

    fn ensure_card(&mut self, card_id: &str) {
        if !self.cards.iter().any(|id| id == card_id) {
            self.cards.push(card_id.to_string());
        }
    }
}

impl<S: KeyValueStore> GestureHandler for CanvasSession<S> {
    fn on_drag_start(&mut self, target: &DragTarget) {
        let (surface, class) = match target {
            DragTarget::Canvas => (Surface::Body, CLASS_PANNING),
            DragTarget::Card(card_id) => {
                self.ensure_card(card_id);
                (Surface::Card(card_id.clone()), CLASS_DRAGGING)
            }
        };
        self.commands.push(ViewCommand::SetClass {
            surface,
            class,
            on: true,
        });
    }

    fn on_drag_move(&mut self, target: &DragTarget, dx: f64, dy: f64) {
        match target {
            DragTarget::Canvas => {
                self.transform.pan_by(dx, dy);
                self.render_transform();
            }
            DragTarget::Card(card_id) => {
                let offset = self
                    .card_offset(card_id)
                    .dragged_by(dx, dy, self.transform.scale);
                self.offsets.insert(card_id.clone(), offset);
                self.commands.push(ViewCommand::SetCardOffset {
                    card_id: card_id.clone(),
                    offset,
                });
            }
        }
    }

    fn on_drag_end(&mut self, target: &DragTarget) {
        match target {
            DragTarget::Canvas => {
                self.commands.push(ViewCommand::SetClass {
                    surface: Surface::Body,
                    class: CLASS_PANNING,
                    on: false,
                });
                self.commit_transform();
            }
            DragTarget::Card(card_id) => {
                self.commands.push(ViewCommand::SetClass {
                    surface: Surface::Card(card_id.clone()),
                    class: CLASS_DRAGGING,
                    on: false,
                });
                let offset = self.card_offset(card_id);
                self.committed.insert(card_id.clone(), offset);
                self.commit_positions();
                self.refresh_reset_button();
            }
        }
    }

    fn on_gesture_move(&mut self, ds: f64, focal_x: f64, focal_y: f64) {
        self.transform.zoom_by_gesture(focal_x, focal_y, ds);
        self.render_transform();
    }

    fn on_gesture_end(&mut self) {
        self.commit_transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CANVAS_TRANSFORM_KEY, THEME_KEY};
    use crate::storage::MemoryStore;

    fn session() -> CanvasSession<MemoryStore> {
        let mut session = CanvasSession::new(MemoryStore::new(), silent_log());
        session.boot(["presente", "futuro"]);
        session.drain_commands();
        session
    }

    #[test]
    fn boot_emits_theme_transform_and_reset_state() {
        let mut session = CanvasSession::new(MemoryStore::new(), silent_log());
        session.boot(["presente"]);
        let commands = session.drain_commands();
        assert_eq!(
            commands,
            vec![
                ViewCommand::SetThemeClass(Theme::System),
                ViewCommand::ShowSelectedTheme(Theme::System),
                ViewCommand::SetCanvasTransform("translate(0px, 0px) scale(1)".to_string()),
                ViewCommand::SetZoomLabel("Scroll to zoom?".to_string()),
                ViewCommand::SetResetButton(ResetButtonState::for_positions(
                    &CardPositions::new()
                )),
            ]
        );
        assert_eq!(session.store().raw(THEME_KEY).as_deref(), Some("system"));
    }

    #[test]
    fn zoom_hover_label_survives_rerender() {
        let mut session = session();
        session.set_zoom_hovered(true);
        session.wheel(0.0, 0.0, -1.0);
        let labels: Vec<_> = session
            .drain_commands()
            .into_iter()
            .filter(|cmd| matches!(cmd, ViewCommand::SetZoomLabel(_)))
            .collect();
        assert_eq!(
            labels,
            vec![ViewCommand::SetZoomLabel("Сбросить на 100%".to_string())]
        );
        session.set_zoom_hovered(false);
        assert_eq!(
            session.drain_commands(),
            vec![ViewCommand::SetZoomLabel("105%".to_string())]
        );
    }

    #[test]
    fn read_only_store_logs_instead_of_failing() {
        let messages = Rc::new(std::cell::RefCell::new(Vec::<String>::new()));
        let sink = {
            let messages = messages.clone();
            Rc::new(move |line: &str| messages.borrow_mut().push(line.to_string())) as LogSink
        };
        let mut session = CanvasSession::new(MemoryStore::new().read_only(), sink);
        session.wheel(10.0, 10.0, -1.0);
        assert!(session.transform().scale > 1.0);
        assert!(session.store().raw(CANVAS_TRANSFORM_KEY).is_none());
        assert_eq!(messages.borrow().len(), 1);
        assert!(messages.borrow()[0].contains("canvas transform"));
    }

    #[test]
    fn preview_does_not_touch_active_theme() {
        let mut session = session();
        session.apply_theme(Theme::Light);
        session.drain_commands();
        session.preview_option(&Theme::Dark);
        assert_eq!(
            session.drain_commands(),
            vec![
                ViewCommand::SetThemeClass(Theme::Dark),
                ViewCommand::SetPreviewHighlight(true),
            ]
        );
        assert_eq!(session.active_theme(), &Theme::Light);
        assert_eq!(session.store().raw(THEME_KEY).as_deref(), Some("light"));
        session.end_preview();
        assert_eq!(
            session.drain_commands(),
            vec![
                ViewCommand::SetThemeClass(Theme::Light),
                ViewCommand::SetPreviewHighlight(false),
            ]
        );
    }

    #[test]
    fn pan_marks_body_and_commits_at_end() {
        let mut session = session();
        session.on_drag_start(&DragTarget::Canvas);
        session.on_drag_move(&DragTarget::Canvas, 12.0, -3.0);
        assert!(session.store().raw(CANVAS_TRANSFORM_KEY).is_none());
        session.on_drag_end(&DragTarget::Canvas);
        let commands = session.drain_commands();
        assert_eq!(
            commands.first(),
            Some(&ViewCommand::SetClass {
                surface: Surface::Body,
                class: CLASS_PANNING,
                on: true
            })
        );
        assert_eq!(
            commands.last(),
            Some(&ViewCommand::SetClass {
                surface: Surface::Body,
                class: CLASS_PANNING,
                on: false
            })
        );
        assert_eq!(
            session.store().raw(CANVAS_TRANSFORM_KEY).as_deref(),
            Some(r#"{"scale":1.0,"x":12.0,"y":-3.0}"#)
        );
    }
}
