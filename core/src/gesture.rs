use std::collections::BTreeMap;

/// What a single-pointer drag moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragTarget {
    Canvas,
    Card(String),
}

/// Receiver of recognized drags and pinch gestures.
pub trait GestureHandler {
    fn on_drag_start(&mut self, target: &DragTarget);
    fn on_drag_move(&mut self, target: &DragTarget, dx: f64, dy: f64);
    fn on_drag_end(&mut self, target: &DragTarget);
    /// `ds` is the change in relative scale since the previous move.
    fn on_gesture_move(&mut self, ds: f64, focal_x: f64, focal_y: f64);
    fn on_gesture_end(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PointerSample {
    x: f64,
    y: f64,
}

#[derive(Clone, Debug)]
struct ActiveDrag {
    pointer_id: i32,
    target: DragTarget,
    last_x: f64,
    last_y: f64,
    started: bool,
}

#[derive(Clone, Copy, Debug)]
struct Pinch {
    ids: (i32, i32),
    start_distance: f64,
    prev_distance: f64,
}

/// Turns raw pointer samples into drag and pinch callbacks.
///
/// One pointer drags; a second pointer ends the drag and starts a pinch.
/// After a pinch, no drag begins until every pointer has lifted.
#[derive(Debug, Default)]
pub struct GestureRecognizer {
    pointers: BTreeMap<i32, PointerSample>,
    drag: Option<ActiveDrag>,
    pinch: Option<Pinch>,
    suppressed: bool,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.as_ref().map(|drag| drag.started).unwrap_or(false)
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    /// `target` is `None` when the pointer landed somewhere that must not
    /// start a drag; the pointer still counts toward a pinch.
    ///
    /// A press from a pointer that is still tracked means its release was
    /// never delivered, so that release is replayed first.
    pub fn pointer_down(
        &mut self,
        id: i32,
        x: f64,
        y: f64,
        target: Option<DragTarget>,
        handler: &mut impl GestureHandler,
    ) {
        if self.pointers.contains_key(&id) {
            self.pointer_up(id, handler);
        }
        self.pointers.insert(id, PointerSample { x, y });
        if self.pinch.is_some() {
            return;
        }
        if self.pointers.len() >= 2 {
            self.finish_drag(handler);
            self.begin_pinch(id);
            return;
        }
        if self.suppressed {
            return;
        }
        if let Some(target) = target {
            self.drag = Some(ActiveDrag {
                pointer_id: id,
                target,
                last_x: x,
                last_y: y,
                started: false,
            });
        }
    }

    pub fn pointer_move(&mut self, id: i32, x: f64, y: f64, handler: &mut impl GestureHandler) {
        let Some(sample) = self.pointers.get_mut(&id) else {
            return;
        };
        sample.x = x;
        sample.y = y;

        if let Some(pinch) = self.pinch.as_mut() {
            if id != pinch.ids.0 && id != pinch.ids.1 {
                return;
            }
            let (Some(a), Some(b)) = (
                self.pointers.get(&pinch.ids.0).copied(),
                self.pointers.get(&pinch.ids.1).copied(),
            ) else {
                return;
            };
            if pinch.start_distance <= f64::EPSILON {
                return;
            }
            let distance = pointer_distance(a, b);
            let ds = distance / pinch.start_distance - pinch.prev_distance / pinch.start_distance;
            pinch.prev_distance = distance;
            let focal_x = (a.x + b.x) * 0.5;
            let focal_y = (a.y + b.y) * 0.5;
            handler.on_gesture_move(ds, focal_x, focal_y);
            return;
        }

        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        if drag.pointer_id != id {
            return;
        }
        let dx = x - drag.last_x;
        let dy = y - drag.last_y;
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        drag.last_x = x;
        drag.last_y = y;
        if !drag.started {
            drag.started = true;
            handler.on_drag_start(&drag.target);
        }
        handler.on_drag_move(&drag.target, dx, dy);
    }

    /// Handles both pointer-up and pointer-cancel.
    pub fn pointer_up(&mut self, id: i32, handler: &mut impl GestureHandler) {
        if self.pointers.remove(&id).is_none() {
            return;
        }
        if let Some(pinch) = self.pinch {
            if id == pinch.ids.0 || id == pinch.ids.1 {
                self.pinch = None;
                self.suppressed = true;
                handler.on_gesture_end();
            }
        }
        if self
            .drag
            .as_ref()
            .map(|drag| drag.pointer_id == id)
            .unwrap_or(false)
        {
            self.finish_drag(handler);
        }
        if self.pointers.is_empty() {
            self.suppressed = false;
        }
    }

    fn finish_drag(&mut self, handler: &mut impl GestureHandler) {
        if let Some(drag) = self.drag.take() {
            if drag.started {
                handler.on_drag_end(&drag.target);
            }
        }
    }

    fn begin_pinch(&mut self, newest: i32) {
        let other = self
            .pointers
            .keys()
            .copied()
            .find(|id| *id != newest)
            .unwrap_or(newest);
        let distance = match (self.pointers.get(&other), self.pointers.get(&newest)) {
            (Some(a), Some(b)) => pointer_distance(*a, *b),
            _ => 0.0,
        };
        self.pinch = Some(Pinch {
            ids: (other, newest),
            start_distance: distance,
            prev_distance: distance,
        });
    }
}

fn pointer_distance(a: PointerSample, b: PointerSample) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}
