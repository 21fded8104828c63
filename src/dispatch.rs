use gloo::events::{EventListener, EventListenerOptions};
use web_sys::{Event, EventTarget};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InputKind {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    Wheel,
    MouseOver,
    MouseOut,
    MouseEnter,
    MouseLeave,
    Click,
    Change,
}

impl InputKind {
    pub(crate) fn event_type(self) -> &'static str {
        match self {
            InputKind::PointerDown => "pointerdown",
            InputKind::PointerMove => "pointermove",
            InputKind::PointerUp => "pointerup",
            InputKind::PointerCancel => "pointercancel",
            InputKind::Wheel => "wheel",
            InputKind::MouseOver => "mouseover",
            InputKind::MouseOut => "mouseout",
            InputKind::MouseEnter => "mouseenter",
            InputKind::MouseLeave => "mouseleave",
            InputKind::Click => "click",
            InputKind::Change => "change",
        }
    }

    /// Wheel handlers cancel page scrolling, so they must not be passive.
    fn needs_prevent_default(self) -> bool {
        matches!(self, InputKind::Wheel)
    }
}

type Handler = Box<dyn FnMut(&Event)>;

struct Binding {
    kind: InputKind,
    target: EventTarget,
    handler: Handler,
}

/// Every listener the page installs, collected before any is attached.
#[derive(Default)]
pub(crate) struct DispatchTable {
    bindings: Vec<Binding>,
}

impl DispatchTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bind<F>(&mut self, kind: InputKind, target: &EventTarget, handler: F)
    where
        F: FnMut(&Event) + 'static,
    {
        self.bindings.push(Binding {
            kind,
            target: target.clone(),
            handler: Box::new(handler),
        });
    }

    pub(crate) fn len(&self) -> usize {
        self.bindings.len()
    }

    pub(crate) fn kinds(&self) -> Vec<InputKind> {
        self.bindings.iter().map(|binding| binding.kind).collect()
    }

    /// The returned listeners detach when dropped.
    pub(crate) fn attach(self) -> Vec<EventListener> {
        self.bindings
            .into_iter()
            .map(|binding| {
                let Binding {
                    kind,
                    target,
                    mut handler,
                } = binding;
                if kind.needs_prevent_default() {
                    EventListener::new_with_options(
                        &target,
                        kind.event_type(),
                        EventListenerOptions::enable_prevent_default(),
                        move |event| handler(event),
                    )
                } else {
                    EventListener::new(&target, kind.event_type(), move |event| handler(event))
                }
            })
            .collect()
    }
}
