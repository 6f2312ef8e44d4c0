//! Pointer events, caller handlers and the listener table input backends dispatch to.

use crate::data_types::Record;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Over,
    Out,
    Move,
    Click,
}

/// Pointer interaction on a mark, in chart-surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f32,
    pub y: f32,
    /// Index of the record under the pointer.
    pub index: usize,
}

pub type MarkHandler = Rc<dyn Fn(&PointerEvent, &Record)>;

/// Caller-supplied interaction callbacks. Any of them may be absent.
#[derive(Clone, Default)]
pub struct ChartHandlers {
    pub on_mouse_over: Option<MarkHandler>,
    pub on_mouse_out: Option<MarkHandler>,
    pub on_mouse_move: Option<MarkHandler>,
    pub on_click: Option<MarkHandler>,
}

impl ChartHandlers {
    pub fn on_mouse_over(mut self, f: impl Fn(&PointerEvent, &Record) + 'static) -> Self {
        self.on_mouse_over = Some(Rc::new(f));
        self
    }

    pub fn on_mouse_out(mut self, f: impl Fn(&PointerEvent, &Record) + 'static) -> Self {
        self.on_mouse_out = Some(Rc::new(f));
        self
    }

    pub fn on_mouse_move(mut self, f: impl Fn(&PointerEvent, &Record) + 'static) -> Self {
        self.on_mouse_move = Some(Rc::new(f));
        self
    }

    pub fn on_click(mut self, f: impl Fn(&PointerEvent, &Record) + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }

    fn handler(&self, kind: PointerEventKind) -> Option<&MarkHandler> {
        match kind {
            PointerEventKind::Over => self.on_mouse_over.as_ref(),
            PointerEventKind::Out => self.on_mouse_out.as_ref(),
            PointerEventKind::Move => self.on_mouse_move.as_ref(),
            PointerEventKind::Click => self.on_click.as_ref(),
        }
    }
}

impl fmt::Debug for ChartHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartHandlers")
            .field("on_mouse_over", &self.on_mouse_over.is_some())
            .field("on_mouse_out", &self.on_mouse_out.is_some())
            .field("on_mouse_move", &self.on_mouse_move.is_some())
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

/// Forwards mark interactions to the caller, synchronously and unmodified.
pub struct EventBridge;

impl EventBridge {
    pub fn forward(handlers: &ChartHandlers, event: &PointerEvent, record: &Record) {
        if let Some(handler) = handlers.handler(event.kind) {
            handler(event, record);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Raw input delivered to a surface by the windowing backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceEvent {
    PointerDown { x: f32, y: f32, button: PointerButton, click_count: usize },
    PointerMove { x: f32, y: f32, pressed: Option<PointerButton> },
    PointerUp { x: f32, y: f32, button: PointerButton },
    PointerLeave,
    /// Scroll in pixels; positive `delta_y` scrolls down.
    Wheel { x: f32, y: f32, delta_x: f32, delta_y: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerLeave,
    Wheel,
}

impl SurfaceEvent {
    pub fn kind(&self) -> ListenerKind {
        match self {
            Self::PointerDown { .. } => ListenerKind::PointerDown,
            Self::PointerMove { .. } => ListenerKind::PointerMove,
            Self::PointerUp { .. } => ListenerKind::PointerUp,
            Self::PointerLeave => ListenerKind::PointerLeave,
            Self::Wheel { .. } => ListenerKind::Wheel,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(&SurfaceEvent)>;

/// Listener table for one drawing surface.
///
/// Listeners are attached and detached explicitly; [`EventSurface::listener_count`]
/// exposes how many are live.
#[derive(Default)]
pub struct EventSurface {
    listeners: RefCell<Vec<(ListenerId, ListenerKind, Listener)>>,
    next_id: Cell<u64>,
}

impl EventSurface {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn add_listener(&self, kind: ListenerKind, listener: impl Fn(&SurfaceEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, kind, Rc::new(listener)));
        trace!(?id, ?kind, "listener attached");
        id
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _, _)| *lid != id);
        before != listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn listener_count_for(&self, kind: ListenerKind) -> usize {
        self.listeners.borrow().iter().filter(|(_, k, _)| *k == kind).count()
    }

    /// Calls every listener registered for the event's kind.
    ///
    /// The table is snapshotted first, so listeners may detach themselves
    /// (or others) while running.
    pub fn dispatch(&self, event: &SurfaceEvent) {
        let kind = event.kind();
        let targets: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, l)| l.clone())
            .collect();
        for listener in targets {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_passes_record_through() {
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        let handlers = ChartHandlers::default().on_click(move |e, r| {
            *sink.borrow_mut() = Some((e.index, r.clone()));
        });
        let record = Record::new().with("count", 3.0);
        let event = PointerEvent { kind: PointerEventKind::Click, x: 1.0, y: 2.0, index: 7 };
        EventBridge::forward(&handlers, &event, &record);
        assert_eq!(*seen.borrow(), Some((7, record)));
    }

    #[test]
    fn test_missing_handler_is_noop() {
        let handlers = ChartHandlers::default();
        let event = PointerEvent { kind: PointerEventKind::Over, x: 0.0, y: 0.0, index: 0 };
        EventBridge::forward(&handlers, &event, &Record::new());
    }

    #[test]
    fn test_surface_attach_detach() {
        let surface = EventSurface::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let id = surface.add_listener(ListenerKind::PointerLeave, move |_| h.set(h.get() + 1));
        surface.add_listener(ListenerKind::Wheel, |_| {});
        assert_eq!(surface.listener_count(), 2);
        assert_eq!(surface.listener_count_for(ListenerKind::Wheel), 1);

        surface.dispatch(&SurfaceEvent::PointerLeave);
        assert_eq!(hits.get(), 1);

        assert!(surface.remove_listener(id));
        assert!(!surface.remove_listener(id));
        surface.dispatch(&SurfaceEvent::PointerLeave);
        assert_eq!(hits.get(), 1);
        assert_eq!(surface.listener_count(), 1);
    }
}
