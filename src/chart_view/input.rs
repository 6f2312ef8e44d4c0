use crate::events::{EventSurface, PointerButton, SurfaceEvent};
use crate::utils::{local_position, PixelsExt};
use gpui::*;
use std::cell::Cell;
use std::rc::Rc;

/// Pixels per line for line-based scroll deltas.
const LINE_HEIGHT: f32 = 20.0;

/// Translates GPUI mouse events into surface events in chart coordinates.
#[derive(Clone)]
pub struct ChartInputHandler {
    pub surface: Rc<EventSurface>,
    pub focus_handle: FocusHandle,
    /// Top-left of the chart surface in window coordinates, updated on paint.
    pub origin: Rc<Cell<Point<Pixels>>>,
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

impl ChartInputHandler {
    pub fn new(surface: Rc<EventSurface>, focus_handle: FocusHandle, origin: Rc<Cell<Point<Pixels>>>) -> Self {
        Self {
            surface,
            focus_handle,
            origin,
        }
    }

    fn local(&self, position: Point<Pixels>) -> (f32, f32) {
        local_position(position, self.origin.get())
    }

    fn dispatch(&self, event: SurfaceEvent, window: &mut Window) {
        self.surface.dispatch(&event);
        window.refresh();
    }

    pub fn handle_mouse_down(&self, event: &MouseDownEvent, window: &mut Window, _cx: &mut App) {
        window.focus(&self.focus_handle);
        let Some(button) = pointer_button(event.button) else {
            return;
        };
        let (x, y) = self.local(event.position);
        self.dispatch(
            SurfaceEvent::PointerDown {
                x,
                y,
                button,
                click_count: event.click_count,
            },
            window,
        );
    }

    pub fn handle_mouse_move(&self, event: &MouseMoveEvent, window: &mut Window, _cx: &mut App) {
        let (x, y) = self.local(event.position);
        let pressed = event.pressed_button.and_then(pointer_button);
        self.dispatch(SurfaceEvent::PointerMove { x, y, pressed }, window);
    }

    pub fn handle_mouse_up(&self, event: &MouseUpEvent, window: &mut Window, _cx: &mut App) {
        let Some(button) = pointer_button(event.button) else {
            return;
        };
        let (x, y) = self.local(event.position);
        self.dispatch(SurfaceEvent::PointerUp { x, y, button }, window);
    }

    pub fn handle_hover(&self, hovered: &bool, window: &mut Window, _cx: &mut App) {
        if !*hovered {
            self.dispatch(SurfaceEvent::PointerLeave, window);
        }
    }

    pub fn handle_scroll_wheel(&self, event: &ScrollWheelEvent, window: &mut Window, _cx: &mut App) {
        let (dx, dy) = match event.delta {
            ScrollDelta::Pixels(p) => (p.x.as_f32(), p.y.as_f32()),
            ScrollDelta::Lines(p) => (p.x * LINE_HEIGHT, p.y * LINE_HEIGHT),
        };
        let (x, y) = self.local(event.position);
        // GPUI reports scrolling up as positive; surface deltas are positive downwards.
        self.dispatch(
            SurfaceEvent::Wheel {
                x,
                y,
                delta_x: -dx,
                delta_y: -dy,
            },
            window,
        );
    }
}
