use crate::chart::ScatterChart;
use gpui::*;
use std::cell::RefCell;
use std::rc::Rc;

actions!(
    gpui_scatter,
    [PanLeft, PanRight, PanUp, PanDown, ZoomIn, ZoomOut, ResetView]
);

/// Keyboard pan step in pixels.
pub const PAN_STEP: f32 = 20.0;
/// Keyboard zoom step.
pub const ZOOM_STEP: f64 = 1.25;

/// Default key bindings for the chart actions.
pub fn init(cx: &mut App) {
    cx.bind_keys([
        KeyBinding::new("left", PanLeft, None),
        KeyBinding::new("right", PanRight, None),
        KeyBinding::new("up", PanUp, None),
        KeyBinding::new("down", PanDown, None),
        KeyBinding::new("+", ZoomIn, None),
        KeyBinding::new("=", ZoomIn, None),
        KeyBinding::new("-", ZoomOut, None),
        KeyBinding::new("0", ResetView, None),
    ]);
}

#[derive(Clone)]
pub struct ChartActionHandler {
    pub chart: Rc<RefCell<ScatterChart>>,
}

impl ChartActionHandler {
    pub fn new(chart: Rc<RefCell<ScatterChart>>) -> Self {
        Self { chart }
    }

    fn apply(&self, window: &mut Window, f: impl FnOnce(&mut ScatterChart)) {
        if let Ok(mut chart) = self.chart.try_borrow_mut() {
            f(&mut chart);
            window.refresh();
        }
    }

    // Moving the view left shifts content right.
    pub fn handle_pan_left(&self, _: &PanLeft, window: &mut Window, _cx: &mut App) {
        self.apply(window, |c| c.pan(PAN_STEP, 0.0));
    }

    pub fn handle_pan_right(&self, _: &PanRight, window: &mut Window, _cx: &mut App) {
        self.apply(window, |c| c.pan(-PAN_STEP, 0.0));
    }

    pub fn handle_pan_up(&self, _: &PanUp, window: &mut Window, _cx: &mut App) {
        self.apply(window, |c| c.pan(0.0, PAN_STEP));
    }

    pub fn handle_pan_down(&self, _: &PanDown, window: &mut Window, _cx: &mut App) {
        self.apply(window, |c| c.pan(0.0, -PAN_STEP));
    }

    pub fn handle_zoom_in(&self, _: &ZoomIn, window: &mut Window, _cx: &mut App) {
        self.apply(window, |c| c.zoom_centered(ZOOM_STEP));
    }

    pub fn handle_zoom_out(&self, _: &ZoomOut, window: &mut Window, _cx: &mut App) {
        self.apply(window, |c| c.zoom_centered(1.0 / ZOOM_STEP));
    }

    pub fn handle_reset_view(&self, _: &ResetView, window: &mut Window, _cx: &mut App) {
        self.apply(window, |c| c.reset_view());
    }
}
