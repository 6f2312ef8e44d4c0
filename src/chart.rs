//! The scatter chart component model and its mount lifecycle.

use crate::data_types::{Record, ScatterConfig};
use crate::error::Result;
use crate::events::{
    ChartHandlers, EventBridge, EventSurface, ListenerId, ListenerKind, PointerButton, PointerEvent,
    PointerEventKind, SurfaceEvent,
};
use crate::rendering::{render_scaled, Scene};
use crate::scales::BaseScales;
use crate::view_controller::{ViewTransform, ZoomController, ZoomState};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tracing::{debug, info, warn};

/// Pointer travel (px) below which a press/release counts as a click.
pub const CLICK_TOLERANCE: f32 = 3.0;
/// Zoom factor for double-click and keyboard zoom-in.
pub const STEP_ZOOM: f64 = 2.0;

#[derive(Clone, Copy, Debug)]
struct DragState {
    origin: (f32, f32),
    last: (f32, f32),
    button: PointerButton,
    moved: bool,
}

/// State of one chart instance: committed data and config, the scales built
/// from them, the zoom controller, and the current frame.
pub struct ScatterChart {
    config: ScatterConfig,
    data: Rc<Vec<Record>>,
    base: BaseScales,
    zoom: ZoomController,
    handlers: ChartHandlers,
    scene: Scene,
    hovered: Option<usize>,
    drag: Option<DragState>,
    /// Set by a mount dropped while the chart was borrowed.
    pending_unmount: Rc<Cell<bool>>,
}

impl ScatterChart {
    pub fn new(data: Vec<Record>, config: ScatterConfig) -> Result<Self> {
        config.validate()?;
        let zoom = ZoomController::new(config.scale_extent)?;
        let base = BaseScales::build(&data, &config)?;
        let scene = render_scaled(&data, &config, &base)?;
        debug!(records = data.len(), marks = scene.marks.len(), "scatter chart created");
        Ok(Self {
            config,
            data: Rc::new(data),
            base,
            zoom,
            handlers: ChartHandlers::default(),
            scene,
            hovered: None,
            drag: None,
            pending_unmount: Rc::new(Cell::new(false)),
        })
    }

    pub fn with_handlers(mut self, handlers: ChartHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn set_handlers(&mut self, handlers: ChartHandlers) {
        self.handlers = handlers;
    }

    pub fn handlers(&self) -> &ChartHandlers {
        &self.handlers
    }

    pub fn config(&self) -> &ScatterConfig {
        &self.config
    }

    pub fn data(&self) -> &[Record] {
        &self.data
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn base_scales(&self) -> &BaseScales {
        &self.base
    }

    pub fn view_transform(&self) -> ViewTransform {
        self.zoom.transform()
    }

    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn zoom_state(&self) -> ZoomState {
        self.zoom.state()
    }

    /// Record index currently under the pointer.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Replaces the dataset. Returns `Ok(false)` when it is equal to the current one.
    ///
    /// Scales are rebuilt before anything else; on error nothing changes.
    pub fn set_data(&mut self, data: Vec<Record>) -> Result<bool> {
        self.apply_pending_unmount();
        if *self.data == data {
            return Ok(false);
        }
        let base = BaseScales::build(&data, &self.config).inspect_err(|e| {
            warn!(error = %e, "rejected dataset update");
        })?;
        let scene = render_scaled(&data, &self.config, &self.zoom.rescaled(&base))?;
        self.data = Rc::new(data);
        self.base = base;
        self.scene = scene;
        self.hovered = None;
        debug!(records = self.data.len(), "dataset committed");
        Ok(true)
    }

    /// Replaces the configuration. Returns `Ok(false)` when it is equal to the current one.
    pub fn set_config(&mut self, config: ScatterConfig) -> Result<bool> {
        self.apply_pending_unmount();
        if self.config == config {
            return Ok(false);
        }
        config.validate()?;
        let mut zoom = ZoomController::new(config.scale_extent)?;
        if self.zoom.has_transform() {
            zoom.set_transform(self.zoom.transform());
            zoom.end();
        }
        let base = BaseScales::build(&self.data, &config).inspect_err(|e| {
            warn!(error = %e, "rejected config update");
        })?;
        let scene = render_scaled(&self.data, &config, &zoom.rescaled(&base))?;
        self.config = config;
        self.zoom = zoom;
        self.base = base;
        self.scene = scene;
        self.hovered = None;
        Ok(true)
    }

    fn redraw(&mut self) {
        match render_scaled(&self.data, &self.config, &self.zoom.rescaled(&self.base)) {
            Ok(scene) => self.scene = scene,
            Err(e) => warn!(error = %e, "redraw failed, keeping previous frame"),
        }
    }

    fn plot_pivot(&self, x: f32, y: f32) -> (f64, f64) {
        let (lx, ly) = self.scene.plot.to_local(x, y);
        (lx as f64, ly as f64)
    }

    /// Multiplies the zoom around a surface point as one complete gesture.
    pub fn zoom_at(&mut self, factor: f64, x: f32, y: f32) {
        self.apply_pending_unmount();
        let pivot = self.plot_pivot(x, y);
        self.zoom.zoom_at(factor, pivot);
        self.zoom.end();
        self.redraw();
    }

    /// Zoom around the plot centre.
    pub fn zoom_centered(&mut self, factor: f64) {
        let plot = self.scene.plot;
        self.zoom_at(factor, plot.x + plot.width / 2.0, plot.y + plot.height / 2.0);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.apply_pending_unmount();
        self.zoom.pan_by(dx as f64, dy as f64);
        self.zoom.end();
        self.redraw();
    }

    pub fn set_view_transform(&mut self, transform: ViewTransform) {
        self.apply_pending_unmount();
        self.zoom.set_transform(transform);
        self.zoom.end();
        self.redraw();
    }

    pub fn reset_view(&mut self) {
        self.apply_pending_unmount();
        self.zoom.reset();
        self.zoom.end();
        self.redraw();
    }

    /// Drops per-mount state: the view transform, hover and any drag in progress.
    pub fn unmount(&mut self) {
        self.zoom.discard();
        self.hovered = None;
        self.drag = None;
        self.redraw();
    }

    /// Runs an unmount deferred by a mount dropped mid-borrow. Every mutating
    /// entry point calls this first. Returns whether one was pending.
    pub fn apply_pending_unmount(&mut self) -> bool {
        if !self.pending_unmount.replace(false) {
            return false;
        }
        debug!("applying deferred unmount");
        self.unmount();
        true
    }

    fn mark_event(&self, kind: PointerEventKind, x: f32, y: f32, index: usize) -> PointerEvent {
        PointerEvent { kind, x, y, index }
    }

    /// Re-targets hover at a surface point, emitting out/over/move as needed.
    fn update_hover(&mut self, x: f32, y: f32, emitted: &mut Vec<PointerEvent>) {
        let hit = self.scene.mark_at(x, y).map(|m| m.index);
        if hit != self.hovered {
            if let Some(old) = self.hovered {
                emitted.push(self.mark_event(PointerEventKind::Out, x, y, old));
            }
            if let Some(new) = hit {
                emitted.push(self.mark_event(PointerEventKind::Over, x, y, new));
            }
            self.hovered = hit;
        }
        if let Some(current) = hit {
            emitted.push(self.mark_event(PointerEventKind::Move, x, y, current));
        }
    }

    /// Applies one surface event. Returns the mark events to forward to the
    /// caller's handlers, in order.
    pub fn handle_surface_event(&mut self, event: &SurfaceEvent) -> Vec<PointerEvent> {
        self.apply_pending_unmount();
        let mut emitted = Vec::new();
        match *event {
            SurfaceEvent::PointerDown { x, y, button, click_count } => {
                if click_count >= 2 && button == PointerButton::Primary {
                    self.drag = None;
                    self.zoom_at(STEP_ZOOM, x, y);
                    return emitted;
                }
                self.drag = Some(DragState {
                    origin: (x, y),
                    last: (x, y),
                    button,
                    moved: false,
                });
                self.zoom.begin();
            }
            SurfaceEvent::PointerMove { x, y, pressed } => match self.drag {
                Some(drag) if pressed == Some(drag.button) => {
                    let (dx, dy) = (x - drag.last.0, y - drag.last.1);
                    let travelled =
                        ((x - drag.origin.0).powi(2) + (y - drag.origin.1).powi(2)).sqrt();
                    self.drag = Some(DragState {
                        last: (x, y),
                        moved: drag.moved || travelled >= CLICK_TOLERANCE,
                        ..drag
                    });
                    if dx != 0.0 || dy != 0.0 {
                        self.zoom.pan_by(dx as f64, dy as f64);
                        self.redraw();
                    }
                }
                Some(_) => {
                    // Button was released outside the surface.
                    self.drag = None;
                    self.zoom.end();
                    self.update_hover(x, y, &mut emitted);
                }
                None => self.update_hover(x, y, &mut emitted),
            },
            SurfaceEvent::PointerUp { x, y, button } => {
                if let Some(drag) = self.drag.take() {
                    self.zoom.end();
                    if !drag.moved && drag.button == button && button == PointerButton::Primary {
                        if let Some(index) = self.scene.mark_at(x, y).map(|m| m.index) {
                            emitted.push(self.mark_event(PointerEventKind::Click, x, y, index));
                        }
                    }
                }
            }
            SurfaceEvent::PointerLeave => {
                if let Some(old) = self.hovered.take() {
                    emitted.push(self.mark_event(PointerEventKind::Out, -1.0, -1.0, old));
                }
            }
            SurfaceEvent::Wheel { x, y, delta_y, .. } => {
                if delta_y != 0.0 {
                    self.zoom_at(ZoomController::wheel_factor(delta_y), x, y);
                    self.update_hover(x, y, &mut emitted);
                }
            }
        }
        emitted
    }
}

/// Listener registration for a mounted chart.
///
/// Dropping the mount detaches every listener from the surface and discards
/// the chart's view transform. If the chart is borrowed at that moment, the
/// discard runs on the chart's next mutation instead.
pub struct ChartMount {
    chart: Weak<RefCell<ScatterChart>>,
    surface: Rc<EventSurface>,
    listeners: Vec<ListenerId>,
    pending_unmount: Option<Rc<Cell<bool>>>,
}

impl ChartMount {
    pub fn attach(chart: &Rc<RefCell<ScatterChart>>, surface: &Rc<EventSurface>) -> Self {
        let kinds = [
            ListenerKind::PointerDown,
            ListenerKind::PointerMove,
            ListenerKind::PointerUp,
            ListenerKind::PointerLeave,
            ListenerKind::Wheel,
        ];
        let listeners = kinds
            .into_iter()
            .map(|kind| {
                let weak = Rc::downgrade(chart);
                surface.add_listener(kind, move |event| route(&weak, event))
            })
            .collect();
        let pending_unmount = match chart.try_borrow_mut() {
            Ok(mut c) => {
                c.apply_pending_unmount();
                Some(c.pending_unmount.clone())
            }
            Err(_) => {
                warn!("chart busy during mount, deferred unmount unavailable");
                None
            }
        };
        info!("scatter chart mounted");
        Self {
            chart: Rc::downgrade(chart),
            surface: surface.clone(),
            listeners,
            pending_unmount,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Drop for ChartMount {
    fn drop(&mut self) {
        for id in self.listeners.drain(..) {
            self.surface.remove_listener(id);
        }
        if let Some(chart) = self.chart.upgrade() {
            match chart.try_borrow_mut() {
                Ok(mut c) => c.unmount(),
                Err(_) => match &self.pending_unmount {
                    Some(flag) => {
                        debug!("chart busy during unmount, deferring");
                        flag.set(true);
                    }
                    None => warn!("chart busy during unmount, view transform not discarded"),
                },
            }
        }
        info!("scatter chart unmounted");
    }
}

/// Runs an event through the chart, then calls handlers with the chart unborrowed.
fn route(chart: &Weak<RefCell<ScatterChart>>, event: &SurfaceEvent) {
    let Some(chart) = chart.upgrade() else {
        return;
    };
    let (emitted, handlers, data) = {
        let Ok(mut c) = chart.try_borrow_mut() else {
            warn!(?event, "re-entrant chart event dropped");
            return;
        };
        let emitted = c.handle_surface_event(event);
        (emitted, c.handlers.clone(), c.data.clone())
    };
    for pointer_event in &emitted {
        if let Some(record) = data.get(pointer_event.index) {
            EventBridge::forward(&handlers, pointer_event, record);
        }
    }
}
