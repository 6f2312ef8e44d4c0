pub mod actions;
pub mod input;
pub mod renderer;

use crate::chart::{ChartMount, ScatterChart};
use crate::data_types::{Record, ScatterConfig};
use crate::error::Result;
use crate::events::{ChartHandlers, EventSurface};
use gpui::prelude::*;
use gpui::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::warn;

pub use actions::{init, PanDown, PanLeft, PanRight, PanUp, ResetView, ZoomIn, ZoomOut};

use self::actions::ChartActionHandler;
use self::input::ChartInputHandler;
use self::renderer::SceneRenderer;

/// GPUI view hosting one scatter chart.
///
/// The view owns the chart's surface and mount; dropping the view detaches
/// every listener.
pub struct ScatterChartView {
    pub chart: Rc<RefCell<ScatterChart>>,
    surface: Rc<EventSurface>,
    mount: Option<ChartMount>,
    origin: Rc<Cell<Point<Pixels>>>,
    input: ChartInputHandler,
    actions: ChartActionHandler,
    focus_handle: FocusHandle,
}

impl Focusable for ScatterChartView {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl ScatterChartView {
    pub fn new(chart: ScatterChart, cx: &mut Context<Self>) -> Self {
        let chart = Rc::new(RefCell::new(chart));
        let surface = EventSurface::new();
        let mount = ChartMount::attach(&chart, &surface);
        let focus_handle = cx.focus_handle();
        let origin = Rc::new(Cell::new(Point::default()));

        let input = ChartInputHandler::new(surface.clone(), focus_handle.clone(), origin.clone());
        let actions = ChartActionHandler::new(chart.clone());

        Self {
            chart,
            surface,
            mount: Some(mount),
            origin,
            input,
            actions,
            focus_handle,
        }
    }

    pub fn build(data: Vec<Record>, config: ScatterConfig, cx: &mut Context<Self>) -> Result<Self> {
        Ok(Self::new(ScatterChart::new(data, config)?, cx))
    }

    pub fn surface(&self) -> &Rc<EventSurface> {
        &self.surface
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    /// Detaches from the surface; the chart keeps its data but loses its view transform.
    pub fn unmount(&mut self) {
        self.mount = None;
    }

    pub fn set_data(&mut self, data: Vec<Record>, cx: &mut Context<Self>) -> Result<()> {
        let changed = self.chart.borrow_mut().set_data(data)?;
        if changed {
            cx.notify();
        }
        Ok(())
    }

    pub fn set_config(&mut self, config: ScatterConfig, cx: &mut Context<Self>) -> Result<()> {
        let changed = self.chart.borrow_mut().set_config(config)?;
        if changed {
            cx.notify();
        }
        Ok(())
    }

    pub fn set_handlers(&mut self, handlers: ChartHandlers) {
        self.chart.borrow_mut().set_handlers(handlers);
    }
}

impl Render for ScatterChartView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let (width, height) = {
            let chart = self.chart.borrow();
            (chart.config().width, chart.config().height)
        };
        let chart = self.chart.clone();
        let origin = self.origin.clone();
        let input = self.input.clone();
        let actions = self.actions.clone();
        let entity_id = cx.entity_id();

        div()
            .id(("scatter-chart", entity_id))
            .track_focus(&self.focus_handle)
            .w(px(width))
            .h(px(height))
            .relative()
            .cursor(CursorStyle::Crosshair)
            .child(
                canvas(
                    move |_, _, _| {},
                    move |bounds, (), window, cx| {
                        origin.set(bounds.origin);
                        let Ok(chart) = chart.try_borrow() else {
                            warn!("chart busy during paint, frame skipped");
                            return;
                        };
                        SceneRenderer::paint(chart.scene(), bounds, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_down(MouseButton::Left, {
                let input = input.clone();
                move |e, w, c| input.handle_mouse_down(e, w, c)
            })
            .on_mouse_down(MouseButton::Right, {
                let input = input.clone();
                move |e, w, c| input.handle_mouse_down(e, w, c)
            })
            .on_mouse_move({
                let input = input.clone();
                move |e, w, c| input.handle_mouse_move(e, w, c)
            })
            .on_mouse_up(MouseButton::Left, {
                let input = input.clone();
                move |e, w, c| input.handle_mouse_up(e, w, c)
            })
            .on_mouse_up_out(MouseButton::Left, {
                let input = input.clone();
                move |e, w, c| input.handle_mouse_up(e, w, c)
            })
            .on_mouse_up(MouseButton::Right, {
                let input = input.clone();
                move |e, w, c| input.handle_mouse_up(e, w, c)
            })
            .on_mouse_up_out(MouseButton::Right, {
                let input = input.clone();
                move |e, w, c| input.handle_mouse_up(e, w, c)
            })
            .on_hover({
                let input = input.clone();
                move |h, w, c| input.handle_hover(h, w, c)
            })
            .on_scroll_wheel({
                let input = input.clone();
                move |e, w, c| input.handle_scroll_wheel(e, w, c)
            })
            .on_action({
                let actions = actions.clone();
                move |a, w, c| actions.handle_pan_left(a, w, c)
            })
            .on_action({
                let actions = actions.clone();
                move |a, w, c| actions.handle_pan_right(a, w, c)
            })
            .on_action({
                let actions = actions.clone();
                move |a, w, c| actions.handle_pan_up(a, w, c)
            })
            .on_action({
                let actions = actions.clone();
                move |a, w, c| actions.handle_pan_down(a, w, c)
            })
            .on_action({
                let actions = actions.clone();
                move |a, w, c| actions.handle_zoom_in(a, w, c)
            })
            .on_action({
                let actions = actions.clone();
                move |a, w, c| actions.handle_zoom_out(a, w, c)
            })
            .on_action({
                let actions = actions.clone();
                move |a, w, c| actions.handle_reset_view(a, w, c)
            })
    }
}
