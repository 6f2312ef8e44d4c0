//! gpui_scatter: an interactive, zoomable scatter chart for GPUI.
//!
//! The chart core is headless: [`render`] turns records and a
//! [`ScatterConfig`] into a [`Scene`], and [`ScatterChart`] keeps that scene in
//! sync with pointer gestures. [`ScatterChartView`] paints it in a window and
//! [`Scene::to_svg`] exports it.

pub mod axis_renderer;
pub mod chart;
pub mod chart_view;
pub mod data_types;
pub mod error;
pub mod events;
pub mod plot_types;
pub mod rendering;
pub mod scales;
pub mod svg;
pub mod theme;
pub mod utils;
pub mod view_controller;

pub use chart::{ChartMount, ScatterChart};
pub use chart_view::{init, ScatterChartView};
pub use data_types::{AxisType, FieldValue, Palette, Record, ScaleType, ScatterConfig};
pub use error::{ChartError, Result};
pub use events::{ChartHandlers, EventBridge, EventSurface, PointerEvent, PointerEventKind, SurfaceEvent};
pub use plot_types::{Mark, ScatterPlot};
pub use rendering::{render, Scene};
pub use scales::{BaseScales, ChartScale};
pub use view_controller::{ViewTransform, ZoomController, ZoomState};
