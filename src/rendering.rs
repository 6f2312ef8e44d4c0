//! Scene construction: the pure `render(data, config, transform)` step.

use crate::axis_renderer::{AxisLayout, AxisRenderer};
use crate::data_types::{Orientation, Record, ScatterConfig};
use crate::error::Result;
use crate::plot_types::{Mark, ScatterPlot};
use crate::scales::BaseScales;
use crate::theme::ChartTheme;
use crate::view_controller::ViewTransform;

/// Plot-area rectangle inside the chart surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PlotArea {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && y >= self.y && x <= self.x + self.width && y <= self.y + self.height
    }

    /// Surface point to plot-area point.
    pub fn to_local(&self, x: f32, y: f32) -> (f32, f32) {
        (x - self.x, y - self.y)
    }
}

/// Everything needed to draw one frame of the chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub plot: PlotArea,
    pub x_axis: AxisLayout,
    pub y_axis: AxisLayout,
    pub marks: Vec<Mark>,
    pub theme: ChartTheme,
}

impl Scene {
    /// Topmost mark under a surface point.
    pub fn mark_at(&self, x: f32, y: f32) -> Option<&Mark> {
        // Marks panned past the plot edge are clipped and not interactive.
        if !self.plot.contains(x, y) {
            return None;
        }
        let (lx, ly) = self.plot.to_local(x, y);
        self.marks.iter().rev().find(|m| m.contains(lx, ly))
    }
}

pub fn plot_area(config: &ScatterConfig) -> PlotArea {
    let (width, height) = config.plot_size();
    PlotArea {
        x: config.margin.left,
        y: config.margin.top,
        width,
        height,
    }
}

/// Builds the scene from scratch: scales, then axes and marks.
pub fn render(data: &[Record], config: &ScatterConfig, transform: &ViewTransform) -> Result<Scene> {
    config.validate()?;
    let base = BaseScales::build(data, config)?;
    render_scaled(data, config, &base.rescaled(transform))
}

/// Lays out axes and marks with already (re)scaled axes.
pub fn render_scaled(data: &[Record], config: &ScatterConfig, scales: &BaseScales) -> Result<Scene> {
    let plot = plot_area(config);
    let plot_size = (plot.width, plot.height);

    let scatter = ScatterPlot {
        x_field: config.x_axis_value.clone(),
        y_field: config.y_axis_value.clone(),
        fill_key: config.fill_key.clone(),
        palette: config.fills.clone(),
        radius: config.mark_radius,
    };
    let marks = scatter.marks(data, scales)?;

    Ok(Scene {
        width: config.width,
        height: config.height,
        plot,
        x_axis: AxisRenderer::layout(
            &scales.x,
            Orientation::Horizontal,
            plot_size,
            &config.x_axis_label,
            config.time_zone,
        ),
        y_axis: AxisRenderer::layout(
            &scales.y,
            Orientation::Vertical,
            plot_size,
            &config.y_axis_label,
            config.time_zone,
        ),
        marks,
        theme: ChartTheme::from_config(config),
    })
}
