use crate::axis_renderer::AxisRenderer;
use crate::plot_types::ScatterPlot;
use crate::rendering::Scene;
use crate::utils::offset;
use gpui::*;

/// Paints a [`Scene`] into canvas bounds.
pub struct SceneRenderer;

impl SceneRenderer {
    pub fn plot_bounds(scene: &Scene, bounds: Bounds<Pixels>) -> Bounds<Pixels> {
        Bounds::new(
            offset(bounds.origin, scene.plot.x, scene.plot.y),
            size(px(scene.plot.width), px(scene.plot.height)),
        )
    }

    pub fn paint(scene: &Scene, bounds: Bounds<Pixels>, window: &mut Window, cx: &mut App) {
        let theme = &scene.theme;
        window.paint_quad(fill(bounds, theme.background));

        let plot = Self::plot_bounds(scene, bounds);
        AxisRenderer::paint_gridlines(&scene.x_axis, plot, theme, window);
        AxisRenderer::paint_gridlines(&scene.y_axis, plot, theme, window);

        window.with_content_mask(Some(ContentMask { bounds: plot }), |window| {
            ScatterPlot::paint(&scene.marks, plot, window);
        });

        AxisRenderer::paint_axis(&scene.x_axis, plot, theme, window, cx);
        AxisRenderer::paint_axis(&scene.y_axis, plot, theme, window, cx);
    }
}
