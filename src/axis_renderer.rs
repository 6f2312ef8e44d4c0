use crate::data_types::Orientation;
use crate::scales::ChartScale;
use crate::theme::ChartTheme;
use crate::utils::PixelsExt;
use chrono_tz::Tz;
use gpui::*;

/// Pixels of axis length per tick on the X axis.
pub const X_TICK_SPACING: f32 = 100.0;
/// Pixels of axis length per tick on the Y axis.
pub const Y_TICK_SPACING: f32 = 50.0;
pub const TICK_SIZE: f32 = 6.0;
/// Dash and gap length of gridlines.
pub const GRID_DASH: f32 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    /// Offset along the axis, in plot-area pixels.
    pub position: f32,
    pub text: String,
}

/// A gridline segment in plot-area coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    pub from: (f32, f32),
    pub to: (f32, f32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisLayout {
    pub orientation: Orientation,
    pub ticks: Vec<AxisTick>,
    pub gridlines: Vec<GridLine>,
    pub label: String,
}

pub struct AxisRenderer;

impl AxisRenderer {
    pub fn tick_hint(orientation: Orientation, axis_len: f32) -> usize {
        let spacing = match orientation {
            Orientation::Horizontal => X_TICK_SPACING,
            Orientation::Vertical => Y_TICK_SPACING,
        };
        ((axis_len / spacing).floor() as usize).max(2)
    }

    /// Ticks, one gridline per tick across the opposite axis, and the title.
    pub fn layout(
        scale: &ChartScale,
        orientation: Orientation,
        plot_size: (f32, f32),
        label: &str,
        tz: Tz,
    ) -> AxisLayout {
        let (plot_w, plot_h) = plot_size;
        let axis_len = match orientation {
            Orientation::Horizontal => plot_w,
            Orientation::Vertical => plot_h,
        };
        let (r0, r1) = scale.range();
        let (lo, hi) = (r0.min(r1) - 0.5, r0.max(r1) + 0.5);

        let ticks: Vec<AxisTick> = scale
            .ticks(Self::tick_hint(orientation, axis_len), tz)
            .into_iter()
            .map(|value| AxisTick {
                value,
                position: scale.map(value),
                text: scale.format_tick(value, tz),
            })
            .filter(|t| t.position >= lo && t.position <= hi)
            .collect();

        let gridlines = ticks
            .iter()
            .map(|t| match orientation {
                Orientation::Horizontal => GridLine {
                    from: (t.position, 0.0),
                    to: (t.position, plot_h),
                },
                Orientation::Vertical => GridLine {
                    from: (0.0, t.position),
                    to: (plot_w, t.position),
                },
            })
            .collect();

        AxisLayout {
            orientation,
            ticks,
            gridlines,
            label: label.to_string(),
        }
    }

    /// Dashed gridlines; drawn under the marks.
    pub fn paint_gridlines(layout: &AxisLayout, plot: Bounds<Pixels>, theme: &ChartTheme, window: &mut Window) {
        let mut builder = PathBuilder::stroke(px(1.0));
        let mut has_segments = false;
        for line in &layout.gridlines {
            let (x0, y0) = line.from;
            let (x1, y1) = line.to;
            let len = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
            if len <= 0.0 {
                continue;
            }
            let (ux, uy) = ((x1 - x0) / len, (y1 - y0) / len);
            let mut d = 0.0;
            while d < len {
                let end = (d + GRID_DASH).min(len);
                builder.move_to(plot.origin + point(px(x0 + ux * d), px(y0 + uy * d)));
                builder.line_to(plot.origin + point(px(x0 + ux * end), px(y0 + uy * end)));
                d += GRID_DASH * 2.0;
                has_segments = true;
            }
        }
        if has_segments {
            if let Ok(path) = builder.build() {
                window.paint_path(path, theme.grid_line);
            }
        }
    }

    /// Domain line, tick marks, tick labels and title.
    pub fn paint_axis(
        layout: &AxisLayout,
        plot: Bounds<Pixels>,
        theme: &ChartTheme,
        window: &mut Window,
        cx: &mut App,
    ) {
        let is_vertical = layout.orientation == Orientation::Vertical;
        let plot_w = plot.size.width.as_f32();
        let plot_h = plot.size.height.as_f32();

        let mut line_builder = PathBuilder::stroke(px(1.0));
        if is_vertical {
            line_builder.move_to(plot.origin);
            line_builder.line_to(plot.origin + point(px(0.0), px(plot_h)));
        } else {
            line_builder.move_to(plot.origin + point(px(0.0), px(plot_h)));
            line_builder.line_to(plot.origin + point(px(plot_w), px(plot_h)));
        }
        if let Ok(path) = line_builder.build() {
            window.paint_path(path, theme.axis_line);
        }

        let mut tick_builder = PathBuilder::stroke(px(1.0));
        for tick in &layout.ticks {
            if is_vertical {
                tick_builder.move_to(plot.origin + point(px(-TICK_SIZE), px(tick.position)));
                tick_builder.line_to(plot.origin + point(px(0.0), px(tick.position)));
            } else {
                tick_builder.move_to(plot.origin + point(px(tick.position), px(plot_h)));
                tick_builder.line_to(plot.origin + point(px(tick.position), px(plot_h + TICK_SIZE)));
            }
        }
        if !layout.ticks.is_empty() {
            if let Ok(path) = tick_builder.build() {
                window.paint_path(path, theme.tick);
            }
        }

        let font_size = theme.axis_label_size;
        let font = TextStyle::default().font();

        for tick in &layout.ticks {
            let run = TextRun {
                len: tick.text.len(),
                font: font.clone(),
                color: theme.tick,
                background_color: None,
                underline: None,
                strikethrough: None,
            };

            if let Ok(lines) = window.text_system().shape_text(
                tick.text.clone().into(),
                font_size,
                &[run],
                None,
                None,
            ) {
                for line in lines {
                    let line_width = line.width();
                    let origin = if is_vertical {
                        plot.origin
                            + point(
                                px(-TICK_SIZE - 3.0) - line_width,
                                px(tick.position) - font_size / 2.0,
                            )
                    } else {
                        plot.origin
                            + point(
                                px(tick.position) - line_width / 2.0,
                                px(plot_h + TICK_SIZE + 2.0),
                            )
                    };
                    let _ = line.paint(origin, font_size, TextAlign::Left, None, window, cx);
                }
            }
        }

        if !layout.label.is_empty() {
            let title_size = theme.title_size;
            let title_run = TextRun {
                len: layout.label.len(),
                font: font.clone(),
                color: theme.accent,
                background_color: None,
                underline: None,
                strikethrough: None,
            };
            if let Ok(lines) = window.text_system().shape_text(
                layout.label.clone().into(),
                title_size,
                &[title_run],
                None,
                None,
            ) {
                for line in lines {
                    let line_width = line.width();
                    // Y title sits above the axis; GPUI text does not rotate.
                    let origin = if is_vertical {
                        plot.origin + point(px(4.0), px(-4.0) - title_size)
                    } else {
                        plot.origin
                            + point(
                                px(plot_w / 2.0) - line_width / 2.0,
                                px(plot_h + TICK_SIZE + 4.0) + font_size,
                            )
                    };
                    let _ = line.paint(origin, title_size, TextAlign::Left, None, window, cx);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::prelude::v1::test;

    #[test]
    fn test_tick_hint_density() {
        assert_eq!(AxisRenderer::tick_hint(Orientation::Horizontal, 730.0), 7);
        assert_eq!(AxisRenderer::tick_hint(Orientation::Vertical, 440.0), 8);
        assert_eq!(AxisRenderer::tick_hint(Orientation::Horizontal, 50.0), 2);
    }

    #[test]
    fn test_gridline_per_tick_spans_opposite_axis() {
        let scale = ChartScale::new_linear((0.0, 100.0), (0.0, 500.0));
        let layout = AxisRenderer::layout(&scale, Orientation::Horizontal, (500.0, 300.0), "X", Tz::UTC);
        assert!(!layout.ticks.is_empty());
        assert_eq!(layout.gridlines.len(), layout.ticks.len());
        for (tick, line) in layout.ticks.iter().zip(&layout.gridlines) {
            assert_eq!(line.from, (tick.position, 0.0));
            assert_eq!(line.to, (tick.position, 300.0));
        }
        assert_eq!(layout.label, "X");
    }

    #[test]
    fn test_vertical_gridlines_are_horizontal() {
        let scale = ChartScale::new_linear((0.0, 10.0), (200.0, 0.0));
        let layout = AxisRenderer::layout(&scale, Orientation::Vertical, (400.0, 200.0), "", Tz::UTC);
        assert!(layout.gridlines.iter().all(|g| g.from.1 == g.to.1 && g.to.0 == 400.0));
    }
}
