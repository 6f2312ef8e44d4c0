use crate::data_types::{darker, Palette, Record};
use crate::error::Result;
use crate::scales::{axis_value, BaseScales};
use crate::utils::PixelsExt;
use gpui::*;

/// One drawn point. Coordinates are relative to the plot-area origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Index of the source record in the dataset.
    pub index: usize,
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub fill: Hsla,
    pub stroke: Hsla,
}

impl Mark {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let dx = x - self.cx;
        let dy = y - self.cy;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// Field selection and styling for the scatter marks.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterPlot {
    pub x_field: String,
    pub y_field: String,
    pub fill_key: String,
    pub palette: Palette,
    pub radius: f32,
}

impl ScatterPlot {
    /// One mark per record that has both axis fields.
    pub fn marks(&self, records: &[Record], scales: &BaseScales) -> Result<Vec<Mark>> {
        let x_kind = scales.x.kind();
        let y_kind = scales.y.kind();
        let mut marks = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let x = axis_value(record, &self.x_field, x_kind, index)?;
            let y = axis_value(record, &self.y_field, y_kind, index)?;
            let (Some(x), Some(y)) = (x, y) else {
                continue;
            };
            let fill = self
                .palette
                .resolve(record.get(&self.fill_key).and_then(|v| v.as_bucket()));
            marks.push(Mark {
                index,
                cx: scales.x.map(x),
                cy: scales.y.map(y),
                radius: self.radius,
                fill,
                stroke: darker(fill),
            });
        }
        Ok(marks)
    }

    /// Paints marks as filled circles with a 1px stroke, skipping those outside the plot.
    pub fn paint(marks: &[Mark], plot: Bounds<Pixels>, window: &mut Window) {
        let width = plot.size.width.as_f32();
        let height = plot.size.height.as_f32();
        for mark in marks {
            let r = mark.radius;
            if mark.cx < -r || mark.cy < -r || mark.cx > width + r || mark.cy > height + r {
                continue;
            }
            let bounds = Bounds::new(
                plot.origin + point(px(mark.cx - r), px(mark.cy - r)),
                size(px(r * 2.0), px(r * 2.0)),
            );
            window.paint_quad(
                fill(bounds, mark.fill)
                    .corner_radii(Corners::all(px(r)))
                    .border_widths(Edges::all(px(1.0)))
                    .border_color(mark.stroke),
            );
        }
    }
}
