//! Standalone SVG export of a [`Scene`].

use crate::axis_renderer::{AxisLayout, TICK_SIZE};
use crate::data_types::{to_hex, Orientation};
use crate::rendering::Scene;
use crate::theme::GRID_OPACITY;
use eyre::WrapErr;
use std::fmt::{self, Write};
use std::path::Path;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn write_gridlines(out: &mut impl Write, axis: &AxisLayout, color: &str) -> fmt::Result {
    writeln!(
        out,
        r#"<g class="grid" stroke="{color}" stroke-opacity="{GRID_OPACITY}" stroke-dasharray="3,3">"#
    )?;
    for line in &axis.gridlines {
        writeln!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
            line.from.0, line.from.1, line.to.0, line.to.1
        )?;
    }
    writeln!(out, "</g>")
}

fn write_axis(out: &mut impl Write, scene: &Scene, axis: &AxisLayout) -> fmt::Result {
    let theme = &scene.theme;
    let (w, h) = (scene.plot.width, scene.plot.height);
    let tick = to_hex(theme.tick);
    let border = to_hex(theme.axis_line);
    let font = f32::from(theme.axis_label_size);

    match axis.orientation {
        Orientation::Horizontal => {
            writeln!(out, r#"<g class="x-axis" transform="translate(0,{h})">"#)?;
            writeln!(out, r#"<line x1="0" y1="0" x2="{w}" y2="0" stroke="{border}"/>"#)?;
            for t in &axis.ticks {
                writeln!(
                    out,
                    r#"<line x1="{p}" y1="0" x2="{p}" y2="{TICK_SIZE}" stroke="{tick}"/><text x="{p}" y="{}" fill="{tick}" font-size="{font}" text-anchor="middle" dy="0.71em">{}</text>"#,
                    TICK_SIZE + 3.0,
                    escape(&t.text),
                    p = t.position,
                )?;
            }
        }
        Orientation::Vertical => {
            writeln!(out, r#"<g class="y-axis">"#)?;
            writeln!(out, r#"<line x1="0" y1="0" x2="0" y2="{h}" stroke="{border}"/>"#)?;
            for t in &axis.ticks {
                writeln!(
                    out,
                    r#"<line x1="-{TICK_SIZE}" y1="{p}" x2="0" y2="{p}" stroke="{tick}"/><text x="-{}" y="{p}" fill="{tick}" font-size="{font}" text-anchor="end" dy="0.32em">{}</text>"#,
                    TICK_SIZE + 3.0,
                    escape(&t.text),
                    p = t.position,
                )?;
            }
        }
    }
    writeln!(out, "</g>")?;

    if !axis.label.is_empty() {
        let accent = to_hex(theme.accent);
        let size = f32::from(theme.title_size);
        match axis.orientation {
            Orientation::Horizontal => writeln!(
                out,
                r#"<text class="x-label" x="{}" y="{}" fill="{accent}" font-size="{size}" text-anchor="middle">{}</text>"#,
                w / 2.0,
                scene.height - scene.plot.y - 6.0,
                escape(&axis.label)
            )?,
            Orientation::Vertical => writeln!(
                out,
                r#"<text class="y-label" transform="rotate(-90)" x="{}" y="{}" fill="{accent}" font-size="{size}" text-anchor="middle" dy="1em">{}</text>"#,
                -h / 2.0,
                -scene.plot.x,
                escape(&axis.label)
            )?,
        }
    }
    Ok(())
}

/// Writes the scene as an `<svg>` document sized to the chart.
pub fn write_svg(scene: &Scene, out: &mut impl Write) -> fmt::Result {
    let (width, height) = (scene.width, scene.height);
    let plot = scene.plot;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;
    writeln!(
        out,
        r#"<defs><clipPath id="plot-clip"><rect x="0" y="0" width="{}" height="{}"/></clipPath></defs>"#,
        plot.width, plot.height
    )?;
    writeln!(
        out,
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        to_hex(scene.theme.background)
    )?;
    writeln!(out, r#"<g transform="translate({},{})">"#, plot.x, plot.y)?;

    let grid = to_hex(scene.theme.tick);
    write_gridlines(out, &scene.x_axis, &grid)?;
    write_gridlines(out, &scene.y_axis, &grid)?;

    writeln!(out, r#"<g class="marks" clip-path="url(#plot-clip)">"#)?;
    for mark in &scene.marks {
        writeln!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" stroke="{}"/>"#,
            mark.cx,
            mark.cy,
            mark.radius,
            to_hex(mark.fill),
            to_hex(mark.stroke)
        )?;
    }
    writeln!(out, "</g>")?;

    write_axis(out, scene, &scene.x_axis)?;
    write_axis(out, scene, &scene.y_axis)?;

    writeln!(out, "</g>")?;
    writeln!(out, "</svg>")
}

impl Scene {
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_svg(self, &mut out);
        out
    }

    pub fn save_svg(&self, path: impl AsRef<Path>) -> eyre::Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_svg())
            .wrap_err_with(|| format!("failed to write chart SVG to {}", path.display()))
    }
}
