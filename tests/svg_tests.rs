use gpui_scatter::data_types::{AxisType, Record, ScatterConfig};
use gpui_scatter::{render, ViewTransform};

fn scene(n: usize) -> gpui_scatter::Scene {
    let config = ScatterConfig::default()
        .with_size(640.0, 400.0)
        .with_x_axis("Time & date", AxisType::Temporal, "timestamp")
        .with_y_axis("Count", AxisType::Number, "count");
    let data: Vec<Record> = (0..n)
        .map(|i| {
            Record::new()
                .with("timestamp", 1_700_000_000_000.0 + i as f64 * 60_000.0)
                .with("count", (i % 7) as f64 + 1.0)
        })
        .collect();
    render(&data, &config, &ViewTransform::IDENTITY).unwrap()
}

#[test]
fn test_svg_root_size_and_circles() {
    let svg = scene(12).to_svg();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="640""#));
    assert!(svg.contains(r#"height="400""#));
    assert_eq!(svg.matches("<circle").count(), 12);
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_svg_gridlines_are_dashed() {
    let scene = scene(3);
    let svg = scene.to_svg();
    assert!(svg.contains(r#"stroke-dasharray="3,3""#));
    assert!(svg.contains(r#"stroke-opacity="0.3""#));
    let expected_lines = scene.x_axis.gridlines.len() + scene.y_axis.gridlines.len();
    let grid_lines: usize = svg
        .split(r#"<g class="grid""#)
        .skip(1)
        .map(|g| g.split("</g>").next().unwrap_or("").matches("<line").count())
        .sum();
    assert_eq!(grid_lines, expected_lines);
}

#[test]
fn test_svg_labels_are_escaped_and_y_rotated() {
    let svg = scene(1).to_svg();
    assert!(svg.contains("Time &amp; date"));
    assert!(svg.contains(r#"class="y-label" transform="rotate(-90)""#));
}

#[test]
fn test_svg_empty_dataset_draws_axes_only() {
    let svg = scene(0).to_svg();
    assert_eq!(svg.matches("<circle").count(), 0);
    assert!(svg.contains(r#"class="x-axis""#));
    assert!(svg.contains(r#"class="y-axis""#));
}
