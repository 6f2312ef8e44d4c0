use crate::data_types::ScatterConfig;
use gpui::*;

/// Opacity applied to dashed gridlines.
pub const GRID_OPACITY: f32 = 0.3;

#[derive(Clone, Debug, PartialEq)]
pub struct ChartTheme {
    pub background: Hsla,
    pub grid_line: Hsla,
    /// Tick marks and tick text.
    pub tick: Hsla,
    /// Axis domain lines.
    pub axis_line: Hsla,
    /// Axis titles.
    pub accent: Hsla,
    pub axis_label_size: Pixels,
    pub title_size: Pixels,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::from_config(&ScatterConfig::default())
    }
}

impl ChartTheme {
    pub fn from_config(config: &ScatterConfig) -> Self {
        Self {
            background: gpui::white(),
            grid_line: config.tick_color.opacity(GRID_OPACITY),
            tick: config.tick_color,
            axis_line: config.border_color,
            accent: config.theme_color,
            axis_label_size: px(11.0),
            title_size: px(12.0),
        }
    }
}
