use super::axis::{AxisConfig, AxisType, ScaleType};
use super::color::{css_color, parse_color, Palette};
use crate::error::{ChartError, Result};
use chrono_tz::Tz;
use eyre::WrapErr;
use gpui::Hsla;
use serde::{Deserialize, Serialize};

/// Space reserved around the plot area for axes and labels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 40.0,
            left: 50.0,
        }
    }
}

/// Component input: everything except the dataset and the event handlers.
///
/// Field names follow the page protocol's camelCase props, so a config can be
/// read straight from the backend's JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScatterConfig {
    pub width: f32,
    pub height: f32,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub x_axis_type: AxisType,
    pub y_axis_type: AxisType,
    pub x_axis_value: String,
    pub y_axis_value: String,
    pub fills: Palette,
    pub fill_key: String,
    pub scale_type: ScaleType,
    #[serde(with = "css_color")]
    pub tick_color: Hsla,
    #[serde(with = "css_color")]
    pub border_color: Hsla,
    #[serde(with = "css_color")]
    pub theme_color: Hsla,
    pub margin: Margin,
    pub mark_radius: f32,
    /// Zoom bounds `[min k, max k]`.
    pub scale_extent: (f64, f64),
    pub time_zone: Tz,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            x_axis_label: String::new(),
            y_axis_label: String::new(),
            x_axis_type: AxisType::Temporal,
            y_axis_type: AxisType::Number,
            x_axis_value: "timestamp".to_string(),
            y_axis_value: "count".to_string(),
            fills: Palette::default(),
            fill_key: "color".to_string(),
            scale_type: ScaleType::Linear,
            tick_color: gpui::black().opacity(0.6),
            border_color: gpui::black().opacity(0.8),
            theme_color: super::color::steelblue(),
            margin: Margin::default(),
            mark_radius: 5.0,
            scale_extent: (0.5, 10.0),
            time_zone: Tz::UTC,
        }
    }
}

impl ScatterConfig {
    pub fn from_json(json: &str) -> eyre::Result<Self> {
        let config: Self = serde_json::from_str(json).wrap_err("invalid scatter chart config")?;
        config.validate().wrap_err("invalid scatter chart config")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let inner_w = self.width - self.margin.left - self.margin.right;
        let inner_h = self.height - self.margin.top - self.margin.bottom;
        if !(self.width.is_finite() && self.height.is_finite()) || inner_w <= 0.0 || inner_h <= 0.0 {
            return Err(ChartError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let (min_k, max_k) = self.scale_extent;
        if !(min_k > 0.0 && min_k <= 1.0 && max_k >= 1.0 && max_k.is_finite()) {
            return Err(ChartError::InvalidScaleExtent { min: min_k, max: max_k });
        }
        Ok(())
    }

    pub fn x_axis(&self) -> AxisConfig {
        AxisConfig::new(&self.x_axis_label, self.x_axis_type, &self.x_axis_value)
    }

    pub fn y_axis(&self) -> AxisConfig {
        AxisConfig::new(&self.y_axis_label, self.y_axis_type, &self.y_axis_value)
    }

    /// Size of the plot area inside the margins.
    pub fn plot_size(&self) -> (f32, f32) {
        (
            (self.width - self.margin.left - self.margin.right).max(0.0),
            (self.height - self.margin.top - self.margin.bottom).max(0.0),
        )
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_x_axis(mut self, label: impl Into<String>, axis_type: AxisType, field: impl Into<String>) -> Self {
        self.x_axis_label = label.into();
        self.x_axis_type = axis_type;
        self.x_axis_value = field.into();
        self
    }

    pub fn with_y_axis(mut self, label: impl Into<String>, axis_type: AxisType, field: impl Into<String>) -> Self {
        self.y_axis_label = label.into();
        self.y_axis_type = axis_type;
        self.y_axis_value = field.into();
        self
    }

    pub fn with_scale_type(mut self, scale_type: ScaleType) -> Self {
        self.scale_type = scale_type;
        self
    }

    pub fn with_fills(mut self, fills: Palette, fill_key: impl Into<String>) -> Self {
        self.fills = fills;
        self.fill_key = fill_key.into();
        self
    }

    pub fn with_colors(mut self, tick: &str, border: &str, theme: &str) -> Result<Self> {
        self.tick_color = parse_color(tick)?;
        self.border_color = parse_color(border)?;
        self.theme_color = parse_color(theme)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_component_contract() {
        let config = ScatterConfig::default();
        assert_eq!((config.width, config.height), (800.0, 500.0));
        assert_eq!(config.x_axis_type, AxisType::Temporal);
        assert_eq!(config.y_axis_type, AxisType::Number);
        assert_eq!(config.x_axis_value, "timestamp");
        assert_eq!(config.y_axis_value, "count");
        assert_eq!(config.fill_key, "color");
        assert_eq!(config.fills.len(), 1);
        assert_eq!(config.scale_extent, (0.5, 10.0));
    }

    #[test]
    fn test_from_camel_case_json() {
        let json = r##"{
            "width": 640, "height": 320,
            "xAxisLabel": "Due", "yAxisType": "log", "yAxisValue": "amount",
            "fills": ["#ff0000", "green"], "fillKey": "status",
            "scaleType": "log", "tickColor": "#333", "timeZone": "Europe/Paris"
        }"##;
        let config = ScatterConfig::from_json(json).unwrap();
        assert_eq!(config.width, 640.0);
        assert_eq!(config.x_axis_label, "Due");
        assert_eq!(config.y_axis_type, AxisType::Log);
        assert_eq!(config.y_axis_value, "amount");
        assert_eq!(config.x_axis_value, "timestamp");
        assert_eq!(config.fills.len(), 2);
        assert_eq!(config.fill_key, "status");
        assert_eq!(config.scale_type, ScaleType::Log);
        assert_eq!(config.time_zone, chrono_tz::Europe::Paris);
    }

    #[test]
    fn test_rejects_bad_color_and_size() {
        assert!(ScatterConfig::from_json(r#"{"tickColor": "nope"}"#).is_err());
        assert!(ScatterConfig::from_json(r#"{"width": 10}"#).is_err());
        assert!(ScatterConfig::from_json(r#"{"scaleExtent": [2.0, 10.0]}"#).is_err());
    }
}
