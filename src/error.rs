//! Error types for chart construction and updates.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChartError>;

/// Contract violations surfaced by the scatter chart.
///
/// Degenerate data (empty sets, missing fields, flat domains) is not an error;
/// those cases fall back to documented defaults instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// A record carries a value the axis type cannot place.
    #[error("axis `{field}` is {axis_type} but record {index} holds a {found} value")]
    AxisTypeMismatch {
        field: String,
        axis_type: &'static str,
        found: &'static str,
        index: usize,
    },

    #[error("invalid chart dimensions: {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Zoom bounds must satisfy `0 < min <= 1 <= max`.
    #[error("invalid scale extent [{min}, {max}]")]
    InvalidScaleExtent { min: f64, max: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_display() {
        let err = ChartError::AxisTypeMismatch {
            field: "timestamp".into(),
            axis_type: "number",
            found: "category",
            index: 3,
        };
        let text = err.to_string();
        assert!(text.contains("timestamp"));
        assert!(text.contains("record 3"));
    }
}
