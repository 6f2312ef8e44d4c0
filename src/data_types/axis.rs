use serde::{Deserialize, Serialize};

/// Value type declared for an axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    #[default]
    Temporal,
    Number,
    Log,
}

impl AxisType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Temporal => "temporal",
            Self::Number => "number",
            Self::Log => "log",
        }
    }
}

/// Scale choice for non-temporal axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    #[default]
    Linear,
    Log,
}

/// Scale actually built for an axis once axis type and scale type are combined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScaleKind {
    Time,
    Linear,
    Log,
}

impl ScaleKind {
    pub fn resolve(axis_type: AxisType, scale_type: ScaleType) -> Self {
        match (axis_type, scale_type) {
            (AxisType::Temporal, _) => Self::Time,
            (AxisType::Log, _) | (AxisType::Number, ScaleType::Log) => Self::Log,
            (AxisType::Number, ScaleType::Linear) => Self::Linear,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Label, value type and record field for one axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub label: String,
    pub axis_type: AxisType,
    pub value_field: String,
}

impl AxisConfig {
    pub fn new(label: impl Into<String>, axis_type: AxisType, value_field: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            axis_type,
            value_field: value_field.into(),
        }
    }
}
