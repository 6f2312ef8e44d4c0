//! Scale functions and the scale builder.
//!
//! A [`ChartScale`] maps a fixed domain onto a pixel range. Scales are built
//! once per dataset/config change by [`BaseScales::build`]; zooming derives
//! rescaled copies through [`ChartScale::rescale`] and never touches the base.

use crate::data_types::{AxisConfig, FieldValue, Record, ScaleKind, ScaleType, ScatterConfig};
use crate::error::{ChartError, Result};
use crate::utils::date_formatter::{determine_date_format, format_timestamp, time_ticks};
use crate::view_controller::ViewTransform;
use chrono_tz::Tz;
use d3rs::scale::{LinearScale, Scale as D3Scale};
use tracing::{debug, trace, warn};

/// Lower padding multiplier for linear-numeric domains.
pub const LINEAR_PAD_LOW: f64 = 0.9;
/// Upper padding multiplier for linear-numeric and logarithmic domains.
pub const PAD_HIGH: f64 = 1.1;
/// Smallest domain floor allowed on a logarithmic axis.
pub const LOG_FLOOR: f64 = 1.0;

#[derive(Clone)]
pub enum ChartScale {
    Linear(LinearScale),
    /// Linear mapping over `log10(value)`.
    ///
    /// d3rs `LogScale::scale` clamps its input to the domain, which would pin
    /// panned or zoomed marks to the axis edges instead of moving them out of
    /// the plot.
    Log(LinearScale),
    /// Linear mapping over epoch milliseconds.
    Time(LinearScale),
}

fn widen_flat(domain: (f64, f64)) -> (f64, f64) {
    let mut d_min = domain.0;
    let mut d_max = domain.1;
    if (d_max - d_min).abs() < f64::EPSILON {
        d_min -= 0.5;
        d_max += 0.5;
    }
    (d_min, d_max)
}

fn linear(domain: (f64, f64), range: (f32, f32)) -> LinearScale {
    LinearScale::new()
        .domain(domain.0, domain.1)
        .range(range.0 as f64, range.1 as f64)
}

impl ChartScale {
    pub fn new_linear(domain: (f64, f64), range: (f32, f32)) -> Self {
        Self::Linear(linear(widen_flat(domain), range))
    }

    pub fn new_time(domain: (f64, f64), range: (f32, f32)) -> Self {
        Self::Time(linear(widen_flat(domain), range))
    }

    pub fn new_log(domain: (f64, f64), range: (f32, f32)) -> Self {
        let lo = domain.0.max(f64::MIN_POSITIVE);
        let mut hi = domain.1.max(lo);
        if (hi - lo).abs() < f64::EPSILON {
            hi = lo * 10.0;
        }
        Self::Log(linear((lo.log10(), hi.log10()), range))
    }

    pub fn with_kind(kind: ScaleKind, domain: (f64, f64), range: (f32, f32)) -> Self {
        match kind {
            ScaleKind::Linear => Self::new_linear(domain, range),
            ScaleKind::Log => Self::new_log(domain, range),
            ScaleKind::Time => Self::new_time(domain, range),
        }
    }

    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Linear(_) => ScaleKind::Linear,
            Self::Log(_) => ScaleKind::Log,
            Self::Time(_) => ScaleKind::Time,
        }
    }

    fn inner(&self) -> &LinearScale {
        match self {
            Self::Linear(s) | Self::Log(s) | Self::Time(s) => s,
        }
    }

    fn map_f64(&self, value: f64) -> f64 {
        match self {
            Self::Log(s) => s.scale(value.max(f64::MIN_POSITIVE).log10()),
            Self::Linear(s) | Self::Time(s) => s.scale(value),
        }
    }

    fn invert_f64(&self, pixel: f64) -> f64 {
        match self {
            Self::Log(s) => 10f64.powf(s.invert(pixel).unwrap_or(0.0)),
            Self::Linear(s) | Self::Time(s) => s.invert(pixel).unwrap_or(0.0),
        }
    }

    pub fn map(&self, value: f64) -> f32 {
        let res = self.map_f64(value) as f32;
        if res.is_nan() || res.is_infinite() {
            0.0
        } else {
            res
        }
    }

    pub fn invert(&self, pixel: f32) -> f64 {
        self.invert_f64(pixel as f64)
    }

    pub fn range(&self) -> (f32, f32) {
        let r = self.inner().range();
        (r.0 as f32, r.1 as f32)
    }

    pub fn domain(&self) -> (f64, f64) {
        let d = self.inner().domain();
        match self {
            Self::Log(_) => (10f64.powf(d.0), 10f64.powf(d.1)),
            Self::Linear(_) | Self::Time(_) => (d.0, d.1),
        }
    }

    /// Tick values for roughly `count` ticks. Temporal ticks land on
    /// calendar boundaries in `tz`.
    pub fn ticks(&self, count: usize, tz: Tz) -> Vec<f64> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Time(_) => time_ticks(self.domain(), count, tz),
            Self::Log(_) => log_ticks(self.domain(), count),
        }
    }

    pub fn format_tick(&self, value: f64, tz: Tz) -> String {
        if let Self::Time(_) = self {
            let (d_min, d_max) = self.domain();
            let span_sec = (d_max - d_min).abs() / 1000.0;
            let fmt = determine_date_format(span_sec);
            return format_timestamp(value, fmt, tz);
        }

        if value.abs() < 0.001 && value.abs() > 0.0 {
            format!("{:.4}", value)
        } else if value.abs() >= 1000.0 || value.fract() == 0.0 {
            format!("{:.0}", value)
        } else {
            format!("{:.2}", value)
        }
    }

    /// The same scale kind and range over a different domain.
    pub fn with_domain(&self, domain: (f64, f64)) -> Self {
        Self::with_kind(self.kind(), domain, self.range())
    }

    /// Composes a zoom transform with this (base) scale, like d3's
    /// `transform.rescaleX(x)`: the visible domain is whatever base-domain
    /// values now land on the range ends.
    pub fn rescale(&self, transform: &ViewTransform, vertical: bool) -> Self {
        if transform.is_identity() {
            return self.clone();
        }
        let (r0, r1) = self.range();
        let unzoom = |p: f32| {
            if vertical {
                transform.invert_y(p as f64)
            } else {
                transform.invert_x(p as f64)
            }
        };
        let d0 = self.invert_f64(unzoom(r0));
        let d1 = self.invert_f64(unzoom(r1));
        self.with_domain((d0, d1))
    }
}

/// Decade ticks (1, 10, 100, ...), with 2x and 5x subdivisions when few decades are visible.
fn log_ticks(domain: (f64, f64), count: usize) -> Vec<f64> {
    let (lo, hi) = if domain.0 <= domain.1 { domain } else { (domain.1, domain.0) };
    if lo <= 0.0 || !hi.is_finite() {
        return vec![];
    }
    let first = lo.log10().floor() as i32;
    let last = hi.log10().ceil() as i32;
    let decades = (last - first).max(1) as usize;
    let multipliers: &[f64] = if decades * 3 <= count.max(1) {
        &[1.0, 2.0, 5.0]
    } else {
        &[1.0]
    };
    let stride = (decades / count.max(1)).max(1);

    let mut ticks = Vec::new();
    for e in (first..=last).step_by(stride) {
        let base = 10f64.powi(e);
        for m in multipliers {
            let t = base * m;
            if t >= lo * (1.0 - 1e-9) && t <= hi * (1.0 + 1e-9) {
                ticks.push(t);
            }
        }
    }
    ticks
}

/// Reads a record's position on an axis of the given kind.
///
/// `Ok(None)` means the field is absent; a value of the wrong type is a
/// contract violation.
pub fn axis_value(record: &Record, field: &str, kind: ScaleKind, index: usize) -> Result<Option<f64>> {
    let Some(value) = record.get(field) else {
        return Ok(None);
    };
    let position = match (kind, value) {
        (ScaleKind::Time, v) => v.as_timestamp_ms(),
        (ScaleKind::Linear | ScaleKind::Log, FieldValue::Number(n)) => Some(*n),
        _ => None,
    };
    match position {
        Some(p) if p.is_finite() => Ok(Some(p)),
        Some(_) => Ok(None),
        None => Err(ChartError::AxisTypeMismatch {
            field: field.to_string(),
            axis_type: match kind {
                ScaleKind::Time => "temporal",
                ScaleKind::Linear => "number",
                ScaleKind::Log => "log",
            },
            found: value.kind(),
            index,
        }),
    }
}

/// Observed `(min, max)` of a field, skipping records where it is absent.
pub fn scan_domain(records: &[Record], field: &str, kind: ScaleKind) -> Result<Option<(f64, f64)>> {
    let mut extent: Option<(f64, f64)> = None;
    for (i, record) in records.iter().enumerate() {
        if let Some(v) = axis_value(record, field, kind, i)? {
            extent = Some(match extent {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
    }
    Ok(extent)
}

/// Applies the per-kind padding rule to an observed extent.
pub fn padded_domain(kind: ScaleKind, observed: Option<(f64, f64)>) -> (f64, f64) {
    let Some((min, max)) = observed else {
        debug!("no values on axis, using placeholder domain");
        return match kind {
            ScaleKind::Log => (LOG_FLOOR, LOG_FLOOR * 10.0),
            ScaleKind::Linear | ScaleKind::Time => (0.0, 1.0),
        };
    };
    match kind {
        ScaleKind::Time => (min, max),
        ScaleKind::Linear => (min * LINEAR_PAD_LOW, max * PAD_HIGH),
        ScaleKind::Log => {
            let floor = min.max(LOG_FLOOR);
            let mut ceil = max * PAD_HIGH;
            if ceil <= floor {
                warn!(floor, ceil, "log axis has no values above its floor, showing one decade");
                ceil = floor * 10.0;
            }
            (floor, ceil)
        }
    }
}

/// Builds the base scale for one axis from the dataset.
pub fn build_axis_scale(
    records: &[Record],
    axis: &AxisConfig,
    scale_type: ScaleType,
    range: (f32, f32),
) -> Result<ChartScale> {
    let kind = ScaleKind::resolve(axis.axis_type, scale_type);
    let observed = scan_domain(records, &axis.value_field, kind)?;
    let domain = padded_domain(kind, observed);
    if (domain.1 - domain.0).abs() < f64::EPSILON {
        debug!(field = %axis.value_field, value = domain.0, "flat domain, widening");
    }
    trace!(field = %axis.value_field, ?kind, ?domain, "built axis scale");
    Ok(ChartScale::with_kind(kind, domain, range))
}

/// Domain-fixed scales for both axes, in plot-area pixel coordinates.
#[derive(Clone)]
pub struct BaseScales {
    pub x: ChartScale,
    pub y: ChartScale,
}

impl BaseScales {
    pub fn build(records: &[Record], config: &ScatterConfig) -> Result<Self> {
        let (plot_w, plot_h) = config.plot_size();
        let x = build_axis_scale(records, &config.x_axis(), config.scale_type, (0.0, plot_w))?;
        let y = build_axis_scale(records, &config.y_axis(), config.scale_type, (plot_h, 0.0))?;
        debug!(x_domain = ?x.domain(), y_domain = ?y.domain(), "rebuilt base scales");
        Ok(Self { x, y })
    }

    pub fn rescaled(&self, transform: &ViewTransform) -> Self {
        Self {
            x: self.x.rescale(transform, false),
            y: self.y.rescale(transform, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::AxisType;

    fn rec(x: f64, y: f64) -> Record {
        Record::new().with("x", x).with("y", y)
    }

    #[test]
    fn test_linear_padding_is_multiplicative() {
        let data = vec![rec(10.0, 5.0), rec(40.0, 1.0)];
        let axis = AxisConfig::new("", AxisType::Number, "x");
        let scale = build_axis_scale(&data, &axis, ScaleType::Linear, (0.0, 100.0)).unwrap();
        let (lo, hi) = scale.domain();
        assert!((lo - 9.0).abs() < 1e-9);
        assert!((hi - 44.0).abs() < 1e-9);
    }

    #[test]
    fn test_log_floor_and_decade_fallback() {
        assert_eq!(padded_domain(ScaleKind::Log, Some((0.2, 50.0))).0, 1.0);
        assert_eq!(padded_domain(ScaleKind::Log, Some((0.1, 0.5))), (1.0, 10.0));
        let (lo, hi) = padded_domain(ScaleKind::Log, Some((5.0, 100.0)));
        assert_eq!(lo, 5.0);
        assert!((hi - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_log_scale_maps_decades_evenly() {
        let scale = ChartScale::new_log((1.0, 100.0), (0.0, 200.0));
        assert!((scale.map(1.0) - 0.0).abs() < 1e-3);
        assert!((scale.map(10.0) - 100.0).abs() < 1e-3);
        assert!((scale.map(100.0) - 200.0).abs() < 1e-3);
        assert!((scale.invert(100.0) - 10.0).abs() < 1e-6);
        let (lo, hi) = scale.domain();
        assert!((lo - 1.0).abs() < 1e-9 && (hi - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_log_ticks_stay_in_domain() {
        let ticks = log_ticks((1.0, 1000.0), 10);
        assert_eq!(ticks.first().copied(), Some(1.0));
        assert!(ticks.contains(&100.0));
        assert!(ticks.iter().all(|t| *t >= 1.0 && *t <= 1000.0 + 1e-6));
    }

    #[test]
    fn test_time_axis_accepts_epoch_numbers() {
        let data = vec![Record::new().with("t", 1_000.0), Record::new().with("t", 5_000.0)];
        let domain = scan_domain(&data, "t", ScaleKind::Time).unwrap();
        assert_eq!(domain, Some((1_000.0, 5_000.0)));
    }

    #[test]
    fn test_category_on_number_axis_is_rejected() {
        let data = vec![rec(1.0, 1.0), Record::new().with("x", "late")];
        let err = scan_domain(&data, "x", ScaleKind::Linear).unwrap_err();
        assert!(matches!(err, ChartError::AxisTypeMismatch { index: 1, .. }));
    }

    #[test]
    fn test_rescale_uses_base_domain() {
        let base = ChartScale::new_linear((0.0, 100.0), (0.0, 100.0));
        let zoomed = base.rescale(&ViewTransform { k: 2.0, x: 0.0, y: 0.0 }, false);
        let (lo, hi) = zoomed.domain();
        assert!((lo - 0.0).abs() < 1e-9);
        assert!((hi - 50.0).abs() < 1e-9);
        assert_eq!(zoomed.range(), base.range());
    }

    #[test]
    fn test_panned_log_scale_does_not_clamp() {
        let base = ChartScale::new_log((1.0, 100.0), (0.0, 200.0));
        let panned = base.rescale(&ViewTransform { k: 1.0, x: 50.0, y: 0.0 }, false);
        assert!((panned.map(1.0) - 50.0).abs() < 1e-3);
        // The top decade is pushed past the range end instead of sticking to it.
        assert!((panned.map(100.0) - 250.0).abs() < 1e-3);
    }
}
