use chrono::{Datelike, Days, NaiveDate, Offset, TimeZone};
use chrono_tz::Tz;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartDateFormat {
    Year,       // 2024
    MonthYear,  // Jan 2024
    DayMonth,   // 12 Jan
    HourMin,    // 10:30
    HourMinSec, // 10:30:15
}

/// Determines the best date format based on the visible time range (in seconds).
pub fn determine_date_format(visible_range_sec: f64) -> SmartDateFormat {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 3600.0;
    const DAY: f64 = 24.0 * HOUR;
    const MONTH: f64 = 30.0 * DAY;
    const YEAR: f64 = 365.0 * DAY;

    if visible_range_sec > YEAR * 2.0 {
        SmartDateFormat::Year
    } else if visible_range_sec > MONTH * 2.0 {
        SmartDateFormat::MonthYear
    } else if visible_range_sec > DAY * 1.5 {
        SmartDateFormat::DayMonth
    } else if visible_range_sec > MINUTE * 5.0 {
        SmartDateFormat::HourMin
    } else {
        SmartDateFormat::HourMinSec
    }
}

/// Formats an epoch-millisecond timestamp in the given zone.
pub fn format_timestamp(value_ms: f64, format: SmartDateFormat, tz: Tz) -> String {
    let dt = match tz.timestamp_millis_opt(value_ms as i64) {
        chrono::LocalResult::Single(d) => d,
        chrono::LocalResult::Ambiguous(d, _) => d,
        chrono::LocalResult::None => return format!("{:.2}", value_ms),
    };

    match format {
        SmartDateFormat::Year => dt.format("%Y").to_string(),
        SmartDateFormat::MonthYear => dt.format("%b %Y").to_string(),
        SmartDateFormat::DayMonth => dt.format("%d %b").to_string(),
        SmartDateFormat::HourMin => dt.format("%H:%M").to_string(),
        SmartDateFormat::HourMinSec => dt.format("%H:%M:%S").to_string(),
    }
}

const SECOND_MS: i64 = 1000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: f64 = 24.0 * HOUR_MS as f64;

/// Calendar step between temporal ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickInterval {
    Millis(i64),
    Days(u64),
    Months(u32),
}

impl TickInterval {
    fn approx_ms(self) -> f64 {
        match self {
            Self::Millis(ms) => ms as f64,
            Self::Days(n) => n as f64 * DAY_MS,
            Self::Months(n) => n as f64 * 30.44 * DAY_MS,
        }
    }
}

const INTERVALS: &[TickInterval] = &[
    TickInterval::Millis(SECOND_MS),
    TickInterval::Millis(5 * SECOND_MS),
    TickInterval::Millis(15 * SECOND_MS),
    TickInterval::Millis(30 * SECOND_MS),
    TickInterval::Millis(MINUTE_MS),
    TickInterval::Millis(5 * MINUTE_MS),
    TickInterval::Millis(15 * MINUTE_MS),
    TickInterval::Millis(30 * MINUTE_MS),
    TickInterval::Millis(HOUR_MS),
    TickInterval::Millis(3 * HOUR_MS),
    TickInterval::Millis(6 * HOUR_MS),
    TickInterval::Millis(12 * HOUR_MS),
    TickInterval::Days(1),
    TickInterval::Days(2),
    TickInterval::Days(7),
    TickInterval::Months(1),
    TickInterval::Months(3),
    TickInterval::Months(6),
    TickInterval::Months(12),
    TickInterval::Months(24),
    TickInterval::Months(60),
    TickInterval::Months(120),
    TickInterval::Months(240),
    TickInterval::Months(600),
    TickInterval::Months(1200),
];

impl SmartDateFormat {
    /// Finest step whose labels stay distinct in this format.
    fn finest_interval(self) -> TickInterval {
        match self {
            Self::HourMinSec => TickInterval::Millis(SECOND_MS),
            Self::HourMin => TickInterval::Millis(MINUTE_MS),
            Self::DayMonth => TickInterval::Days(1),
            Self::MonthYear => TickInterval::Months(1),
            Self::Year => TickInterval::Months(12),
        }
    }
}

fn offset_ms(value_ms: f64, tz: Tz) -> i64 {
    tz.timestamp_millis_opt(value_ms as i64)
        .earliest()
        .map(|dt| dt.offset().fix().local_minus_utc() as i64 * 1000)
        .unwrap_or(0)
}

fn local_date(value_ms: f64, tz: Tz) -> Option<NaiveDate> {
    tz.timestamp_millis_opt(value_ms as i64)
        .earliest()
        .map(|dt| dt.date_naive())
}

fn local_midnight(date: NaiveDate, tz: Tz) -> Option<f64> {
    let naive = date.and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis() as f64)
}

fn fixed_ticks(lo: f64, hi: f64, step: i64, tz: Tz, limit: usize) -> Vec<f64> {
    let offset = offset_ms(lo, tz);
    let local_lo = lo.ceil() as i64 + offset;
    let mut t = local_lo.div_euclid(step) * step;
    if t < local_lo {
        t += step;
    }
    let mut ticks = Vec::new();
    while ((t - offset) as f64) <= hi && ticks.len() < limit {
        ticks.push((t - offset) as f64);
        t += step;
    }
    ticks
}

fn day_ticks(lo: f64, hi: f64, days: u64, tz: Tz, limit: usize) -> Vec<f64> {
    let Some(mut date) = local_date(lo, tz) else {
        return vec![];
    };
    let mut ticks = Vec::new();
    for _ in 0..=limit {
        if let Some(t) = local_midnight(date, tz) {
            if t > hi {
                break;
            }
            if t >= lo {
                ticks.push(t);
            }
        }
        match date.checked_add_days(Days::new(days)) {
            Some(next) => date = next,
            None => break,
        }
    }
    ticks
}

fn month_ticks(lo: f64, hi: f64, months: u32, tz: Tz, limit: usize) -> Vec<f64> {
    let Some(start) = local_date(lo, tz) else {
        return vec![];
    };
    let months = months as i64;
    let mut index = (start.year() as i64 * 12 + start.month0() as i64).div_euclid(months) * months;
    let mut ticks = Vec::new();
    for _ in 0..=limit {
        let year = index.div_euclid(12) as i32;
        let month = index.rem_euclid(12) as u32 + 1;
        let Some(t) = NaiveDate::from_ymd_opt(year, month, 1).and_then(|d| local_midnight(d, tz)) else {
            break;
        };
        if t > hi {
            break;
        }
        if t >= lo {
            ticks.push(t);
        }
        index += months;
    }
    ticks
}

/// Tick positions (epoch ms) on calendar boundaries in `tz`.
///
/// The step is never finer than what [`determine_date_format`] can tell
/// apart for the same span, so neighbouring labels differ.
pub fn time_ticks(domain_ms: (f64, f64), count: usize, tz: Tz) -> Vec<f64> {
    let (lo, hi) = if domain_ms.0 <= domain_ms.1 {
        domain_ms
    } else {
        (domain_ms.1, domain_ms.0)
    };
    if !(lo.is_finite() && hi.is_finite()) || hi <= lo {
        return vec![];
    }
    let span = hi - lo;
    let finest = determine_date_format(span / 1000.0).finest_interval().approx_ms();
    let target = span / count.max(1) as f64;
    let interval = INTERVALS
        .iter()
        .copied()
        .find(|i| i.approx_ms() >= target && i.approx_ms() >= finest)
        .unwrap_or(TickInterval::Months(1200));
    let limit = count.max(1) * 4 + 8;
    match interval {
        TickInterval::Millis(step) => fixed_ticks(lo, hi, step, tz, limit),
        TickInterval::Days(n) => day_ticks(lo, hi, n, tz, limit),
        TickInterval::Months(n) => month_ticks(lo, hi, n, tz, limit),
    }
}
