use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::bucket::{AxisTimeZone, MILLIS_PER_DAY, zoned};

/// Which axis a label belongs to, as seen by a custom formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelAxis {
    Time,
    Value,
}

/// Pluggable label formatter consulted before the default formats.
///
/// Returning `None` means "use the default" for that label.
pub type LabelFormatterFn = Arc<dyn Fn(f64, LabelAxis) -> Option<String> + Send + Sync + 'static>;

/// Default time-tick format, chosen by the snapped visible span: date only
/// from three days up, a two-line date/time between one and three days,
/// time-of-day below that.
#[must_use]
pub fn format_time_label(value_ms: f64, span_ms: f64, zone: AxisTimeZone) -> String {
    let Some(dt) = zoned(value_ms as i64, zone.fixed_offset()) else {
        return format_value_label(value_ms);
    };

    if span_ms >= (3 * MILLIS_PER_DAY) as f64 {
        dt.format("%b-%d").to_string()
    } else if span_ms >= MILLIS_PER_DAY as f64 {
        dt.format("%b-%d \n %H:%M").to_string()
    } else {
        dt.format("%H:%M").to_string()
    }
}

/// Default value-tick format: integer truncation.
#[must_use]
pub fn format_value_label(value: f64) -> String {
    format!("{}", value as i64)
}
