//! Time-bucket snapping for the horizontal axis.
//!
//! The visible span selects a bucket granularity (day / hour / 15-min /
//! 5-min); both window ends snap to bucket boundaries and the label count is
//! derived so the snapped span divides into equal intervals. Callers apply
//! the snapped window back to the viewport, which is what keeps tick labels
//! landing exactly on gridlines.

use chrono::{DateTime, Datelike, Days, Duration, FixedOffset, Offset, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{GraphError, GraphResult};

pub(crate) const MILLIS_PER_MINUTE: i64 = 60 * 1_000;
pub(crate) const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub(crate) const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Upper bound on start-bucket advances while hunting for a divisible span.
/// Advancing one bucket cycles `span % (count - 1)` through every residue of
/// every candidate count well within this bound.
const SNAP_RETRY_BUDGET: u32 = 64;

/// Time zone the axis snaps and formats in.
///
/// The snap rules work on calendar fields (midnight, top of the hour), so
/// the zone is part of the axis configuration rather than ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisTimeZone {
    #[default]
    Utc,
    /// Fixed offset east of UTC, in seconds. An out-of-range offset falls
    /// back to UTC at use time; prefer [`AxisTimeZone::fixed_east`].
    FixedEastSeconds(i32),
}

impl AxisTimeZone {
    /// Validated constructor; the offset must be strictly within ±24 h.
    pub fn fixed_east(seconds: i32) -> GraphResult<Self> {
        if seconds.abs() >= 86_400 {
            return Err(GraphError::InvalidArgument(format!(
                "utc offset out of range: {seconds}s"
            )));
        }
        Ok(Self::FixedEastSeconds(seconds))
    }

    pub(crate) fn fixed_offset(self) -> FixedOffset {
        match self {
            Self::Utc => Utc.fix(),
            Self::FixedEastSeconds(seconds) => {
                FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
            }
        }
    }
}

/// Bucket granularity selected for the current visible span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BucketUnit {
    Day,
    Hour,
    QuarterHour,
    FiveMinute,
}

/// Result of snapping one visible window to bucket boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapOutcome {
    pub start_ms: i64,
    pub end_ms: i64,
    /// Tick label count, `3..=8` when derived, otherwise the tier fallback.
    pub label_count: usize,
    /// `None` when the span was too short to snap.
    pub unit: Option<BucketUnit>,
}

impl SnapOutcome {
    #[must_use]
    pub fn span_ms(self) -> i64 {
        self.end_ms - self.start_ms
    }
}

/// Largest label count `l` in `[3, 8]` such that `n - m` splits into `l - 1`
/// equal intervals, searched downward so more labels win when several counts
/// divide evenly. Returns 0 when no count in the range divides.
#[must_use]
pub fn calculate_num_labels(m: i64, n: i64) -> usize {
    let diff = n - m;
    for l in (3..=8).rev() {
        if diff % (l - 1) == 0 {
            return l as usize;
        }
    }
    0
}

/// Snaps `[start_ms, end_ms]` per the span tier table.
///
/// Tiers are evaluated top-down, first match wins; a span under ten minutes
/// is returned unsnapped with the default label count. Timestamps chrono
/// cannot represent are also returned unsnapped.
#[must_use]
pub fn snap_time_window(
    start_ms: i64,
    end_ms: i64,
    zone: AxisTimeZone,
    default_count: usize,
) -> SnapOutcome {
    let span = end_ms - start_ms;
    let raw = SnapOutcome {
        start_ms,
        end_ms,
        label_count: default_count,
        unit: None,
    };

    let offset = zone.fixed_offset();
    let (Some(start), Some(end)) = (zoned(start_ms, offset), zoned(end_ms, offset)) else {
        return raw;
    };

    let snapped = if span >= 13 * MILLIS_PER_DAY {
        snap_day_tier(start, end, 7)
    } else if span >= 3 * MILLIS_PER_DAY {
        snap_day_tier(start, end, default_count)
    } else if span >= 140 * MILLIS_PER_MINUTE {
        snap_hour_tier(start, end, default_count)
    } else if span >= 120 * MILLIS_PER_MINUTE {
        snap_minute_tier(start, end, MinuteGrid::QUARTER_HOUR, 15, default_count)
    } else if span >= 45 * MILLIS_PER_MINUTE {
        // Historical behavior: this tier hunts for a divisible span in
        // 5-minute steps even though it snaps to the 15-minute grid.
        snap_minute_tier(start, end, MinuteGrid::QUARTER_HOUR, 5, default_count)
    } else if span >= 10 * MILLIS_PER_MINUTE {
        snap_minute_tier(start, end, MinuteGrid::FIVE_MINUTE, 5, default_count)
    } else {
        return raw;
    };

    snapped.unwrap_or(raw)
}

/// Minute-grid parameters: bucket width and the offset below which snapping
/// rounds down instead of up.
#[derive(Clone, Copy)]
struct MinuteGrid {
    minutes: i64,
    round_down_below: i64,
    unit: BucketUnit,
}

impl MinuteGrid {
    const QUARTER_HOUR: Self = Self {
        minutes: 15,
        round_down_below: 7,
        unit: BucketUnit::QuarterHour,
    };
    const FIVE_MINUTE: Self = Self {
        minutes: 5,
        round_down_below: 3,
        unit: BucketUnit::FiveMinute,
    };
}

fn snap_day_tier(
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    fallback: usize,
) -> Option<SnapOutcome> {
    let end = snap_to_midnight(end)?;
    let mut start = snap_to_midnight(start)?;

    let mut count = calculate_num_labels(day_index(start), day_index(end));
    let mut budget = SNAP_RETRY_BUDGET;
    while count == 0 && budget > 0 {
        start = start.checked_add_signed(Duration::days(1))?;
        count = calculate_num_labels(day_index(start), day_index(end));
        budget -= 1;
    }

    Some(SnapOutcome {
        start_ms: start.timestamp_millis(),
        end_ms: end.timestamp_millis(),
        label_count: finalize_count(count, fallback, BucketUnit::Day),
        unit: Some(BucketUnit::Day),
    })
}

fn snap_hour_tier(
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    fallback: usize,
) -> Option<SnapOutcome> {
    let end_ms = snap_to_hour(end)?.timestamp_millis();
    let mut start_ms = snap_to_hour(start)?.timestamp_millis();

    let mut count = calculate_num_labels(start_ms / MILLIS_PER_HOUR, end_ms / MILLIS_PER_HOUR);
    let mut budget = SNAP_RETRY_BUDGET;
    while count == 0 && budget > 0 {
        start_ms += MILLIS_PER_HOUR;
        count = calculate_num_labels(start_ms / MILLIS_PER_HOUR, end_ms / MILLIS_PER_HOUR);
        budget -= 1;
    }

    Some(SnapOutcome {
        start_ms,
        end_ms,
        label_count: finalize_count(count, fallback, BucketUnit::Hour),
        unit: Some(BucketUnit::Hour),
    })
}

fn snap_minute_tier(
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    grid: MinuteGrid,
    retry_step_minutes: i64,
    fallback: usize,
) -> Option<SnapOutcome> {
    let bucket_ms = grid.minutes * MILLIS_PER_MINUTE;
    let end_ms = snap_to_minute_grid(end, grid)?.timestamp_millis();
    let mut start_ms = snap_to_minute_grid(start, grid)?.timestamp_millis();

    let mut count = calculate_num_labels(start_ms / bucket_ms, end_ms / bucket_ms);
    let mut budget = SNAP_RETRY_BUDGET;
    while count == 0 && budget > 0 {
        start_ms += retry_step_minutes * MILLIS_PER_MINUTE;
        count = calculate_num_labels(start_ms / bucket_ms, end_ms / bucket_ms);
        budget -= 1;
    }

    Some(SnapOutcome {
        start_ms,
        end_ms,
        label_count: finalize_count(count, fallback, grid.unit),
        unit: Some(grid.unit),
    })
}

fn finalize_count(count: usize, fallback: usize, unit: BucketUnit) -> usize {
    if count == 0 {
        warn!(
            ?unit,
            fallback, "label count search exhausted its retry budget"
        );
        fallback
    } else {
        count
    }
}

pub(crate) fn zoned(ms: i64, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp_millis(ms).map(|utc| utc.with_timezone(&offset))
}

fn day_index(dt: DateTime<FixedOffset>) -> i64 {
    i64::from(dt.ordinal())
}

/// Midnight of the timestamp's day, or of the next day when the local
/// time-of-day is past 12:00.
fn snap_to_midnight(dt: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
    let days_forward = u64::from(dt.hour() > 12);
    let date = dt.date_naive().checked_add_days(Days::new(days_forward))?;
    dt.timezone()
        .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
        .single()
}

/// Top of the timestamp's hour, or of the next hour when past minute 20.
fn snap_to_hour(dt: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
    let hours_forward = i64::from(dt.minute() > 20);
    let truncated = dt.with_minute(0)?.with_second(0)?.with_nanosecond(0)?;
    truncated.checked_add_signed(Duration::hours(hours_forward))
}

fn snap_to_minute_grid(dt: DateTime<FixedOffset>, grid: MinuteGrid) -> Option<DateTime<FixedOffset>> {
    let offset_in_grid = i64::from(dt.minute()) % grid.minutes;
    let delta_minutes = if offset_in_grid < grid.round_down_below {
        -offset_in_grid
    } else {
        grid.minutes - offset_in_grid
    };
    let truncated = dt.with_second(0)?.with_nanosecond(0)?;
    truncated.checked_add_signed(Duration::minutes(delta_minutes))
}

#[cfg(test)]
mod tests {
    use super::{AxisTimeZone, BucketUnit, MILLIS_PER_DAY, calculate_num_labels, snap_time_window};

    #[test]
    fn num_labels_prefers_more_labels() {
        // 14 intervals divide by 7 (8 labels) before anything smaller.
        assert_eq!(calculate_num_labels(0, 14), 8);
        // 6 divides by 6 (7 labels) and by 3 and 2; 7 wins.
        assert_eq!(calculate_num_labels(0, 6), 7);
        // A prime gap beyond 8 labels divides by nothing in range.
        assert_eq!(calculate_num_labels(0, 13), 0);
    }

    #[test]
    fn sub_ten_minute_span_is_left_unsnapped() {
        let start = 1_000_000;
        let end = start + 9 * 60 * 1_000;
        let outcome = snap_time_window(start, end, AxisTimeZone::Utc, 5);
        assert_eq!(outcome.start_ms, start);
        assert_eq!(outcome.end_ms, end);
        assert_eq!(outcome.unit, None);
        assert_eq!(outcome.label_count, 5);
    }

    #[test]
    fn thirteen_day_span_enters_day_tier() {
        let outcome = snap_time_window(0, 13 * MILLIS_PER_DAY, AxisTimeZone::Utc, 5);
        assert_eq!(outcome.unit, Some(BucketUnit::Day));
    }
}
