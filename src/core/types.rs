use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pixel dimensions of the drawing area assigned to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One chart sample.
///
/// `x` is the logical time in epoch milliseconds; `y` the sample value.
/// X must be monotonically non-decreasing within a series (caller contract,
/// the engine never re-sorts).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn at_time(time: DateTime<Utc>, value: f64) -> Self {
        Self {
            x: time.timestamp_millis() as f64,
            y: value,
        }
    }
}
