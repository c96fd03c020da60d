use serde::{Deserialize, Serialize};

use crate::core::DataPoint;

/// Vertical value range currently used for axis scaling.
///
/// Derived, never stored: recomputed from whichever points are visible, or
/// from a manually pinned range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YExtent {
    pub min: f64,
    pub max: f64,
}

impl YExtent {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }
}

/// Raw min/max Y across a set of windowed slices; `None` when nothing is
/// visible.
#[must_use]
pub fn visible_y_range<'a, I>(slices: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a [DataPoint]>,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for point in slices.into_iter().flatten() {
        min = min.min(point.y);
        max = max.max(point.y);
    }
    (min <= max).then_some((min, max))
}

/// Turns a raw Y range into the extent used for axis scaling.
///
/// A degenerate range is normalized first: both ends zero become `[0, 1]`,
/// any other equal pair is inflated to `[min * 0.95, max * 1.05]`. Only a
/// non-degenerate, non-manual maximum is then rounded up to a clean axis
/// boundary.
#[must_use]
pub fn derive_y_extent(raw_min: f64, raw_max: f64, manual: bool) -> YExtent {
    if raw_max == raw_min {
        return if raw_max == 0.0 {
            YExtent::new(0.0, 1.0)
        } else {
            YExtent::new(raw_min * 0.95, raw_max * 1.05)
        };
    }

    if manual {
        YExtent::new(raw_min, raw_max)
    } else {
        YExtent::new(raw_min, round_up_axis_max(raw_max))
    }
}

/// Rounds an auto-derived axis maximum up to a visually clean boundary.
///
/// Values below 5 are forced to 5, values below 10 pass through. Larger
/// values are rounded up to the next multiple of `10^p`, where `p` depends
/// on the digit count and the leading value left by the `> 10` digit loop.
/// The loop condition and branch cutoffs are load-bearing for visual
/// parity; an exact 10 becomes 11.
#[must_use]
pub fn round_up_axis_max(largest: f64) -> f64 {
    if largest < 5.0 {
        return 5.0;
    }
    if largest < 10.0 {
        return largest;
    }

    let as_int = largest as i64;
    let mut leading = as_int;
    let mut digits: u32 = 1;
    while leading > 10 {
        digits += 1;
        leading /= 10;
    }
    let pow_to_div = if leading < 4 { digits - 2 } else { digits - 1 };
    let unit = 10_i64.pow(pow_to_div);
    (as_int / unit + 1) as f64 * unit as f64
}
