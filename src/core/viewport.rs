use serde::{Deserialize, Serialize};

use crate::core::SeriesStore;
use crate::error::{GraphError, GraphResult};

/// Visible X-domain window of the chart.
///
/// `size == 0` is a sentinel meaning "no explicit window": the chart shows
/// the full data extent. The window itself is never clamped here; clamping
/// is a policy applied by callers (gesture handling, auto-fit), and explicit
/// API users may set any non-negative window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Viewport {
    start: f64,
    size: f64,
    initial_bounds: Option<(f64, f64)>,
}

impl Viewport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the window verbatim.
    ///
    /// Fails with `InvalidArgument` when `size` is negative; the previous
    /// window is left unchanged.
    pub fn set_window(&mut self, start: f64, size: f64) -> GraphResult<()> {
        if size < 0.0 {
            return Err(GraphError::InvalidArgument(
                "viewport size must be >= 0".to_owned(),
            ));
        }
        self.start = start;
        self.size = size;
        Ok(())
    }

    #[must_use]
    pub fn start(self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn size(self) -> f64 {
        self.size
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.start + self.size
    }

    /// `(start, size)` exactly as last stored.
    #[must_use]
    pub fn window(self) -> (f64, f64) {
        (self.start, self.size)
    }

    /// True while the "full data" sentinel window is in effect.
    #[must_use]
    pub fn is_unset(self) -> bool {
        self.size == 0.0
    }

    /// Pins the reset target used by double-tap and as the full-data
    /// fallback when no series has points.
    pub fn set_initial_bounds(&mut self, start: f64, end: f64) {
        self.initial_bounds = Some((start, end));
    }

    #[must_use]
    pub fn initial_bounds(self) -> Option<(f64, f64)> {
        self.initial_bounds
    }

    /// The `[min, max]` X range the chart currently covers.
    ///
    /// With an explicit window this is `[start, start + size]`; otherwise
    /// the global data extent, falling back to the pinned initial bounds
    /// when every series is empty.
    #[must_use]
    pub fn effective_domain(self, store: &SeriesStore) -> (f64, f64) {
        if self.is_unset() {
            self.full_domain(store)
        } else {
            (self.start, self.end())
        }
    }

    /// The full data domain regardless of the current window.
    #[must_use]
    pub fn full_domain(self, store: &SeriesStore) -> (f64, f64) {
        store
            .x_extent()
            .or(self.initial_bounds)
            .unwrap_or((0.0, 0.0))
    }

    /// Pinch-clamp rule: `start` never drops below `min_x`; when the window
    /// end overruns `max_x`, shift the window left while room allows,
    /// otherwise pin `start` to `min_x` and shrink the window to fit.
    ///
    /// A sentinel `size == 0` is replaced by `max_x` before clamping.
    pub fn clamp_to_domain(&mut self, min_x: f64, max_x: f64) {
        if self.start < min_x {
            self.start = min_x;
        }
        if self.size == 0.0 {
            self.size = max_x;
        }
        let overlap = self.start + self.size - max_x;
        if overlap > 0.0 {
            if self.start - overlap > min_x {
                self.start -= overlap;
            } else {
                self.start = min_x;
                self.size = max_x - self.start;
            }
        }
    }
}
