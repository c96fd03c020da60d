use crate::error::{GraphError, GraphResult};

/// Linear domain-to-pixel mapping over a fixed pixel extent.
///
/// `pixel = (value - domain_start) / span * extent_px`, the exact mapping
/// renderers are required to use for tick placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> GraphResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(GraphError::InvalidArgument(
                "scale domain must be finite and non-empty".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn to_pixel(self, value: f64, extent_px: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        (value - self.domain_start) / span * extent_px
    }

    #[must_use]
    pub fn to_domain(self, pixel: f64, extent_px: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        self.domain_start + pixel / extent_px * span
    }
}
