use serde::{Deserialize, Serialize};

use crate::axis::AxisTimeZone;
use crate::core::Surface;
use crate::render::Color;

/// Colors used for the chart chrome (grid and axis labels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphPalette {
    pub grid: Color,
    pub axis: Color,
    pub horizontal_labels: Color,
    pub vertical_labels: Color,
}

impl Default for GraphPalette {
    fn default() -> Self {
        Self {
            grid: Color::rgb(0.8, 0.8, 0.8),
            axis: Color::rgb(0.8, 0.8, 0.8),
            horizontal_labels: Color::rgb(0.2, 0.2, 0.2),
            vertical_labels: Color::rgb(0.2, 0.2, 0.2),
        }
    }
}

/// Vertical label policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalLabelPolicy {
    /// Fixed label count.
    Fixed(usize),
    /// One label per three text heights of plot.
    Auto,
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    pub surface: Surface,
    /// Outer margin around the plot area, in pixels.
    pub border_px: f64,
    /// Height of one tick label line, in pixels. Feeds the border inset and
    /// the auto vertical label count.
    pub label_text_height_px: f64,
    pub font_size_px: f64,
    /// Horizontal label count used when no span tier matches.
    pub default_horizontal_labels: usize,
    pub vertical_labels: VerticalLabelPolicy,
    pub axis_time_zone: AxisTimeZone,
    pub palette: GraphPalette,
    pub scrollable: bool,
    /// Implies `scrollable`.
    pub scalable: bool,
    pub disable_touch: bool,
}

impl GraphConfig {
    #[must_use]
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            border_px: 20.0,
            label_text_height_px: 10.0,
            font_size_px: 12.0,
            default_horizontal_labels: 5,
            vertical_labels: VerticalLabelPolicy::Fixed(6),
            axis_time_zone: AxisTimeZone::Utc,
            palette: GraphPalette::default(),
            scrollable: false,
            scalable: false,
            disable_touch: false,
        }
    }

    #[must_use]
    pub fn with_axis_time_zone(mut self, zone: AxisTimeZone) -> Self {
        self.axis_time_zone = zone;
        self
    }

    #[must_use]
    pub fn with_vertical_labels(mut self, policy: VerticalLabelPolicy) -> Self {
        self.vertical_labels = policy;
        self
    }

    #[must_use]
    pub fn with_default_horizontal_labels(mut self, count: usize) -> Self {
        self.default_horizontal_labels = count;
        self
    }

    #[must_use]
    pub fn with_scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = scrollable;
        self
    }

    #[must_use]
    pub fn with_scalable(mut self, scalable: bool) -> Self {
        self.scalable = scalable;
        if scalable {
            self.scrollable = true;
        }
        self
    }

    #[must_use]
    pub fn with_disable_touch(mut self, disable_touch: bool) -> Self {
        self.disable_touch = disable_touch;
        self
    }
}
