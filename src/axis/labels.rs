use smallvec::{SmallVec, smallvec};

use super::bucket::{AxisTimeZone, SnapOutcome, snap_time_window};
use super::format::{LabelAxis, LabelFormatterFn, format_time_label, format_value_label};
use crate::core::YExtent;

/// Ordered tick label strings plus their spacing in domain units.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelSet {
    pub labels: SmallVec<[String; 8]>,
    pub tick_spacing: f64,
}

impl LabelSet {
    #[must_use]
    pub fn from_strings(labels: Vec<String>, tick_spacing: f64) -> Self {
        Self {
            labels: SmallVec::from_vec(labels),
            tick_spacing,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// How many vertical labels to generate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerticalLabelCount {
    Fixed(usize),
    /// Derived from the plot height: one label per three text heights.
    Auto {
        graph_height: f64,
        label_text_height: f64,
    },
}

/// Generates horizontal labels over `[domain_start, domain_end]`.
///
/// The window is snapped to bucket boundaries first; labels are evenly
/// spaced over the snapped window. The snap outcome is returned alongside so
/// the caller can rewrite the viewport: ticks only align with gridlines
/// when the visible window is the snapped one.
#[must_use]
pub fn horizontal_labels(
    domain_start: f64,
    domain_end: f64,
    zone: AxisTimeZone,
    default_count: usize,
    formatter: Option<&LabelFormatterFn>,
) -> (LabelSet, SnapOutcome) {
    let outcome = snap_time_window(domain_start as i64, domain_end as i64, zone, default_count);

    let min = outcome.start_ms as f64;
    let span = (outcome.end_ms - outcome.start_ms) as f64;
    let intervals = outcome.label_count.max(2) - 1;

    let mut labels: SmallVec<[String; 8]> = SmallVec::with_capacity(intervals + 1);
    for i in 0..=intervals {
        let value = min + span * i as f64 / intervals as f64;
        labels.push(label_text(value, span, zone, formatter, LabelAxis::Time));
    }

    (
        LabelSet {
            labels,
            tick_spacing: span / intervals as f64,
        },
        outcome,
    )
}

/// Generates vertical labels from the largest value down, so index 0 sits at
/// the top of the plot.
#[must_use]
pub fn vertical_labels(
    extent: YExtent,
    count: VerticalLabelCount,
    zone: AxisTimeZone,
    formatter: Option<&LabelFormatterFn>,
) -> LabelSet {
    let intervals = match count {
        VerticalLabelCount::Fixed(count) => count.saturating_sub(1).max(1),
        VerticalLabelCount::Auto {
            graph_height,
            label_text_height,
        } => ((graph_height / (label_text_height * 3.0)) as usize).max(1),
    };

    let mut labels: SmallVec<[String; 8]> = smallvec![String::new(); intervals + 1];
    for i in 0..=intervals {
        let value = extent.min + extent.span() * i as f64 / intervals as f64;
        labels[intervals - i] = label_text(value, extent.span(), zone, formatter, LabelAxis::Value);
    }

    LabelSet {
        labels,
        tick_spacing: extent.span() / intervals as f64,
    }
}

fn label_text(
    value: f64,
    span: f64,
    zone: AxisTimeZone,
    formatter: Option<&LabelFormatterFn>,
    axis: LabelAxis,
) -> String {
    if let Some(formatter) = formatter {
        if let Some(text) = formatter(value, axis) {
            return text;
        }
    }
    match axis {
        LabelAxis::Time => format_time_label(value, span, zone),
        LabelAxis::Value => format_value_label(value),
    }
}
