//! Adaptive axis labeling: span-tier time bucketing, viewport snapping and
//! label text generation.

pub mod bucket;
pub mod format;
pub mod labels;

pub use bucket::{AxisTimeZone, BucketUnit, SnapOutcome, calculate_num_labels, snap_time_window};
pub use format::{LabelAxis, LabelFormatterFn, format_time_label, format_value_label};
pub use labels::{LabelSet, VerticalLabelCount, horizontal_labels, vertical_labels};
