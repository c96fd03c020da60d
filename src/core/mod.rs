pub mod extent;
pub mod scale;
pub mod series;
pub mod types;
pub mod viewport;
pub mod windowing;

pub use extent::{YExtent, derive_y_extent, round_up_axis_max, visible_y_range};
pub use scale::LinearScale;
pub use series::{Series, SeriesId, SeriesPaint, SeriesStore};
pub use types::{DataPoint, Surface};
pub use viewport::Viewport;
pub use windowing::{visible_slice, visible_slice_of, visible_slices};
