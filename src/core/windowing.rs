use crate::core::{DataPoint, Series, SeriesId, SeriesStore, Viewport};

/// Extracts the minimal point run needed to draw `series` inside `viewport`.
///
/// Besides every in-window point the result keeps one overscan sentinel on
/// each side: the closest point still before the window start and the first
/// point past the window end, so partially visible segments draw across the
/// plot edge without snapping during scroll.
///
/// The scan holds the series' read lock for its duration; a producer thread
/// appending to the same series blocks only for this one scan.
#[must_use]
pub fn visible_slice(series: &Series, viewport: Viewport) -> Vec<DataPoint> {
    let points = series.read_points();
    visible_slice_of(&points, viewport)
}

/// Windowing core over a raw, X-sorted point slice.
///
/// A sentinel viewport (`size == 0`) returns the series unmodified. The scan
/// is a single forward pass that exits early once one point past the window
/// has been collected; while still before the window it keeps overwriting
/// slot 0, so the last pre-window point survives as the left sentinel.
#[must_use]
pub fn visible_slice_of(points: &[DataPoint], viewport: Viewport) -> Vec<DataPoint> {
    if viewport.is_unset() {
        return points.to_vec();
    }

    let start = viewport.start();
    let end = viewport.end();
    let mut slice: Vec<DataPoint> = Vec::new();

    for point in points {
        if point.x >= start {
            slice.push(*point);
            if point.x > end {
                break;
            }
        } else if let Some(left_sentinel) = slice.first_mut() {
            *left_sentinel = *point;
        } else {
            slice.push(*point);
        }
    }

    slice
}

/// Windows every registered series against the same viewport.
///
/// Series are independent; with the `parallel-windowing` feature the scans
/// run on the rayon pool, one task per series.
#[must_use]
pub fn visible_slices(store: &SeriesStore, viewport: Viewport) -> Vec<(SeriesId, Vec<DataPoint>)> {
    #[cfg(feature = "parallel-windowing")]
    {
        use rayon::prelude::*;

        let series: Vec<&Series> = store.iter().collect();
        series
            .into_par_iter()
            .map(|series| (series.id(), visible_slice(series, viewport)))
            .collect()
    }

    #[cfg(not(feature = "parallel-windowing"))]
    {
        store
            .iter()
            .map(|series| (series.id(), visible_slice(series, viewport)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::visible_slice_of;
    use crate::core::{DataPoint, Viewport};

    fn points(xs: &[f64]) -> Vec<DataPoint> {
        xs.iter().map(|&x| DataPoint::new(x, x)).collect()
    }

    #[test]
    fn left_sentinel_is_last_point_before_window() {
        let mut viewport = Viewport::new();
        viewport.set_window(25.0, 50.0).expect("valid window");

        let slice = visible_slice_of(&points(&[0.0, 10.0, 30.0, 50.0, 70.0, 90.0, 100.0]), viewport);
        let xs: Vec<f64> = slice.iter().map(|point| point.x).collect();
        assert_eq!(xs, vec![10.0, 30.0, 50.0, 70.0, 90.0]);
    }

    #[test]
    fn unset_viewport_returns_all_points() {
        let viewport = Viewport::new();
        let slice = visible_slice_of(&points(&[1.0, 2.0, 3.0]), viewport);
        assert_eq!(slice.len(), 3);
    }

    #[test]
    fn empty_series_windows_to_empty() {
        let mut viewport = Viewport::new();
        viewport.set_window(0.0, 10.0).expect("valid window");
        assert!(visible_slice_of(&[], viewport).is_empty());
    }
}
