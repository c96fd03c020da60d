use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::error::{GraphError, GraphResult};
use crate::render::Color;

/// Opaque identifier for a registered series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(u64);

impl SeriesId {
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Stroke styling a chart style applies when drawing a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPaint {
    pub color: Color,
    pub stroke_width: f64,
}

impl Default for SeriesPaint {
    fn default() -> Self {
        Self {
            color: Color::rgb(0.0, 0.3, 0.6),
            stroke_width: 1.5,
        }
    }
}

/// One X-sorted data series.
///
/// Points live behind a read/write lock so a producer thread may append
/// while the render thread windows the series; the lock is scoped to a
/// single series, so independent series never contend.
#[derive(Debug, Clone)]
pub struct Series {
    id: SeriesId,
    description: Option<String>,
    paint: SeriesPaint,
    points: Arc<RwLock<Vec<DataPoint>>>,
}

impl Series {
    fn new(id: SeriesId, points: Vec<DataPoint>, paint: SeriesPaint) -> Self {
        Self {
            id,
            description: None,
            paint,
            points: Arc::new(RwLock::new(points)),
        }
    }

    #[must_use]
    pub fn id(&self) -> SeriesId {
        self.id
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    #[must_use]
    pub fn paint(&self) -> SeriesPaint {
        self.paint
    }

    /// Appends one sample under the series' write lock.
    ///
    /// The caller contract from the data model holds: `point.x` must not be
    /// smaller than the last appended X.
    pub fn append(&self, point: DataPoint) {
        self.points
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(point);
    }

    /// Swaps the whole point list; the unit of update for existing data.
    pub fn replace(&self, points: Vec<DataPoint>) {
        *self
            .points
            .write()
            .unwrap_or_else(PoisonError::into_inner) = points;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read_points().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read_points().is_empty()
    }

    /// First sample X; `None` while the series is empty. O(1), series are
    /// X-sorted.
    #[must_use]
    pub fn first_x(&self) -> Option<f64> {
        self.read_points().first().map(|point| point.x)
    }

    /// Last sample X; `None` while the series is empty.
    #[must_use]
    pub fn last_x(&self) -> Option<f64> {
        self.read_points().last().map(|point| point.x)
    }

    /// Copy of the full point list taken under the read lock.
    #[must_use]
    pub fn snapshot(&self) -> Vec<DataPoint> {
        self.read_points().clone()
    }

    pub(crate) fn read_points(&self) -> RwLockReadGuard<'_, Vec<DataPoint>> {
        self.points.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Ordered registry of the chart's series.
#[derive(Debug, Default)]
pub struct SeriesStore {
    series: IndexMap<SeriesId, Series>,
    next_id: u64,
}

impl SeriesStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new series and returns its id.
    pub fn register(&mut self, points: Vec<DataPoint>, paint: SeriesPaint) -> SeriesId {
        let id = SeriesId(self.next_id);
        self.next_id += 1;
        self.series.insert(id, Series::new(id, points, paint));
        id
    }

    #[must_use]
    pub fn get(&self, id: SeriesId) -> Option<&Series> {
        self.series.get(&id)
    }

    #[must_use]
    pub fn get_mut(&mut self, id: SeriesId) -> Option<&mut Series> {
        self.series.get_mut(&id)
    }

    /// Series at a registration-order index.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Series> {
        self.series.get_index(index).map(|(_, series)| series)
    }

    /// Removes the series at `index`, preserving the order of the rest.
    pub fn remove_at(&mut self, index: usize) -> GraphResult<Series> {
        let len = self.series.len();
        self.series
            .shift_remove_index(index)
            .map(|(_, series)| series)
            .ok_or(GraphError::IndexOutOfBounds { index, len })
    }

    pub fn remove(&mut self, id: SeriesId) -> Option<Series> {
        self.series.shift_remove(&id)
    }

    pub fn clear(&mut self) {
        self.series.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.values()
    }

    /// Smallest and largest X across all registered series, from each
    /// series' first/last point. `None` when every series is empty.
    #[must_use]
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        let mut extent: Option<(f64, f64)> = None;
        for series in self.series.values() {
            let (Some(first), Some(last)) = (series.first_x(), series.last_x()) else {
                continue;
            };
            extent = Some(match extent {
                Some((min, max)) => (min.min(first), max.max(last)),
                None => (first, last),
            });
        }
        extent
    }
}
