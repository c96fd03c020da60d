//! Engine facade: series registration, viewport control, cached label
//! generation and frame building.

mod config;
mod frame_builder;
mod label_state;

pub use config::{GraphConfig, GraphPalette, VerticalLabelPolicy};
pub use label_state::LabelCacheStats;

use tracing::debug;

use crate::axis::{self, LabelFormatterFn, LabelSet, VerticalLabelCount};
use crate::core::{
    DataPoint, Series, SeriesId, SeriesPaint, SeriesStore, Surface, Viewport, YExtent,
    derive_y_extent, visible_y_range, windowing,
};
use crate::error::{GraphError, GraphResult};
use crate::interaction::{GestureController, GestureEffect, PointerEvent};
use crate::render::{ChartStyle, LineStyle, Renderer};
use label_state::AxisLabelCache;

/// The chart core: owns the series store, the viewport and the label
/// caches, and drives a host-provided renderer.
///
/// All methods run on the render thread; the only cross-thread access is
/// producers appending through cloned [`Series`] handles.
pub struct GraphEngine<R: Renderer> {
    renderer: R,
    config: GraphConfig,
    store: SeriesStore,
    viewport: Viewport,
    gestures: GestureController,
    horizontal_cache: AxisLabelCache,
    vertical_cache: AxisLabelCache,
    manual_y: Option<(f64, f64)>,
    formatter: Option<LabelFormatterFn>,
    chart_style: Box<dyn ChartStyle>,
}

impl<R: Renderer> std::fmt::Debug for GraphEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphEngine")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("viewport", &self.viewport)
            .field("gestures", &self.gestures)
            .field("horizontal_cache", &self.horizontal_cache)
            .field("vertical_cache", &self.vertical_cache)
            .field("manual_y", &self.manual_y)
            .field("formatter", &self.formatter.is_some())
            .finish_non_exhaustive()
    }
}

impl<R: Renderer> GraphEngine<R> {
    pub fn new(renderer: R, config: GraphConfig) -> GraphResult<Self> {
        if !config.surface.is_valid() {
            return Err(GraphError::InvalidArgument(format!(
                "invalid surface: {}x{}",
                config.surface.width, config.surface.height
            )));
        }

        Ok(Self {
            renderer,
            config,
            store: SeriesStore::new(),
            viewport: Viewport::new(),
            gestures: GestureController::new(f64::from(config.surface.width)),
            horizontal_cache: AxisLabelCache::default(),
            vertical_cache: AxisLabelCache::default(),
            manual_y: None,
            formatter: None,
            chart_style: Box::new(LineStyle::default()),
        })
    }

    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    // ---- series management -------------------------------------------------

    /// Registers a new series; labels are regenerated on the next frame.
    pub fn add_series(&mut self, points: Vec<DataPoint>, paint: SeriesPaint) -> SeriesId {
        let id = self.store.register(points, paint);
        self.invalidate_labels();
        id
    }

    pub fn add_series_with_description(
        &mut self,
        points: Vec<DataPoint>,
        paint: SeriesPaint,
        description: impl Into<String>,
    ) -> SeriesId {
        let id = self.add_series(points, paint);
        if let Some(series) = self.store.get_mut(id) {
            series.set_description(description);
        }
        id
    }

    /// Clonable handle sharing the series' point storage, for producer
    /// threads appending while the chart renders.
    #[must_use]
    pub fn series_handle(&self, id: SeriesId) -> Option<Series> {
        self.store.get(id).cloned()
    }

    /// Removes the series at a registration-order index.
    pub fn remove_series(&mut self, index: usize) -> GraphResult<()> {
        self.store.remove_at(index)?;
        self.invalidate_labels();
        Ok(())
    }

    pub fn remove_all_series(&mut self) {
        self.store.clear();
        self.invalidate_labels();
    }

    /// Swaps a series' whole point list; the unit of update.
    pub fn replace_series_data(&mut self, id: SeriesId, points: Vec<DataPoint>) -> GraphResult<()> {
        let series = self.store.get(id).ok_or_else(|| {
            GraphError::InvalidArgument(format!("unknown series id {}", id.raw()))
        })?;
        series.replace(points);
        self.invalidate_labels();
        Ok(())
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    // ---- viewport ----------------------------------------------------------

    /// Stores the window verbatim and invalidates cached labels.
    pub fn set_window(&mut self, start: f64, size: f64) -> GraphResult<()> {
        self.viewport.set_window(start, size)?;
        self.invalidate_labels();
        Ok(())
    }

    /// `(start, size)` exactly as last stored.
    #[must_use]
    pub fn window(&self) -> (f64, f64) {
        self.viewport.window()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_initial_bounds(&mut self, start: f64, end: f64) {
        self.viewport.set_initial_bounds(start, end);
        self.invalidate_labels();
    }

    #[must_use]
    pub fn effective_domain(&self) -> (f64, f64) {
        self.viewport.effective_domain(&self.store)
    }

    /// Scrolls the window so it ends at the domain maximum.
    ///
    /// Fails with `IllegalState` when the chart is not scrollable. Only the
    /// label sets are invalidated, so text metrics caches in the host do not
    /// flicker.
    pub fn scroll_to_end(&mut self) -> GraphResult<()> {
        if !self.config.scrollable {
            return Err(GraphError::IllegalState(
                "this chart is not scrollable".to_owned(),
            ));
        }
        let (_, max_x) = self.viewport.full_domain(&self.store);
        let size = self.viewport.size();
        self.viewport.set_window(max_x - size, size)?;
        self.invalidate_labels();
        Ok(())
    }

    // ---- behavior flags ----------------------------------------------------

    pub fn set_scrollable(&mut self, scrollable: bool) {
        self.config.scrollable = scrollable;
    }

    /// Enabling scaling forces the chart scrollable as well.
    pub fn set_scalable(&mut self, scalable: bool) {
        self.config.scalable = scalable;
        if scalable {
            self.config.scrollable = true;
        }
    }

    pub fn set_disable_touch(&mut self, disable_touch: bool) {
        self.config.disable_touch = disable_touch;
    }

    /// Applies a new surface size, e.g. after a host resize.
    pub fn resize(&mut self, surface: Surface) -> GraphResult<()> {
        if !surface.is_valid() {
            return Err(GraphError::InvalidArgument(format!(
                "invalid surface: {}x{}",
                surface.width, surface.height
            )));
        }
        self.config.surface = surface;
        self.gestures.set_view_width(f64::from(surface.width));
        self.invalidate_labels();
        Ok(())
    }

    // ---- input -------------------------------------------------------------

    /// Feeds one pointer event through the gesture state machine.
    ///
    /// Returns the applied effect, `None` while a gesture is still in
    /// flight or when touch input is disabled.
    pub fn pointer_event(&mut self, event: PointerEvent) -> GraphResult<Option<GestureEffect>> {
        if self.config.disable_touch {
            return Ok(None);
        }
        let effect = self
            .gestures
            .handle_event(event, &mut self.viewport, &self.store)?;
        if matches!(
            effect,
            Some(GestureEffect::WindowChanged | GestureEffect::ResetApplied)
        ) {
            self.invalidate_labels();
        }
        Ok(effect)
    }

    /// Pinch zoom around the window center; a no-op unless scalable.
    pub fn pinch_scale(&mut self, factor: f64) -> GraphResult<()> {
        if !self.config.scalable || self.config.disable_touch {
            debug!(factor, "pinch ignored: scaling disabled");
            return Ok(());
        }
        self.gestures
            .apply_scale(factor, &mut self.viewport, &self.store)?;
        self.invalidate_labels();
        Ok(())
    }

    // ---- axis / labels -----------------------------------------------------

    /// Pins the Y extent, disabling auto-derivation until cleared.
    pub fn set_manual_y_bounds(&mut self, min: f64, max: f64) {
        self.manual_y = Some((min, max));
        self.vertical_cache.invalidate();
    }

    pub fn clear_manual_y_bounds(&mut self) {
        self.manual_y = None;
        self.vertical_cache.invalidate();
    }

    #[must_use]
    pub fn manual_y_bounds(&self) -> Option<(f64, f64)> {
        self.manual_y
    }

    /// Registers a custom label formatter consulted before the defaults.
    pub fn set_label_formatter(&mut self, formatter: LabelFormatterFn) {
        self.formatter = Some(formatter);
        self.invalidate_labels();
    }

    pub fn clear_label_formatter(&mut self) {
        self.formatter = None;
        self.invalidate_labels();
    }

    /// Pins static horizontal labels; `None` restores generation.
    pub fn set_horizontal_labels(&mut self, labels: Option<Vec<String>>) {
        let pinned = labels.map(|labels| self.pinned_set(labels));
        self.horizontal_cache.pin(pinned);
    }

    /// Pins static vertical labels; `None` restores generation.
    pub fn set_vertical_labels(&mut self, labels: Option<Vec<String>>) {
        let pinned = labels.map(|labels| self.pinned_set(labels));
        self.vertical_cache.pin(pinned);
    }

    fn pinned_set(&self, labels: Vec<String>) -> LabelSet {
        let (start, end) = self.effective_domain();
        let intervals = labels.len().saturating_sub(1).max(1);
        LabelSet::from_strings(labels, (end - start) / intervals as f64)
    }

    /// Current horizontal tick labels, generating (and snapping the
    /// viewport) when stale.
    pub fn horizontal_labels(&mut self) -> GraphResult<LabelSet> {
        self.ensure_horizontal_labels()
    }

    /// Current vertical tick labels, generating when stale.
    pub fn vertical_labels(&mut self) -> GraphResult<LabelSet> {
        self.ensure_vertical_labels()
    }

    /// The Y range the chart would use right now.
    #[must_use]
    pub fn y_extent(&self) -> YExtent {
        let slices = windowing::visible_slices(&self.store, self.viewport);
        self.derive_extent(&slices)
    }

    #[must_use]
    pub fn horizontal_cache_stats(&self) -> LabelCacheStats {
        self.horizontal_cache.stats()
    }

    #[must_use]
    pub fn vertical_cache_stats(&self) -> LabelCacheStats {
        self.vertical_cache.stats()
    }

    // ---- windowed data -----------------------------------------------------

    /// Visible slice of one series, with overscan sentinels.
    #[must_use]
    pub fn visible_points(&self, id: SeriesId) -> Option<Vec<DataPoint>> {
        self.store
            .get(id)
            .map(|series| windowing::visible_slice(series, self.viewport))
    }

    /// Visible slices of every series.
    #[must_use]
    pub fn visible_slices(&self) -> Vec<(SeriesId, Vec<DataPoint>)> {
        windowing::visible_slices(&self.store, self.viewport)
    }

    // ---- style -------------------------------------------------------------

    pub fn set_chart_style(&mut self, style: Box<dyn ChartStyle>) {
        self.chart_style = style;
    }

    /// Marks every cached label set stale; pinned static sets are kept.
    pub fn invalidate_labels(&mut self) {
        self.horizontal_cache.invalidate();
        self.vertical_cache.invalidate();
    }

    // ---- internals ---------------------------------------------------------

    fn ensure_horizontal_labels(&mut self) -> GraphResult<LabelSet> {
        if let Some(set) = self.horizontal_cache.lookup() {
            return Ok(set);
        }

        let (domain_start, domain_end) = self.viewport.effective_domain(&self.store);
        let (set, outcome) = axis::horizontal_labels(
            domain_start,
            domain_end,
            self.config.axis_time_zone,
            self.config.default_horizontal_labels,
            self.formatter.as_ref(),
        );

        // Snapping rewrites the visible window so ticks land on gridlines.
        if !self.viewport.is_unset() {
            let snapped_start = outcome.start_ms as f64;
            let snapped_size = outcome.span_ms() as f64;
            if (snapped_start, snapped_size) != self.viewport.window() {
                self.viewport.set_window(snapped_start, snapped_size)?;
                self.vertical_cache.invalidate();
            }
        }

        self.horizontal_cache.store(set.clone());
        Ok(set)
    }

    fn ensure_vertical_labels(&mut self) -> GraphResult<LabelSet> {
        if let Some(set) = self.vertical_cache.lookup() {
            return Ok(set);
        }

        let slices = windowing::visible_slices(&self.store, self.viewport);
        let extent = self.derive_extent(&slices);
        let count = match self.config.vertical_labels {
            VerticalLabelPolicy::Fixed(count) => VerticalLabelCount::Fixed(count),
            VerticalLabelPolicy::Auto => VerticalLabelCount::Auto {
                graph_height: self.plot_height(),
                label_text_height: self.config.label_text_height_px,
            },
        };

        let set = axis::vertical_labels(
            extent,
            count,
            self.config.axis_time_zone,
            self.formatter.as_ref(),
        );
        self.vertical_cache.store(set.clone());
        Ok(set)
    }

    fn derive_extent(&self, slices: &[(SeriesId, Vec<DataPoint>)]) -> YExtent {
        match self.manual_y {
            Some((min, max)) => derive_y_extent(min, max, true),
            None => {
                let (min, max) =
                    visible_y_range(slices.iter().map(|(_, points)| points.as_slice()))
                        .unwrap_or((0.0, 0.0));
                derive_y_extent(min, max, false)
            }
        }
    }

    pub(super) fn border(&self) -> f64 {
        self.config.border_px + self.config.label_text_height_px
    }

    pub(super) fn plot_height(&self) -> f64 {
        f64::from(self.config.surface.height) - 2.0 * self.border()
    }

    pub(super) fn plot_width(&self) -> f64 {
        f64::from(self.config.surface.width) - 1.0
    }
}
