use std::thread;

use timegraph::GraphError;
use timegraph::api::{GraphConfig, GraphEngine, VerticalLabelPolicy};
use timegraph::axis::AxisTimeZone;
use timegraph::core::{DataPoint, SeriesPaint, Surface};
use timegraph::render::NullRenderer;

fn ramp(from: f64, to: f64, step: f64) -> Vec<DataPoint> {
    let mut points = Vec::new();
    let mut x = from;
    while x <= to {
        points.push(DataPoint::new(x, x / 2.0));
        x += step;
    }
    points
}

fn build_engine() -> GraphEngine<NullRenderer> {
    let config = GraphConfig::new(Surface::new(1000, 600));
    GraphEngine::new(NullRenderer::default(), config).expect("engine init")
}

#[test]
fn engine_rejects_an_empty_surface() {
    let config = GraphConfig::new(Surface::new(0, 600));
    let err = GraphEngine::new(NullRenderer::default(), config).expect_err("must fail");
    assert!(matches!(err, GraphError::InvalidArgument(_)));
}

#[test]
fn removing_a_series_at_a_bad_index_reports_out_of_bounds() {
    let mut engine = build_engine();
    engine.add_series(ramp(0.0, 10.0, 1.0), SeriesPaint::default());

    let err = engine.remove_series(3).expect_err("bad index must fail");
    assert!(matches!(
        err,
        GraphError::IndexOutOfBounds { index: 3, len: 1 }
    ));

    engine.remove_series(0).expect("valid removal");
    assert_eq!(engine.series_count(), 0);
}

#[test]
fn scroll_to_end_requires_a_scrollable_chart() {
    let mut engine = build_engine();
    engine.add_series(ramp(0.0, 100.0, 10.0), SeriesPaint::default());
    engine.set_window(0.0, 30.0).expect("set window");

    let err = engine.scroll_to_end().expect_err("must fail");
    assert!(matches!(err, GraphError::IllegalState(_)));
    assert_eq!(engine.window(), (0.0, 30.0));

    engine.set_scrollable(true);
    engine.scroll_to_end().expect("scroll");
    assert_eq!(engine.window(), (70.0, 30.0));
}

#[test]
fn enabling_scaling_forces_scrolling() {
    let mut engine = build_engine();
    assert!(!engine.config().scrollable);
    engine.set_scalable(true);
    assert!(engine.config().scrollable);
}

#[test]
fn replace_series_data_swaps_the_point_list() {
    let mut engine = build_engine();
    let id = engine.add_series(ramp(0.0, 10.0, 1.0), SeriesPaint::default());

    engine
        .replace_series_data(id, ramp(50.0, 80.0, 10.0))
        .expect("replace");
    assert_eq!(engine.effective_domain(), (50.0, 80.0));

    engine.remove_all_series();
    let err = engine
        .replace_series_data(id, Vec::new())
        .expect_err("unknown id must fail");
    assert!(matches!(err, GraphError::InvalidArgument(_)));
}

#[test]
fn producer_thread_appends_through_a_series_handle() {
    let mut engine = build_engine();
    let id = engine.add_series(ramp(0.0, 50.0, 10.0), SeriesPaint::default());
    let handle = engine.series_handle(id).expect("handle");

    let producer = thread::spawn(move || {
        for i in 1..=5 {
            handle.append(DataPoint::new(50.0 + i as f64 * 10.0, 1.0));
        }
    });
    producer.join().expect("producer thread");

    assert_eq!(engine.effective_domain(), (0.0, 100.0));
    let slice = engine.visible_points(id).expect("slice");
    assert_eq!(slice.len(), 11);
}

#[test]
fn rendering_drives_the_backend_once_per_frame() {
    let mut engine = build_engine();
    engine.add_series(ramp(0.0, 100.0, 5.0), SeriesPaint::default());
    engine.set_manual_y_bounds(0.0, 60.0);

    engine.render().expect("render");
    assert_eq!(engine.renderer().frames_rendered, 1);
    assert!(engine.renderer().last_line_count > 0);
    assert!(engine.renderer().last_text_count > 0);
}

#[test]
fn label_caches_report_hits_after_the_first_generation() {
    let mut engine = build_engine();
    engine.add_series(ramp(0.0, 100.0, 5.0), SeriesPaint::default());

    engine.vertical_labels().expect("labels");
    engine.vertical_labels().expect("labels");

    let stats = engine.vertical_cache_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
}

#[test]
fn config_round_trips_through_json() {
    let config = GraphConfig::new(Surface::new(800, 480))
        .with_axis_time_zone(AxisTimeZone::fixed_east(3_600).expect("offset"))
        .with_vertical_labels(VerticalLabelPolicy::Auto)
        .with_default_horizontal_labels(6)
        .with_scalable(true);

    let json = serde_json::to_string(&config).expect("serialize");
    let restored: GraphConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, config);
}

#[test]
fn resize_updates_the_surface_and_validates_it() {
    let mut engine = build_engine();
    engine.resize(Surface::new(1920, 1080)).expect("resize");
    assert_eq!(engine.config().surface, Surface::new(1920, 1080));

    let err = engine.resize(Surface::new(0, 0)).expect_err("must fail");
    assert!(matches!(err, GraphError::InvalidArgument(_)));
}
