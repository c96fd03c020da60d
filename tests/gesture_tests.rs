use approx::assert_relative_eq;
use timegraph::GraphError;
use timegraph::api::{GraphConfig, GraphEngine};
use timegraph::core::{DataPoint, SeriesPaint, Surface};
use timegraph::interaction::{GestureEffect, PointerEvent};
use timegraph::render::NullRenderer;

fn dense_points() -> Vec<DataPoint> {
    (0..=20)
        .map(|i| DataPoint::new(i as f64 * 5.0, i as f64))
        .collect()
}

fn build_engine(points: Vec<DataPoint>) -> GraphEngine<NullRenderer> {
    let config = GraphConfig::new(Surface::new(1000, 600));
    let mut engine = GraphEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.add_series(points, SeriesPaint::default());
    engine
}

fn down(id: u32, x: f64) -> PointerEvent {
    PointerEvent::Down {
        id,
        x,
        y: 10.0,
    }
}

fn extra_down(id: u32, x: f64) -> PointerEvent {
    PointerEvent::ExtraDown {
        id,
        x,
        y: 10.0,
    }
}

#[test]
fn two_finger_lift_remaps_the_window() {
    let mut engine = build_engine(dense_points());
    engine.set_window(0.0, 100.0).expect("set window");

    assert_eq!(engine.pointer_event(down(0, 100.0)).expect("event"), None);
    assert_eq!(
        engine.pointer_event(extra_down(1, 600.0)).expect("event"),
        Some(GestureEffect::CaptureInput)
    );
    let effect = engine
        .pointer_event(PointerEvent::ExtraUp { time_ms: 500.0 })
        .expect("event");

    assert_eq!(effect, Some(GestureEffect::WindowChanged));
    let (start, size) = engine.window();
    assert_relative_eq!(start, 10.0, epsilon = 1e-9);
    assert_relative_eq!(size, 50.0, epsilon = 1e-9);
}

#[test]
fn pointer_order_does_not_matter_for_the_remap() {
    let mut engine = build_engine(dense_points());
    engine.set_window(0.0, 100.0).expect("set window");

    // Second pointer lands left of the first.
    engine.pointer_event(down(0, 600.0)).expect("event");
    engine.pointer_event(extra_down(1, 100.0)).expect("event");
    engine
        .pointer_event(PointerEvent::ExtraUp { time_ms: 500.0 })
        .expect("event");

    let (start, size) = engine.window();
    assert_relative_eq!(start, 10.0, epsilon = 1e-9);
    assert_relative_eq!(size, 50.0, epsilon = 1e-9);
}

#[test]
fn sparse_target_window_is_rejected_and_reverted_exactly() {
    let sparse = vec![
        DataPoint::new(0.0, 1.0),
        DataPoint::new(30.0, 2.0),
        DataPoint::new(60.0, 3.0),
        DataPoint::new(90.0, 4.0),
    ];
    let mut engine = build_engine(sparse);
    engine.set_window(0.0, 100.0).expect("set window");

    engine.pointer_event(down(0, 100.0)).expect("event");
    engine.pointer_event(extra_down(1, 600.0)).expect("event");
    let effect = engine
        .pointer_event(PointerEvent::ExtraUp { time_ms: 500.0 })
        .expect("event");

    assert_eq!(effect, Some(GestureEffect::WindowRejected));
    assert_eq!(engine.window(), (0.0, 100.0));
}

#[test]
fn moves_update_the_tracked_pointers() {
    let mut engine = build_engine(dense_points());
    engine.set_window(0.0, 100.0).expect("set window");

    engine.pointer_event(down(0, 50.0)).expect("event");
    engine.pointer_event(extra_down(1, 500.0)).expect("event");
    engine
        .pointer_event(PointerEvent::Move {
            id: 0,
            x: 100.0,
            y: 20.0,
        })
        .expect("event");
    engine
        .pointer_event(PointerEvent::Move {
            id: 1,
            x: 600.0,
            y: 25.0,
        })
        .expect("event");
    engine
        .pointer_event(PointerEvent::ExtraUp { time_ms: 700.0 })
        .expect("event");

    let (start, size) = engine.window();
    assert_relative_eq!(start, 10.0, epsilon = 1e-9);
    assert_relative_eq!(size, 50.0, epsilon = 1e-9);
}

#[test]
fn double_tap_resets_to_initial_bounds() {
    let mut engine = build_engine(dense_points());
    engine.set_initial_bounds(0.0, 100.0);
    engine.set_window(20.0, 30.0).expect("set window");

    engine.pointer_event(down(0, 400.0)).expect("event");
    assert_eq!(
        engine
            .pointer_event(PointerEvent::Up { time_ms: 1_000.0 })
            .expect("event"),
        None
    );
    engine.pointer_event(down(0, 402.0)).expect("event");
    let effect = engine
        .pointer_event(PointerEvent::Up { time_ms: 1_200.0 })
        .expect("event");

    assert_eq!(effect, Some(GestureEffect::ResetApplied));
    assert_eq!(engine.window(), (0.0, 100.0));
}

#[test]
fn slow_second_tap_does_not_reset() {
    let mut engine = build_engine(dense_points());
    engine.set_initial_bounds(0.0, 100.0);
    engine.set_window(20.0, 30.0).expect("set window");

    engine.pointer_event(down(0, 400.0)).expect("event");
    engine
        .pointer_event(PointerEvent::Up { time_ms: 1_000.0 })
        .expect("event");
    engine.pointer_event(down(0, 400.0)).expect("event");
    let effect = engine
        .pointer_event(PointerEvent::Up { time_ms: 1_400.0 })
        .expect("event");

    assert_eq!(effect, None);
    assert_eq!(engine.window(), (20.0, 30.0));
}

#[test]
fn touch_can_be_disabled_entirely() {
    let config = GraphConfig::new(Surface::new(1000, 600)).with_disable_touch(true);
    let mut engine = GraphEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.add_series(dense_points(), SeriesPaint::default());
    engine.set_window(0.0, 100.0).expect("set window");

    engine.pointer_event(down(0, 100.0)).expect("event");
    engine.pointer_event(extra_down(1, 600.0)).expect("event");
    let effect = engine
        .pointer_event(PointerEvent::ExtraUp { time_ms: 500.0 })
        .expect("event");

    assert_eq!(effect, None);
    assert_eq!(engine.window(), (0.0, 100.0));
}

#[test]
fn pinch_zooms_around_the_window_center() {
    let config = GraphConfig::new(Surface::new(1000, 600)).with_scalable(true);
    let mut engine = GraphEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.add_series(dense_points(), SeriesPaint::default());

    engine.set_window(40.0, 30.0).expect("set window");
    engine.pinch_scale(0.5).expect("pinch");
    assert_eq!(engine.window(), (25.0, 60.0));
}

#[test]
fn pinch_shifts_left_when_the_window_overruns_the_domain() {
    let config = GraphConfig::new(Surface::new(1000, 600)).with_scalable(true);
    let mut engine = GraphEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.add_series(dense_points(), SeriesPaint::default());

    engine.set_window(80.0, 15.0).expect("set window");
    engine.pinch_scale(0.25).expect("pinch");
    assert_eq!(engine.window(), (40.0, 60.0));
}

#[test]
fn pinch_clamps_to_the_full_domain_at_maximum_zoom_out() {
    let config = GraphConfig::new(Surface::new(1000, 600)).with_scalable(true);
    let mut engine = GraphEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.add_series(dense_points(), SeriesPaint::default());

    engine.set_window(10.0, 80.0).expect("set window");
    engine.pinch_scale(0.5).expect("pinch");
    assert_eq!(engine.window(), (0.0, 100.0));
}

#[test]
fn pinch_is_ignored_when_not_scalable() {
    let mut engine = build_engine(dense_points());
    engine.set_window(40.0, 30.0).expect("set window");
    engine.pinch_scale(0.5).expect("pinch ignored");
    assert_eq!(engine.window(), (40.0, 30.0));
}

#[test]
fn pinch_rejects_a_non_positive_factor() {
    let config = GraphConfig::new(Surface::new(1000, 600)).with_scalable(true);
    let mut engine = GraphEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.add_series(dense_points(), SeriesPaint::default());
    engine.set_window(40.0, 30.0).expect("set window");

    let err = engine.pinch_scale(0.0).expect_err("zero factor must fail");
    assert!(matches!(err, GraphError::InvalidArgument(_)));
    assert_eq!(engine.window(), (40.0, 30.0));
}
