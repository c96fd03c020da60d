use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use timegraph::axis::{AxisTimeZone, VerticalLabelCount, horizontal_labels, vertical_labels};
use timegraph::core::{DataPoint, Viewport, YExtent, visible_slice_of};

fn bench_visible_slice_10k(c: &mut Criterion) {
    let points: Vec<DataPoint> = (0..10_000)
        .map(|i| DataPoint::new(i as f64 * 1_000.0, (i % 100) as f64))
        .collect();
    let mut viewport = Viewport::new();
    viewport
        .set_window(2_500_000.0, 1_000_000.0)
        .expect("valid window");

    c.bench_function("visible_slice_10k", |b| {
        b.iter(|| {
            let _ = visible_slice_of(black_box(&points), black_box(viewport));
        })
    });
}

fn bench_horizontal_labels_five_day_span(c: &mut Criterion) {
    // 2023-06-01T00:00:00Z, five days visible.
    let start = 1_685_577_600_000_f64;
    let end = start + 5.0 * 24.0 * 3_600_000.0;

    c.bench_function("horizontal_labels_five_day_span", |b| {
        b.iter(|| {
            let _ = horizontal_labels(
                black_box(start),
                black_box(end),
                AxisTimeZone::Utc,
                5,
                None,
            );
        })
    });
}

fn bench_vertical_labels_fixed_six(c: &mut Criterion) {
    let extent = YExtent::new(0.0, 800.0);

    c.bench_function("vertical_labels_fixed_six", |b| {
        b.iter(|| {
            let _ = vertical_labels(
                black_box(extent),
                VerticalLabelCount::Fixed(6),
                AxisTimeZone::Utc,
                None,
            );
        })
    });
}

criterion_group!(
    benches,
    bench_visible_slice_10k,
    bench_horizontal_labels_five_day_span,
    bench_vertical_labels_fixed_six
);
criterion_main!(benches);
