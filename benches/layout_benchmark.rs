//! Layout and windowing benchmarks at 100k widgets.
//!
//! Run with: cargo bench --bench layout_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use widgrid::model::{ValueUpdate, Widget};
use widgrid::view_state::{
    compute_layout, compute_visible_range, CellGeometry, ManualClock, ViewportDimensions,
    VirtualGrid, DEFAULT_SETTLE_DELAY,
};

const WIDGET_COUNT: usize = 100_000;

fn geometry() -> CellGeometry {
    CellGeometry::new(14, 4, 1).expect("valid geometry")
}

fn attached_grid() -> (ManualClock, VirtualGrid<ManualClock>) {
    let clock = ManualClock::new();
    let mut grid = VirtualGrid::new(geometry(), clock.clone(), DEFAULT_SETTLE_DELAY);
    grid.seed((0..WIDGET_COUNT).map(|i| Widget::new(i as i64, 0)).collect());
    grid.attach(ViewportDimensions::new(200, 60));
    (clock, grid)
}

fn bench_compute_layout(c: &mut Criterion) {
    let geometry = geometry();
    let mut group = c.benchmark_group("compute_layout");
    for width in [80u32, 200, 400] {
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &width| {
            b.iter(|| compute_layout(black_box(WIDGET_COUNT), black_box(width), &geometry));
        });
    }
    group.finish();
}

fn bench_visible_range(c: &mut Criterion) {
    let geometry = geometry();
    let layout = compute_layout(WIDGET_COUNT, 200, &geometry);
    c.bench_function("compute_visible_range", |b| {
        b.iter(|| {
            compute_visible_range(
                black_box(250_000),
                black_box(60),
                layout.columns_per_row(),
                layout.total_rows(),
                &geometry,
                WIDGET_COUNT,
            )
        });
    });
}

fn bench_scroll_settle(c: &mut Criterion) {
    c.bench_function("scroll_settle_100k", |b| {
        b.iter_batched(
            attached_grid,
            |(clock, mut grid)| {
                grid.on_scroll(black_box(250_000));
                clock.advance(DEFAULT_SETTLE_DELAY);
                grid.tick()
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_value_update(c: &mut Criterion) {
    let (_, mut grid) = attached_grid();
    let mut value = 0i64;
    c.bench_function("apply_update_offscreen", |b| {
        b.iter(|| {
            value += 1;
            grid.apply_update(black_box(&ValueUpdate::new(90_000i64, value)))
        });
    });
}

fn bench_resize(c: &mut Criterion) {
    c.bench_function("resize_relayout_100k", |b| {
        b.iter_batched(
            attached_grid,
            |(_, mut grid)| grid.on_resize(black_box(ViewportDimensions::new(120, 60))),
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_compute_layout,
    bench_visible_range,
    bench_scroll_settle,
    bench_value_update,
    bench_resize
);
criterion_main!(benches);
