//! End-to-end windowing scenarios on a headless grid.
//!
//! Geometry throughout: 100x80 cells, spacing 10, container 440x300, which
//! gives 4 columns and a row unit of 90.

use widgrid::integration::{sync_grid, ApplySummary};
use widgrid::model::{ValueUpdate, Widget};
use widgrid::source::{Simulator, StreamStore, WidgetStore};
use widgrid::view_state::{
    compute_total_height, CellGeometry, Clock, GridPhase, ManualClock, ViewportDimensions, VirtualGrid,
    VisibleRange, DEFAULT_SETTLE_DELAY,
};
use std::io::Cursor;
use std::thread;
use std::time::Duration;

// ===== Test Helpers =====

fn geometry() -> CellGeometry {
    CellGeometry::new(100, 80, 10).expect("valid geometry")
}

fn widgets(count: usize) -> Vec<Widget> {
    (0..count).map(|i| Widget::new(i as i64, 0)).collect()
}

fn attached_grid(count: usize) -> (ManualClock, VirtualGrid<ManualClock>) {
    let clock = ManualClock::new();
    let mut grid = VirtualGrid::new(geometry(), clock.clone(), DEFAULT_SETTLE_DELAY);
    grid.seed(widgets(count));
    grid.attach(ViewportDimensions::new(440, 300));
    (clock, grid)
}

fn settle(clock: &ManualClock, grid: &mut VirtualGrid<ManualClock>) -> bool {
    clock.advance(DEFAULT_SETTLE_DELAY);
    grid.tick()
}

// ===== Reference Scenarios =====

#[test]
fn sixty_widgets_at_top() {
    let (_, grid) = attached_grid(60);

    let layout = grid.layout().expect("layout");
    assert_eq!(layout.columns_per_row(), 4);
    assert_eq!(layout.total_rows(), 15);
    assert_eq!(grid.visible_range(), VisibleRange::new(0, 24));
    assert_eq!(grid.render_set().len(), 24);
    assert_eq!(grid.phase(), GridPhase::Windowed);
}

#[test]
fn sixty_widgets_scrolled_to_450() {
    let (clock, mut grid) = attached_grid(60);

    grid.on_scroll(450);
    assert_eq!(grid.visible_range(), VisibleRange::new(0, 24), "range waits for settle");

    assert!(settle(&clock, &mut grid));
    assert_eq!(grid.visible_range(), VisibleRange::new(16, 40));
    let indices: Vec<usize> = grid.render_set().entries().iter().map(|e| e.index).collect();
    assert_eq!(indices, (16..40).collect::<Vec<_>>());
}

#[test]
fn zero_widgets() {
    let (clock, mut grid) = attached_grid(0);

    assert_eq!(compute_total_height(0, 440, &geometry()), 0);
    assert_eq!(grid.total_height(), 0);
    assert!(grid.render_set().is_empty());
    assert_eq!(grid.visible_range(), VisibleRange::default());

    grid.on_scroll(90);
    settle(&clock, &mut grid);
    assert!(grid.render_set().is_empty());
    assert_eq!(grid.cells().count(), 0);
}

// ===== Scroll Settling =====

#[test]
fn burst_of_scrolls_recomputes_once_with_last_offset() {
    let (clock, mut grid) = attached_grid(60);
    let generation = grid.layout_generation();

    for offset in [90, 180, 270, 360, 450] {
        grid.on_scroll(offset);
        clock.advance(DEFAULT_SETTLE_DELAY / 2);
        assert!(!grid.tick(), "no recompute while scroll events keep coming");
    }

    assert!(settle(&clock, &mut grid));
    assert_eq!(grid.visible_range(), VisibleRange::new(16, 40));
    assert!(!grid.tick(), "only one recompute for the burst");
    assert_eq!(grid.layout_generation(), generation, "scrolling never relayouts");
}

#[test]
fn resize_relayouts_without_waiting() {
    let (_, mut grid) = attached_grid(60);
    let generation = grid.layout_generation();

    assert!(grid.on_resize(ViewportDimensions::new(220, 300)));
    let layout = grid.layout().expect("layout");
    assert_eq!(layout.columns_per_row(), 2);
    assert_eq!(layout.total_rows(), 30);
    assert_eq!(grid.visible_range(), VisibleRange::new(0, 12));
    assert_ne!(grid.layout_generation(), generation);
}

#[test]
fn resize_cancels_pending_scroll_settle() {
    let (clock, mut grid) = attached_grid(60);
    grid.on_scroll(450);
    grid.on_resize(ViewportDimensions::new(440, 600));

    assert!(!grid.has_pending_recompute());
    // The resize recompute already used the live offset.
    assert_eq!(grid.visible_range().start, 16);
    assert!(!settle(&clock, &mut grid));
}

#[test]
fn teardown_stops_everything() {
    let (clock, mut grid) = attached_grid(60);
    grid.on_scroll(450);
    grid.teardown();

    assert!(!settle(&clock, &mut grid));
    assert!(!grid.on_resize(ViewportDimensions::new(220, 300)));
    assert!(grid.render_set().is_empty());
    assert_eq!(grid.phase(), GridPhase::TornDown);
}

// ===== Collection Changes =====

#[test]
fn growing_collection_relayouts_and_keeps_range_start() {
    let (_, mut grid) = attached_grid(10);
    assert_eq!(grid.visible_range(), VisibleRange::new(0, 10));

    grid.seed(widgets(100));
    assert_eq!(grid.layout().map(|l| l.total_rows()), Some(25));
    assert_eq!(grid.visible_range(), VisibleRange::new(0, 24));
}

#[test]
fn shrinking_below_scroll_offset_keeps_range_in_bounds() {
    let (clock, mut grid) = attached_grid(60);
    grid.on_scroll(1050);
    settle(&clock, &mut grid);
    assert_eq!(grid.visible_range().end, 60);

    grid.seed(widgets(4));
    let range = grid.visible_range();
    assert!(range.start <= range.end && range.end <= 4);
}

#[test]
fn emptying_collection_returns_to_measured() {
    let (_, mut grid) = attached_grid(60);
    grid.seed(Vec::new());
    assert_eq!(grid.phase(), GridPhase::Measured);
    assert!(grid.layout().is_none());

    grid.seed(widgets(8));
    assert_eq!(grid.phase(), GridPhase::Windowed);
    assert_eq!(grid.visible_range(), VisibleRange::new(0, 8));
}

// ===== Stores =====

#[test]
fn simulator_updates_visible_and_hidden_widgets() {
    let (clock, mut grid) = attached_grid(60);
    let mut store = Simulator::new(widgets(60), Duration::from_secs(1), clock.now());
    let mut subscription = store.subscribe();

    clock.advance(Duration::from_secs(1));
    let polled = store.poll(clock.now()).expect("simulator never fails");
    assert_eq!(polled.published, 60);

    let summary = sync_grid(&mut grid, &store, &mut subscription);
    assert_eq!(
        summary,
        ApplySummary {
            rendered: 24,
            absorbed: 36,
            unchanged: 0,
            dropped: 0,
            reseeded: false,
        }
    );
    assert!(grid.widgets().as_slice().iter().all(|w| w.value == 1));
}

#[test]
fn stream_store_drives_grid_to_completion() {
    let (_, mut grid) = attached_grid(60);
    let input = concat!(
        "{\"id\": 3, \"value\": 77}\n",
        "\n",
        "{\"id\": 50, \"value\": -20}\n",
        "{\"id\": 999, \"value\": 1}\n",
        "not json\n",
    );
    let mut store = StreamStore::from_reader(widgets(60), Cursor::new(input.to_string()));
    let mut subscription = store.subscribe();

    let mut dropped = 0;
    let mut total = ApplySummary::default();
    for _ in 0..400 {
        let polled = store.poll(std::time::Instant::now()).expect("poll");
        dropped += polled.dropped.len();
        let summary = sync_grid(&mut grid, &store, &mut subscription);
        total.rendered += summary.rendered;
        total.absorbed += summary.absorbed;
        total.dropped += summary.dropped;
        if store.is_complete() {
            break;
        }
        thread::sleep(Duration::from_millis(5));
    }

    assert!(store.is_complete());
    assert_eq!(total.rendered, 1, "widget 3 is on screen");
    assert_eq!(total.absorbed, 1, "widget 50 is off screen");
    assert_eq!(dropped, 2, "unknown id and malformed line");
    assert_eq!(grid.render_set().entry(3).map(|e| e.widget.value), Some(77));
    assert_eq!(grid.widgets().get(50).map(|w| w.value), Some(-20));
}

#[test]
fn stream_reseed_line_replaces_grid_sequence() {
    let (_, mut grid) = attached_grid(60);
    let input = "[{\"id\": \"a\", \"value\": 1}, {\"id\": \"b\", \"value\": 2}]\n";
    let mut store = StreamStore::from_reader(widgets(60), Cursor::new(input.to_string()));
    let mut subscription = store.subscribe();

    let mut reseeded = false;
    for _ in 0..400 {
        store.poll(std::time::Instant::now()).expect("poll");
        reseeded |= sync_grid(&mut grid, &store, &mut subscription).reseeded;
        if store.is_complete() {
            break;
        }
        thread::sleep(Duration::from_millis(5));
    }

    assert!(reseeded);
    assert_eq!(grid.widgets().len(), 2);
    assert_eq!(grid.visible_range(), VisibleRange::new(0, 2));

    let outcome = grid.apply_update(&ValueUpdate::new("b", 9));
    assert!(matches!(outcome, widgrid::view_state::UpdateOutcome::Rendered { index: 1 }));
}
