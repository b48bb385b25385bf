//! Glue between a store and a grid for the main event loop.
//!
//! These functions have no terminal or I/O dependencies so the wiring can be
//! tested with a manual clock and in-memory stores.

use crate::source::{StoreEvent, Subscription, WidgetStore};
use crate::view_state::{Clock, UpdateOutcome, VirtualGrid};
use std::time::Duration;

/// What happened when a batch of store events reached the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    /// Updates that changed a realized cell.
    pub rendered: usize,
    /// Updates stored for widgets outside the visible range.
    pub absorbed: usize,
    /// Updates that repeated a widget's current value.
    pub unchanged: usize,
    /// Updates the grid could not apply.
    pub dropped: usize,
    /// Whether the grid was re-seeded from the store.
    pub reseeded: bool,
}

impl ApplySummary {
    /// Whether anything on screen may have changed.
    pub fn needs_redraw(&self) -> bool {
        self.rendered > 0 || self.reseeded
    }
}

/// Feed store events into the grid, oldest first.
///
/// A `Reseeded` event replaces the grid's sequence with the store's current
/// one. Value events that precede it in the batch are applied first and then
/// superseded; ones that follow it land on the new sequence.
pub fn apply_events<C, S>(
    grid: &mut VirtualGrid<C>,
    store: &S,
    events: Vec<StoreEvent>,
) -> ApplySummary
where
    C: Clock,
    S: WidgetStore + ?Sized,
{
    let mut summary = ApplySummary::default();
    for event in events {
        match event {
            StoreEvent::Value(update) => match grid.apply_update(&update) {
                UpdateOutcome::Rendered { .. } => summary.rendered += 1,
                UpdateOutcome::Absorbed { .. } => summary.absorbed += 1,
                UpdateOutcome::Unchanged { .. } => summary.unchanged += 1,
                UpdateOutcome::Dropped(_) => summary.dropped += 1,
                UpdateOutcome::Ignored => {}
            },
            StoreEvent::Reseeded => {
                grid.seed(store.current_widgets());
                summary.reseeded = true;
            }
        }
    }
    summary
}

/// Drain a subscription into the grid.
pub fn sync_grid<C, S>(
    grid: &mut VirtualGrid<C>,
    store: &S,
    subscription: &mut Subscription,
) -> ApplySummary
where
    C: Clock,
    S: WidgetStore + ?Sized,
{
    let events = subscription.drain();
    apply_events(grid, store, events)
}

/// How long the event loop may block waiting for input.
///
/// The earliest of the grid's settle deadline and the store's wakeup,
/// capped at `idle`.
pub fn poll_timeout(
    settle_due: Option<Duration>,
    store_wakeup: Option<Duration>,
    idle: Duration,
) -> Duration {
    [settle_due, store_wakeup]
        .into_iter()
        .flatten()
        .fold(idle, Duration::min)
}
