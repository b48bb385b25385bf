//! One virtualized grid instance.
//!
//! `VirtualGrid` owns the working widget sequence, the current layout
//! generation, the visible range and the render set, and moves them through
//! the grid lifecycle:
//!
//! ```text
//! Uninitialized → Measured → LaidOut → Windowed ⟲ → TornDown
//! ```
//!
//! Layout and range are always derived from the same `LayoutState`: the
//! layout is swapped in whole, then the range is computed from it in the same
//! call. Value updates patch the render set without touching either.

use super::layout::{compute_total_height, Layout, LayoutState};
use super::layout_params::LayoutParams;
use super::render_set::RenderSet;
use super::scheduler::{Clock, SystemClock};
use super::tracker::{Recompute, ViewportTracker};
use super::types::{CellGeometry, ViewportDimensions, ViewportState};
use super::visible_range::{compute_visible_range, VisibleRange};
use crate::model::{UpdateError, ValueUpdate, Widget, WidgetCollection, WidgetId};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Lifecycle phase of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridPhase {
    /// Container size not yet known.
    Uninitialized,
    /// Container measured, nothing to lay out yet.
    Measured,
    /// Layout computed, range not yet derived from it.
    LaidOut,
    /// Range and render set are current.
    Windowed,
    /// Detached. Terminal.
    TornDown,
}

/// Result of applying one value update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The widget is realized and its render entry changed.
    Rendered {
        /// Widget index.
        index: usize,
    },
    /// Stored in the sequence without touching the render set.
    Absorbed {
        /// Widget index.
        index: usize,
    },
    /// The widget already had this value; nothing changed.
    Unchanged {
        /// Widget index.
        index: usize,
    },
    /// Not applied.
    Dropped(UpdateError),
    /// The grid is torn down.
    Ignored,
}

/// Everything the cell renderer needs for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellProps<'a> {
    /// Widget id.
    pub id: &'a WidgetId,
    /// Widget name, if any.
    pub name: Option<&'a str>,
    /// Current value.
    pub value: i64,
    /// Content-space left offset.
    pub left: u64,
    /// Content-space top offset.
    pub top: u64,
    /// Cell width.
    pub width: u32,
    /// Cell height.
    pub height: u32,
}

/// A windowed grid over a widget sequence.
#[derive(Debug)]
pub struct VirtualGrid<C: Clock = SystemClock> {
    geometry: CellGeometry,
    tracker: ViewportTracker<C>,
    widgets: WidgetCollection,
    layout: Option<LayoutState>,
    last_generation: u64,
    range: VisibleRange,
    render_set: RenderSet,
    phase: GridPhase,
}

impl VirtualGrid<SystemClock> {
    /// Grid driven by the wall clock.
    pub fn with_system_clock(geometry: CellGeometry, settle_delay: Duration) -> Self {
        Self::new(geometry, SystemClock, settle_delay)
    }
}

impl<C: Clock> VirtualGrid<C> {
    /// Create an unattached, empty grid.
    pub fn new(geometry: CellGeometry, clock: C, settle_delay: Duration) -> Self {
        Self {
            geometry,
            tracker: ViewportTracker::new(clock, settle_delay),
            widgets: WidgetCollection::default(),
            layout: None,
            last_generation: 0,
            range: VisibleRange::default(),
            render_set: RenderSet::default(),
            phase: GridPhase::Uninitialized,
        }
    }

    // ===== Events =====

    /// Replace the working sequence with a fresh snapshot from the store.
    ///
    /// Relays out only if the widget count changed; the render set is
    /// rebuilt because the sequence identity changed.
    pub fn seed(&mut self, widgets: Vec<Widget>) -> bool {
        if self.phase == GridPhase::TornDown {
            return false;
        }
        debug!(count = widgets.len(), "seeding widget sequence");
        self.widgets.reseed(widgets);
        self.recompute_layout()
    }

    /// Start observing a container of the given size.
    pub fn attach(&mut self, dimensions: ViewportDimensions) -> bool {
        match self.tracker.attach(dimensions) {
            Some(recompute) => {
                info!(width = dimensions.width, height = dimensions.height, "grid attached");
                self.run(recompute)
            }
            None => false,
        }
    }

    /// Scroll notification from the geometry source.
    ///
    /// The live offset changes at once; the range follows after the settle delay.
    pub fn on_scroll(&mut self, scroll_offset: u64) -> bool {
        self.tracker.on_scroll(scroll_offset)
    }

    /// Resize notification from the geometry source. Recomputes immediately.
    pub fn on_resize(&mut self, dimensions: ViewportDimensions) -> bool {
        match self.tracker.on_resize(dimensions) {
            Some(recompute) => self.run(recompute),
            None => false,
        }
    }

    /// Run a settled scroll recompute if one is due.
    ///
    /// Returns `true` when the render set changed.
    pub fn tick(&mut self) -> bool {
        match self.tracker.poll() {
            Some(recompute) => self.run(recompute),
            None => false,
        }
    }

    /// Apply a value-only update.
    ///
    /// The layout and range are never re-derived here. If the widget is
    /// realized its render entry is patched; otherwise the value is only
    /// stored.
    pub fn apply_update(&mut self, update: &ValueUpdate) -> UpdateOutcome {
        if self.phase == GridPhase::TornDown {
            return UpdateOutcome::Ignored;
        }
        let Some(index) = self.widgets.index_of(&update.id) else {
            let error = UpdateError::UnknownWidget {
                id: update.id.clone(),
            };
            warn!(%error, "dropping update");
            return UpdateOutcome::Dropped(error);
        };
        if self.widgets.get(index).map(|w| w.value) == Some(update.value) {
            return UpdateOutcome::Unchanged { index };
        }
        self.widgets.set_value(&update.id, update.value);
        if self.render_set.apply_value(index, update.value) {
            UpdateOutcome::Rendered { index }
        } else {
            UpdateOutcome::Absorbed { index }
        }
    }

    /// Detach from the container. Nothing recomputes afterwards.
    pub fn teardown(&mut self) {
        if self.phase == GridPhase::TornDown {
            return;
        }
        self.tracker.teardown();
        self.layout = None;
        self.range = VisibleRange::default();
        self.render_set.clear();
        self.phase = GridPhase::TornDown;
        info!("grid torn down");
    }

    // ===== Queries =====

    /// Current lifecycle phase.
    pub fn phase(&self) -> GridPhase {
        self.phase
    }

    /// Clock driving the settle timer.
    pub fn clock(&self) -> &C {
        self.tracker.clock()
    }

    /// Cell geometry.
    pub fn geometry(&self) -> &CellGeometry {
        &self.geometry
    }

    /// Live viewport state.
    pub fn viewport(&self) -> ViewportState {
        self.tracker.viewport()
    }

    /// Working widget sequence.
    pub fn widgets(&self) -> &WidgetCollection {
        &self.widgets
    }

    /// Current layout, if one could be computed.
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref().map(LayoutState::layout)
    }

    /// Generation number of the current layout.
    pub fn layout_generation(&self) -> Option<u64> {
        self.layout.as_ref().map(LayoutState::generation)
    }

    /// Current visible range.
    pub fn visible_range(&self) -> VisibleRange {
        self.range
    }

    /// Current render set.
    pub fn render_set(&self) -> &RenderSet {
        &self.render_set
    }

    /// Scrollable extent for the host.
    pub fn total_height(&self) -> u64 {
        compute_total_height(self.widgets.len(), self.viewport().width(), &self.geometry)
    }

    /// Largest scroll offset that still shows content.
    pub fn max_scroll_offset(&self) -> u64 {
        self.total_height()
            .saturating_sub(u64::from(self.viewport().height()))
    }

    /// Whether a settled scroll recompute is waiting.
    pub fn has_pending_recompute(&self) -> bool {
        self.tracker.has_pending()
    }

    /// Time until the pending scroll recompute is due.
    pub fn time_until_due(&self) -> Option<Duration> {
        self.tracker.time_until_due()
    }

    /// Cell renderer inputs, one per render entry, in index order.
    pub fn cells(&self) -> impl Iterator<Item = CellProps<'_>> + '_ {
        let width = self.geometry.cell_width();
        let height = self.geometry.cell_height();
        self.render_set.entries().iter().map(move |entry| CellProps {
            id: &entry.widget.id,
            name: entry.widget.name.as_deref(),
            value: entry.widget.value,
            left: entry.position.left,
            top: entry.position.top,
            width,
            height,
        })
    }

    // ===== Recomputation =====

    fn run(&mut self, recompute: Recompute) -> bool {
        match recompute {
            Recompute::Layout => self.recompute_layout(),
            Recompute::Range => self.recompute_range(),
        }
    }

    /// Swap in a new layout generation if the params changed, then recompute
    /// the range from it.
    fn recompute_layout(&mut self) -> bool {
        if self.phase == GridPhase::TornDown {
            return false;
        }
        let viewport = self.tracker.viewport();
        let params = LayoutParams::new(self.widgets.len(), viewport.width());

        if !params.is_layoutable() {
            let had_content = !self.render_set.is_empty();
            self.layout = None;
            self.range = VisibleRange::default();
            self.render_set.clear();
            self.phase = if self.tracker.is_attached() && !viewport.dimensions.is_unmeasured() {
                GridPhase::Measured
            } else {
                GridPhase::Uninitialized
            };
            debug!(
                widget_count = params.widget_count,
                width = params.container_width,
                "layout skipped"
            );
            return had_content;
        }

        let current = self.layout.as_ref().map(LayoutState::params);
        if current != Some(params) {
            self.last_generation += 1;
            let state = LayoutState::compute(params, &self.geometry, self.last_generation);
            debug!(
                generation = state.generation(),
                columns = state.layout().columns_per_row(),
                rows = state.layout().total_rows(),
                "layout recomputed"
            );
            self.layout = Some(state);
            self.phase = GridPhase::LaidOut;
        }

        // The host owns the offset; a shorter extent must not leave it past the end.
        self.tracker.clamp_offset(self.max_scroll_offset());
        self.recompute_range()
    }

    fn recompute_range(&mut self) -> bool {
        if self.phase == GridPhase::TornDown {
            return false;
        }
        let Some(state) = self.layout.as_ref() else {
            return false;
        };
        let layout = state.layout();
        let viewport = self.tracker.viewport();

        let Some(range) = compute_visible_range(
            viewport.scroll_offset,
            viewport.height(),
            layout.columns_per_row(),
            layout.total_rows(),
            &self.geometry,
            self.widgets.len(),
        ) else {
            return false;
        };

        self.range = range;
        self.phase = GridPhase::Windowed;

        let generation = state.generation();
        if !self
            .render_set
            .is_stale(range, self.widgets.version(), generation)
        {
            return false;
        }
        self.render_set = RenderSet::build(
            range,
            self.widgets.as_slice(),
            layout.positions(),
            self.widgets.version(),
            generation,
        );
        debug!(start = range.start, end = range.end, "render set rebuilt");
        true
    }
}

#[cfg(test)]
#[path = "grid_tests.rs"]
mod tests;
