//! Viewport tracker: turns geometry and scroll notifications into
//! recomputation requests.
//!
//! Scroll notifications are coalesced behind a settling delay; the live
//! offset is updated immediately but the range recompute only fires once no
//! further scroll arrived for the whole delay. Resizes are never delayed.

use super::scheduler::{Clock, Scheduler, TimerHandle};
use super::types::{ViewportDimensions, ViewportState};
use std::time::Duration;
use tracing::{debug, trace};

/// Default settling delay, roughly one display frame.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(16);

/// What the owner must recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    /// Geometry changed: recompute the layout, then the range.
    Layout,
    /// Scroll settled: recompute the range against the current layout.
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackerTask {
    SettleScroll,
}

/// Observes one container.
///
/// # Lifecycle
/// `new` → `attach` → any number of `on_scroll` / `on_resize` / `poll` →
/// `teardown`. Events before `attach` or after `teardown` are ignored.
#[derive(Debug)]
pub struct ViewportTracker<C: Clock> {
    clock: C,
    settle_delay: Duration,
    scheduler: Scheduler<TrackerTask>,
    pending: Option<TimerHandle>,
    viewport: ViewportState,
    attached: bool,
    torn_down: bool,
}

impl<C: Clock> ViewportTracker<C> {
    /// Create a detached tracker.
    pub fn new(clock: C, settle_delay: Duration) -> Self {
        Self {
            clock,
            settle_delay,
            scheduler: Scheduler::new(),
            pending: None,
            viewport: ViewportState::default(),
            attached: false,
            torn_down: false,
        }
    }

    /// Current viewport state, including the live (unsettled) scroll offset.
    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    /// Whether observation is active.
    pub fn is_attached(&self) -> bool {
        self.attached && !self.torn_down
    }

    /// Whether `teardown` ran.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// The injected clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Start observing a container of the given size.
    ///
    /// Always requests a layout (and thus range) recompute so the first
    /// window is populated without waiting for a scroll.
    pub fn attach(&mut self, dimensions: ViewportDimensions) -> Option<Recompute> {
        if self.torn_down || self.attached {
            return None;
        }
        self.attached = true;
        self.viewport.dimensions = dimensions;
        debug!(width = dimensions.width, height = dimensions.height, "viewport attached");
        Some(Recompute::Layout)
    }

    /// Record a new scroll offset and (re)arm the settle timer.
    ///
    /// Any pending timer is cancelled first, so only one recompute is ever
    /// outstanding and it reads the most recent offset.
    pub fn on_scroll(&mut self, scroll_offset: u64) -> bool {
        if !self.is_attached() {
            return false;
        }
        if scroll_offset == self.viewport.scroll_offset && self.pending.is_none() {
            return false;
        }
        self.viewport.scroll_offset = scroll_offset;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        let handle = self
            .scheduler
            .schedule(self.clock.now(), self.settle_delay, TrackerTask::SettleScroll);
        self.pending = Some(handle);
        trace!(scroll_offset, "scroll recompute scheduled");
        true
    }

    /// Record a new container size.
    ///
    /// Returns `Recompute::Layout` immediately when the size actually
    /// changed. A pending scroll recompute is dropped because the layout
    /// recompute already reads the latest offset.
    pub fn on_resize(&mut self, dimensions: ViewportDimensions) -> Option<Recompute> {
        if !self.is_attached() || dimensions == self.viewport.dimensions {
            return None;
        }
        self.viewport.dimensions = dimensions;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        debug!(width = dimensions.width, height = dimensions.height, "viewport resized");
        Some(Recompute::Layout)
    }

    /// Pull the live offset back to `max` when the content got shorter.
    ///
    /// Does not arm the settle timer; the caller is already recomputing.
    /// Returns `true` when the offset moved.
    pub fn clamp_offset(&mut self, max: u64) -> bool {
        if self.viewport.scroll_offset <= max {
            return false;
        }
        debug!(from = self.viewport.scroll_offset, to = max, "scroll offset clamped");
        self.viewport.scroll_offset = max;
        true
    }

    /// Fire the settle timer if it is due.
    pub fn poll(&mut self) -> Option<Recompute> {
        if !self.is_attached() {
            return None;
        }
        let fired = self.scheduler.take_due(self.clock.now());
        if fired.contains(&TrackerTask::SettleScroll) {
            self.pending = None;
            return Some(Recompute::Range);
        }
        None
    }

    /// Whether a scroll recompute is waiting for its delay.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time until the pending scroll recompute is due, if any.
    pub fn time_until_due(&self) -> Option<Duration> {
        let deadline = self.scheduler.next_deadline()?;
        Some(deadline.saturating_duration_since(self.clock.now()))
    }

    /// Stop observing and cancel anything pending. Terminal.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        let cancelled = self.scheduler.cancel_all();
        self.pending = None;
        self.torn_down = true;
        debug!(cancelled, "viewport tracker torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::scheduler::ManualClock;

    fn attached() -> (ManualClock, ViewportTracker<ManualClock>) {
        let clock = ManualClock::new();
        let mut tracker = ViewportTracker::new(clock.clone(), DEFAULT_SETTLE_DELAY);
        tracker.attach(ViewportDimensions::new(440, 300));
        (clock, tracker)
    }

    mod attach {
        use super::*;

        #[test]
        fn attach_requests_layout() {
            let clock = ManualClock::new();
            let mut tracker = ViewportTracker::new(clock, DEFAULT_SETTLE_DELAY);
            assert_eq!(
                tracker.attach(ViewportDimensions::new(440, 300)),
                Some(Recompute::Layout)
            );
            assert_eq!(tracker.viewport().width(), 440);
        }

        #[test]
        fn second_attach_is_ignored() {
            let (_, mut tracker) = attached();
            assert_eq!(tracker.attach(ViewportDimensions::new(10, 10)), None);
            assert_eq!(tracker.viewport().width(), 440);
        }

        #[test]
        fn scroll_before_attach_is_ignored() {
            let mut tracker = ViewportTracker::new(ManualClock::new(), DEFAULT_SETTLE_DELAY);
            assert!(!tracker.on_scroll(100));
            assert_eq!(tracker.viewport().scroll_offset, 0);
        }
    }

    mod scroll {
        use super::*;

        #[test]
        fn updates_offset_immediately_but_recomputes_after_delay() {
            let (clock, mut tracker) = attached();
            assert!(tracker.on_scroll(450));
            assert_eq!(tracker.viewport().scroll_offset, 450);

            clock.advance(Duration::from_millis(15));
            assert_eq!(tracker.poll(), None);

            clock.advance(Duration::from_millis(1));
            assert_eq!(tracker.poll(), Some(Recompute::Range));
            assert!(!tracker.has_pending());
        }

        #[test]
        fn burst_of_scrolls_coalesces_into_one_recompute() {
            let (clock, mut tracker) = attached();
            for offset in [10, 20, 30, 40] {
                tracker.on_scroll(offset);
                clock.advance(Duration::from_millis(10));
                assert_eq!(tracker.poll(), None, "timer must be rescheduled, not fired");
            }

            clock.advance(Duration::from_millis(6));
            assert_eq!(tracker.poll(), Some(Recompute::Range));
            assert_eq!(tracker.viewport().scroll_offset, 40);

            clock.advance(DEFAULT_SETTLE_DELAY * 4);
            assert_eq!(tracker.poll(), None, "only one recompute per burst");
        }

        #[test]
        fn same_offset_without_pending_is_ignored() {
            let (_, mut tracker) = attached();
            assert!(!tracker.on_scroll(0));
            assert!(!tracker.has_pending());
        }

        #[test]
        fn time_until_due_counts_down() {
            let (clock, mut tracker) = attached();
            assert_eq!(tracker.time_until_due(), None);
            tracker.on_scroll(90);
            clock.advance(Duration::from_millis(6));
            assert_eq!(tracker.time_until_due(), Some(Duration::from_millis(10)));
        }
    }

    mod resize {
        use super::*;

        #[test]
        fn resize_is_immediate() {
            let (_, mut tracker) = attached();
            assert_eq!(
                tracker.on_resize(ViewportDimensions::new(330, 300)),
                Some(Recompute::Layout)
            );
            assert_eq!(tracker.viewport().width(), 330);
        }

        #[test]
        fn unchanged_size_is_ignored() {
            let (_, mut tracker) = attached();
            assert_eq!(tracker.on_resize(ViewportDimensions::new(440, 300)), None);
        }

        #[test]
        fn resize_supersedes_pending_scroll() {
            let (clock, mut tracker) = attached();
            tracker.on_scroll(450);
            tracker.on_resize(ViewportDimensions::new(330, 300));
            assert!(!tracker.has_pending());

            clock.advance(DEFAULT_SETTLE_DELAY);
            assert_eq!(tracker.poll(), None);
            assert_eq!(tracker.viewport().scroll_offset, 450);
        }
    }

    mod teardown {
        use super::*;

        #[test]
        fn clamp_offset_only_lowers() {
            let (_, mut tracker) = attached();
            tracker.on_scroll(450);
            assert!(!tracker.clamp_offset(600));
            assert_eq!(tracker.viewport().scroll_offset, 450);
            assert!(tracker.clamp_offset(240));
            assert_eq!(tracker.viewport().scroll_offset, 240);
        }

        #[test]
        fn pending_recompute_never_fires_after_teardown() {
            let (clock, mut tracker) = attached();
            tracker.on_scroll(450);
            tracker.teardown();

            clock.advance(DEFAULT_SETTLE_DELAY * 2);
            assert_eq!(tracker.poll(), None);
            assert_eq!(tracker.time_until_due(), None);
        }

        #[test]
        fn events_after_teardown_are_ignored() {
            let (_, mut tracker) = attached();
            tracker.teardown();
            assert!(!tracker.on_scroll(10));
            assert_eq!(tracker.on_resize(ViewportDimensions::new(1, 1)), None);
            assert_eq!(tracker.attach(ViewportDimensions::new(1, 1)), None);
            assert!(tracker.is_torn_down());
            assert!(!tracker.is_attached());
        }
    }
}
