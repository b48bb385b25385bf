//! Simulated update loop.
//!
//! Every interval each widget moves one step in its direction and bounces
//! off the `[-100, 100]` bounds. All widgets move, visible or not; only the
//! ones that changed are published.

use super::feed::{StoreEvent, Subscription, UpdateFeed};
use super::{StorePoll, WidgetStore};
use crate::model::{Direction, InputError, ValueUpdate, Widget};
use std::time::{Duration, Instant};
use tracing::trace;

/// Upper bound of a simulated value.
pub const VALUE_MAX: i64 = 100;
/// Lower bound of a simulated value.
pub const VALUE_MIN: i64 = -100;

/// Move one widget by one step.
///
/// A missing direction counts as up. Returns the update to publish if
/// anything changed.
pub fn step_widget(widget: &mut Widget) -> Option<ValueUpdate> {
    let direction = widget.direction.unwrap_or_default();
    let mut value = widget.value.saturating_add(direction.step());
    let mut next_direction = direction;

    if value >= VALUE_MAX {
        value = VALUE_MAX;
        next_direction = Direction::Down;
    } else if value <= VALUE_MIN {
        value = VALUE_MIN;
        next_direction = Direction::Up;
    }

    let changed = value != widget.value || Some(next_direction) != widget.direction;
    widget.value = value;
    widget.direction = Some(next_direction);
    changed.then(|| ValueUpdate::new(widget.id.clone(), value))
}

/// Store that owns a widget list and moves it on a fixed interval.
#[derive(Debug)]
pub struct Simulator {
    widgets: Vec<Widget>,
    interval: Duration,
    next_tick: Instant,
    feed: UpdateFeed,
}

impl Simulator {
    /// Start simulating; the first tick is one interval after `now`.
    pub fn new(widgets: Vec<Widget>, interval: Duration, now: Instant) -> Self {
        Self {
            widgets,
            interval,
            next_tick: now + interval,
            feed: UpdateFeed::new(),
        }
    }

    /// Advance every widget once and publish what changed.
    pub fn step_all(&mut self) -> usize {
        let mut published = 0;
        for widget in &mut self.widgets {
            if let Some(update) = step_widget(widget) {
                self.feed.publish(StoreEvent::Value(update));
                published += 1;
            }
        }
        published
    }
}

impl WidgetStore for Simulator {
    fn current_widgets(&self) -> Vec<Widget> {
        self.widgets.clone()
    }

    fn subscribe(&mut self) -> Subscription {
        self.feed.subscribe()
    }

    fn poll(&mut self, now: Instant) -> Result<StorePoll, InputError> {
        if now < self.next_tick {
            return Ok(StorePoll::default());
        }
        let published = self.step_all();
        self.next_tick += self.interval;
        // A stalled loop skips missed ticks instead of replaying them.
        if self.next_tick <= now {
            self.next_tick = now + self.interval;
        }
        trace!(published, "simulator tick");
        Ok(StorePoll {
            published,
            ..StorePoll::default()
        })
    }

    fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        Some(self.next_tick.saturating_duration_since(now))
    }
}
