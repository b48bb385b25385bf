//! Subscriber fan-out for store events.
//!
//! Each subscription is the receiving half of an mpsc channel. Publishing
//! never blocks; subscribers whose receiver has been dropped are pruned on
//! the next publish.

use crate::model::ValueUpdate;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Something that happened inside a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// One widget's value changed.
    Value(ValueUpdate),
    /// The whole sequence was replaced; read `current_widgets()` again.
    Reseeded,
}

/// Publisher side, owned by a store.
#[derive(Debug, Default)]
pub struct UpdateFeed {
    subscribers: Vec<Sender<StoreEvent>>,
}

impl UpdateFeed {
    /// Feed with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        Subscription { receiver: Some(rx) }
    }

    /// Send an event to every live subscriber.
    ///
    /// Returns the number of subscribers that received it.
    pub fn publish(&mut self, event: StoreEvent) -> usize {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        self.subscribers.len()
    }

    /// Number of subscribers still registered.
    ///
    /// Cancelled subscribers are only noticed on the next publish.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Receiving side handed to the host.
#[derive(Debug)]
pub struct Subscription {
    receiver: Option<Receiver<StoreEvent>>,
}

impl Subscription {
    /// Take every event delivered so far, oldest first.
    pub fn drain(&mut self) -> Vec<StoreEvent> {
        let Some(rx) = self.receiver.as_ref() else {
            return Vec::new();
        };
        let mut events = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.receiver = None;
                    break;
                }
            }
        }
        events
    }

    /// Stop receiving. Idempotent.
    pub fn cancel(&mut self) {
        self.receiver = None;
    }

    /// Whether the subscription can still receive events.
    pub fn is_active(&self) -> bool {
        self.receiver.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(id: i64, value: i64) -> StoreEvent {
        StoreEvent::Value(ValueUpdate::new(id, value))
    }

    #[test]
    fn publish_reaches_every_subscriber() {
        let mut feed = UpdateFeed::new();
        let mut a = feed.subscribe();
        let mut b = feed.subscribe();

        assert_eq!(feed.publish(value(1, 5)), 2);

        assert_eq!(a.drain(), vec![value(1, 5)]);
        assert_eq!(b.drain(), vec![value(1, 5)]);
    }

    #[test]
    fn drain_preserves_order_and_empties() {
        let mut feed = UpdateFeed::new();
        let mut sub = feed.subscribe();
        feed.publish(value(1, 1));
        feed.publish(StoreEvent::Reseeded);
        feed.publish(value(2, 2));

        assert_eq!(
            sub.drain(),
            vec![value(1, 1), StoreEvent::Reseeded, value(2, 2)]
        );
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn cancelled_subscription_is_pruned_on_publish() {
        let mut feed = UpdateFeed::new();
        let mut gone = feed.subscribe();
        let _kept = feed.subscribe();
        gone.cancel();

        assert_eq!(feed.subscriber_count(), 2);
        assert_eq!(feed.publish(value(1, 1)), 1);
        assert_eq!(feed.subscriber_count(), 1);
        assert!(!gone.is_active());
        assert!(gone.drain().is_empty());
    }

    #[test]
    fn dropped_subscription_is_pruned() {
        let mut feed = UpdateFeed::new();
        drop(feed.subscribe());
        assert_eq!(feed.publish(value(1, 1)), 0);
    }

    #[test]
    fn subscription_goes_inactive_when_feed_is_dropped() {
        let mut feed = UpdateFeed::new();
        let mut sub = feed.subscribe();
        feed.publish(value(1, 1));
        drop(feed);

        assert_eq!(sub.drain(), vec![value(1, 1)]);
        assert!(!sub.is_active());
    }
}
