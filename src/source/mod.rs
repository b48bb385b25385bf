//! Widget collection stores.
//!
//! This module provides the stores a grid can be wired to:
//! - [`Simulator`] moves every widget on a fixed interval
//! - [`StreamStore`] applies newline-delimited JSON updates from a file or stdin
//! - [`WidgetSource`] unifies both for the terminal shell

use crate::model::{InputError, UpdateError, Widget};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub mod feed;
pub mod file;
pub mod simulator;
pub mod stream;

pub use feed::{StoreEvent, Subscription, UpdateFeed};
pub use file::{generate_widgets, load_widgets};
pub use simulator::{step_widget, Simulator};
pub use stream::StreamStore;

/// Summary of one store poll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorePoll {
    /// Value updates published to subscribers.
    pub published: usize,
    /// Updates that could not be applied.
    pub dropped: Vec<UpdateError>,
    /// Whether the sequence was replaced.
    pub reseeded: bool,
}

/// Owner of an ordered widget sequence and its value updates.
///
/// The grid re-seeds from [`current_widgets`](Self::current_widgets) and
/// receives value changes through a [`Subscription`]. Stores do their work
/// inside [`poll`](Self::poll), on the caller's thread.
pub trait WidgetStore {
    /// Snapshot of the current sequence.
    fn current_widgets(&self) -> Vec<Widget>;

    /// Register for store events.
    fn subscribe(&mut self) -> Subscription;

    /// Do any work that is due at `now` and publish the results.
    ///
    /// # Errors
    ///
    /// Returns `InputError` only for failures the store cannot absorb.
    fn poll(&mut self, now: Instant) -> Result<StorePoll, InputError>;

    /// How long the caller may wait before polling again. `None` means the
    /// store will never produce anything more.
    fn next_wakeup(&self, now: Instant) -> Option<Duration>;
}

/// The store selected at startup.
#[derive(Debug)]
pub enum WidgetSource {
    /// Simulated update loop.
    Simulated(Simulator),
    /// External update stream.
    Stream(StreamStore),
}

impl WidgetStore for WidgetSource {
    fn current_widgets(&self) -> Vec<Widget> {
        match self {
            Self::Simulated(s) => s.current_widgets(),
            Self::Stream(s) => s.current_widgets(),
        }
    }

    fn subscribe(&mut self) -> Subscription {
        match self {
            Self::Simulated(s) => s.subscribe(),
            Self::Stream(s) => s.subscribe(),
        }
    }

    fn poll(&mut self, now: Instant) -> Result<StorePoll, InputError> {
        match self {
            Self::Simulated(s) => s.poll(now),
            Self::Stream(s) => s.poll(now),
        }
    }

    fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        match self {
            Self::Simulated(s) => s.next_wakeup(now),
            Self::Stream(s) => s.next_wakeup(now),
        }
    }
}

/// How to build the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    /// JSON array of widgets; generated when absent.
    pub widgets: Option<PathBuf>,
    /// Update stream (`-` for stdin); simulate when absent.
    pub updates: Option<PathBuf>,
    /// Number of generated widgets.
    pub count: usize,
    /// Simulator tick interval.
    pub update_interval: Duration,
}

/// Build the store described by `options`.
///
/// # Logic:
/// 1. Load widgets from the file if given, otherwise generate `count`
/// 2. With an update stream: [`StreamStore`]
/// 3. Otherwise: [`Simulator`] ticking every `update_interval`
///
/// # Errors
///
/// Propagates `InputError` from loading widgets or opening the stream.
pub fn open_source(options: &SourceOptions, now: Instant) -> Result<WidgetSource, InputError> {
    let widgets = match &options.widgets {
        Some(path) => load_widgets(path)?,
        None => generate_widgets(options.count),
    };
    match &options.updates {
        Some(path) => Ok(WidgetSource::Stream(StreamStore::open(widgets, path)?)),
        None => Ok(WidgetSource::Simulated(Simulator::new(
            widgets,
            options.update_interval,
            now,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn options() -> SourceOptions {
        SourceOptions {
            widgets: None,
            updates: None,
            count: 12,
            update_interval: Duration::from_millis(1000),
        }
    }

    #[test]
    fn no_paths_means_generated_simulator() {
        let source = open_source(&options(), Instant::now()).unwrap();
        assert!(matches!(source, WidgetSource::Simulated(_)));
        assert_eq!(source.current_widgets().len(), 12);
    }

    #[test]
    fn updates_path_selects_stream_store() {
        let path = std::env::temp_dir().join("widgrid_open_source_updates.ndjson");
        fs::write(&path, "").unwrap();

        let result = open_source(
            &SourceOptions {
                updates: Some(path.clone()),
                ..options()
            },
            Instant::now(),
        );
        let _ = fs::remove_file(&path);

        assert!(matches!(result, Ok(WidgetSource::Stream(_))));
    }

    #[test]
    fn missing_widgets_file_is_reported() {
        let missing = std::env::temp_dir().join("widgrid_open_source_missing.json");
        let result = open_source(
            &SourceOptions {
                widgets: Some(missing),
                ..options()
            },
            Instant::now(),
        );
        assert!(matches!(result, Err(InputError::FileNotFound { .. })));
    }

    #[test]
    fn enum_dispatch_reaches_simulator() {
        let start = Instant::now();
        let mut source = open_source(&options(), start).unwrap();
        let mut sub = source.subscribe();

        let poll = source.poll(start + Duration::from_millis(1000)).unwrap();
        assert_eq!(poll.published, 12);
        assert_eq!(sub.drain().len(), 12);
        assert_eq!(
            source.next_wakeup(start + Duration::from_millis(1000)),
            Some(Duration::from_millis(1000))
        );
    }
}
