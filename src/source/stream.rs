//! Store fed by a newline-delimited JSON update stream.
//!
//! A background thread reads raw lines from a file or stdin and forwards
//! them over a channel. Parsing, collection mutation and fan-out all happen
//! in [`WidgetStore::poll`] on the caller's thread.

use super::feed::{StoreEvent, Subscription, UpdateFeed};
use super::{StorePoll, WidgetStore};
use crate::model::{InputError, UpdateError, Widget, WidgetCollection};
use crate::parser::{parse_stream_line, StreamLine};
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How often a live stream wants to be polled.
pub const STREAM_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Upper bound on lines handled per poll so one burst can't starve the UI.
const MAX_LINES_PER_POLL: usize = 10_000;

#[derive(Debug)]
enum ReaderMessage {
    Line(Vec<u8>),
    Failed(io::Error),
    Eof,
}

/// Widget store whose values are driven by an external update stream.
#[derive(Debug)]
pub struct StreamStore {
    origin: PathBuf,
    widgets: WidgetCollection,
    lines: Receiver<ReaderMessage>,
    line_number: usize,
    complete: bool,
    feed: UpdateFeed,
}

impl StreamStore {
    /// Open an update stream. `-` means stdin.
    ///
    /// # Errors
    ///
    /// - `InputError::NoInput` if `-` is given and stdin is a terminal
    /// - `InputError::FileNotFound` if the file does not exist
    /// - `InputError::Io` for other open failures
    pub fn open(widgets: Vec<Widget>, path: &Path) -> Result<Self, InputError> {
        if path == Path::new("-") {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                return Err(InputError::NoInput);
            }
            return Ok(Self::spawn(widgets, path.to_path_buf(), stdin));
        }

        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => InputError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => InputError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Ok(Self::spawn(widgets, path.to_path_buf(), file))
    }

    /// Build a store over any reader.
    pub fn from_reader<R>(widgets: Vec<Widget>, reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self::spawn(widgets, PathBuf::from("<reader>"), reader)
    }

    fn spawn<R>(widgets: Vec<Widget>, origin: PathBuf, reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // Raw bytes: a line that is not UTF-8 is dropped by `poll`, not
            // treated as a read failure.
            let mut reader = BufReader::new(reader);
            loop {
                let mut line = Vec::new();
                match reader.read_until(b'\n', &mut line) {
                    Ok(0) => break,
                    Ok(_) => {
                        if line.last() == Some(&b'\n') {
                            line.pop();
                        }
                        if tx.send(ReaderMessage::Line(line)).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(ReaderMessage::Failed(e));
                        return;
                    }
                }
            }
            let _ = tx.send(ReaderMessage::Eof);
        });
        debug!(origin = %origin.display(), "update stream reader started");

        Self {
            origin,
            widgets: WidgetCollection::new(widgets),
            lines: rx,
            line_number: 0,
            complete: false,
            feed: UpdateFeed::new(),
        }
    }

    /// Whether the stream has ended (EOF or read failure).
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    fn handle_line(&mut self, raw: Vec<u8>, poll: &mut StorePoll) {
        self.line_number += 1;
        let line = match String::from_utf8(raw) {
            Ok(line) => line,
            Err(_) => {
                let error = UpdateError::InvalidUtf8 {
                    line: self.line_number,
                };
                warn!(%error, "dropping update line");
                poll.dropped.push(error);
                return;
            }
        };
        match parse_stream_line(&line, self.line_number) {
            Ok(None) => {}
            Ok(Some(StreamLine::Update(update))) => {
                if self.widgets.set_value(&update.id, update.value).is_some() {
                    self.feed.publish(StoreEvent::Value(update));
                    poll.published += 1;
                } else {
                    let error = UpdateError::UnknownWidget { id: update.id };
                    warn!(line = self.line_number, %error, "dropping update");
                    poll.dropped.push(error);
                }
            }
            Ok(Some(StreamLine::Reseed(widgets))) => {
                info!(count = widgets.len(), line = self.line_number, "stream reseeded widgets");
                self.widgets.reseed(widgets);
                self.feed.publish(StoreEvent::Reseeded);
                poll.reseeded = true;
            }
            Err(error) => {
                warn!(%error, "dropping malformed update line");
                poll.dropped.push(error);
            }
        }
    }
}

impl WidgetStore for StreamStore {
    fn current_widgets(&self) -> Vec<Widget> {
        self.widgets.as_slice().to_vec()
    }

    fn subscribe(&mut self) -> Subscription {
        self.feed.subscribe()
    }

    fn poll(&mut self, _now: Instant) -> Result<StorePoll, InputError> {
        let mut poll = StorePoll::default();
        if self.complete {
            return Ok(poll);
        }

        for _ in 0..MAX_LINES_PER_POLL {
            match self.lines.try_recv() {
                Ok(ReaderMessage::Line(line)) => self.handle_line(line, &mut poll),
                Ok(ReaderMessage::Failed(error)) => {
                    // The dashboard keeps showing the last known values.
                    warn!(origin = %self.origin.display(), %error, "update stream read failed");
                    self.complete = true;
                    break;
                }
                Ok(ReaderMessage::Eof) | Err(TryRecvError::Disconnected) => {
                    info!(lines = self.line_number, "update stream ended");
                    self.complete = true;
                    break;
                }
                Err(TryRecvError::Empty) => break,
            }
        }
        Ok(poll)
    }

    fn next_wakeup(&self, _now: Instant) -> Option<Duration> {
        (!self.complete).then_some(STREAM_POLL_INTERVAL)
    }
}
