//! Error types for widgrid.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose
//! through `?` and `From` conversions up to [`AppError`].
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from `main`
//!   - [`InputError`] - Widget collection / update stream could not be opened or read
//!   - [`ConfigError`] - Config file exists but is unreadable or invalid
//!   - [`LoggingError`] - Tracing subscriber could not be installed
//!   - `std::io::Error` - Terminal failures
//! - [`ParseError`] - Initial widget collection payload is invalid
//! - [`UpdateError`] - A single streamed update was dropped
//!
//! # Recovery Strategy
//!
//! Nothing inside the windowing engine is fatal. Precondition misses (no
//! width yet, zero widgets) are early returns, transient index mismatches
//! are skipped, and malformed updates become [`UpdateError`] values that are
//! logged and counted, never propagated. Only failures at process bootstrap
//! (opening inputs, config, terminal) reach [`AppError`].

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::WidgetId;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to open or read the widget source.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Failed to load configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to initialize logging.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or TUI rendering error.
    ///
    /// Fatal: without a working terminal the dashboard cannot run.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered while opening widget sources.
#[derive(Debug, Error)]
pub enum InputError {
    /// The given file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use widgrid::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/widgets.json"),
    /// };
    /// assert!(err.to_string().contains("/tmp/widgets.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// I/O failure while reading a source.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// Path being read (`-` for stdin).
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The initial widget collection could not be parsed.
    #[error("Invalid widget collection in {path}: {source}")]
    InvalidWidgets {
        /// File that held the collection.
        path: PathBuf,
        /// Parse failure.
        #[source]
        source: ParseError,
    },

    /// Stdin was requested as the update stream but is an interactive terminal.
    #[error("No update stream: stdin is a terminal (pipe updates in or pass a file)")]
    NoInput,
}

/// Errors parsing the initial widget collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Payload is not a JSON array of widgets.
    #[error("Invalid JSON: {message}")]
    InvalidJson {
        /// serde_json error text.
        message: String,
    },

    /// Two widgets share an id. Identity must be unique.
    #[error("Duplicate widget id: {id}")]
    DuplicateId {
        /// The repeated id.
        id: WidgetId,
    },
}

/// A dropped update.
///
/// Surfaced only as a log line and a counter; never fails the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateError {
    /// The update line is not a valid `{"id": .., "value": ..}` object.
    #[error("Invalid update at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number in the stream.
        line: usize,
        /// serde_json error text.
        message: String,
    },

    /// The update line is not valid UTF-8.
    #[error("Update at line {line} is not valid UTF-8")]
    InvalidUtf8 {
        /// 1-based line number in the stream.
        line: usize,
    },

    /// The update targets an id not present in the collection.
    #[error("Update for unknown widget id: {id}")]
    UnknownWidget {
        /// Unknown id.
        id: WidgetId,
    },
}
