//! Parsing of widget collections and streamed update lines.
//!
//! Parse at the boundary: everything past this module works with typed
//! [`Widget`] and [`ValueUpdate`] values.

use crate::model::{ParseError, UpdateError, ValueUpdate, Widget};
use std::collections::HashSet;

/// One meaningful line of an update stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamLine {
    /// `{"id": .., "value": ..}`
    Update(ValueUpdate),
    /// A JSON array of widgets replacing the whole collection.
    Reseed(Vec<Widget>),
}

/// Parse a JSON array of widgets.
///
/// # Errors
///
/// Returns `ParseError::InvalidJson` for malformed payloads and
/// `ParseError::DuplicateId` when two widgets share an id.
pub fn parse_widgets(json: &str) -> Result<Vec<Widget>, ParseError> {
    let widgets: Vec<Widget> = serde_json::from_str(json).map_err(|e| ParseError::InvalidJson {
        message: e.to_string(),
    })?;
    ensure_unique_ids(&widgets)?;
    Ok(widgets)
}

fn ensure_unique_ids(widgets: &[Widget]) -> Result<(), ParseError> {
    let mut seen = HashSet::with_capacity(widgets.len());
    for widget in widgets {
        if !seen.insert(&widget.id) {
            return Err(ParseError::DuplicateId {
                id: widget.id.clone(),
            });
        }
    }
    Ok(())
}

/// Parse a single update object.
///
/// # Errors
///
/// Returns `UpdateError::InvalidJson` carrying `line_number` on failure.
pub fn parse_update(line: &str, line_number: usize) -> Result<ValueUpdate, UpdateError> {
    serde_json::from_str(line).map_err(|e| UpdateError::InvalidJson {
        line: line_number,
        message: e.to_string(),
    })
}

/// Parse one line of an update stream.
///
/// Blank lines yield `Ok(None)`. A line starting with `[` is a full
/// collection; anything else must be an update object.
pub fn parse_stream_line(line: &str, line_number: usize) -> Result<Option<StreamLine>, UpdateError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.starts_with('[') {
        return parse_widgets(trimmed)
            .map(|widgets| Some(StreamLine::Reseed(widgets)))
            .map_err(|e| UpdateError::InvalidJson {
                line: line_number,
                message: e.to_string(),
            });
    }
    parse_update(trimmed, line_number).map(|update| Some(StreamLine::Update(update)))
}
