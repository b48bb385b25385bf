//! Widget identifier.
//!
//! Widgets are keyed by either an integer or a string, exactly as the
//! upstream collection supplies them. The two spaces never collide:
//! `1` and `"1"` are different widgets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a widget.
///
/// Deserializes untagged, so `{"id": 7}` and `{"id": "cpu"}` both parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WidgetId {
    /// Numeric key.
    Int(i64),
    /// Textual key.
    Text(String),
}

impl WidgetId {
    /// Create a textual id.
    pub fn text(raw: impl Into<String>) -> Self {
        Self::Text(raw.into())
    }
}

impl From<i64> for WidgetId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

// Unsuffixed integer literals default to i32.
impl From<i32> for WidgetId {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for WidgetId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for WidgetId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_id_deserializes_as_int() {
        let id: WidgetId = serde_json::from_str("42").unwrap();
        assert_eq!(id, WidgetId::Int(42));
    }

    #[test]
    fn string_id_deserializes_as_text() {
        let id: WidgetId = serde_json::from_str("\"cpu-0\"").unwrap();
        assert_eq!(id, WidgetId::text("cpu-0"));
    }

    #[test]
    fn numeric_string_stays_text() {
        let id: WidgetId = serde_json::from_str("\"1\"").unwrap();
        assert_ne!(id, WidgetId::Int(1));
    }

    #[test]
    fn display_renders_raw_key() {
        assert_eq!(WidgetId::Int(-3).to_string(), "-3");
        assert_eq!(WidgetId::text("mem").to_string(), "mem");
    }

    #[test]
    fn float_id_is_rejected() {
        let result: Result<WidgetId, _> = serde_json::from_str("1.5");
        assert!(result.is_err());
    }
}
