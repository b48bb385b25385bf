//! Widget records and value updates.

use super::identifiers::WidgetId;
use serde::{Deserialize, Serialize};

/// Direction of travel used by the simulated update loop.
///
/// Serialized as `1` / `-1`. This is update-loop state only; layout never
/// looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Direction {
    /// Value grows by one per tick.
    #[default]
    Up,
    /// Value shrinks by one per tick.
    Down,
}

/// Error for a direction that is neither `1` nor `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("direction must be 1 or -1 (got {0})")]
pub struct InvalidDirection(pub i64);

impl Direction {
    /// Signed step applied per tick.
    pub fn step(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

impl TryFrom<i64> for Direction {
    type Error = InvalidDirection;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Up),
            -1 => Ok(Self::Down),
            other => Err(InvalidDirection(other)),
        }
    }
}

impl From<Direction> for i64 {
    fn from(direction: Direction) -> Self {
        direction.step()
    }
}

/// One cell of the dashboard.
///
/// Identity is `id`. `value` is mutated in place by updates; nothing about
/// a widget's content influences where it is laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    /// Stable key.
    pub id: WidgetId,
    /// Optional display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Current value.
    pub value: i64,
    /// Update-loop state, absent for stores that don't simulate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

impl Widget {
    /// Create an unnamed widget with no direction.
    pub fn new(id: impl Into<WidgetId>, value: i64) -> Self {
        Self {
            id: id.into(),
            name: None,
            value,
            direction: None,
        }
    }

    /// Builder-style name setter.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder-style direction setter.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Label shown in a cell: the name, or the id when unnamed.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.id.to_string(),
        }
    }
}

/// A value-only mutation of one widget, as delivered by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueUpdate {
    /// Target widget.
    pub id: WidgetId,
    /// New value.
    pub value: i64,
}

impl ValueUpdate {
    /// Create a new update.
    pub fn new(id: impl Into<WidgetId>, value: i64) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}
