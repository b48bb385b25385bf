//! Layout dimension constants for TUI rendering.

use std::time::Duration;

/// Height of the header bar in lines.
pub const HEADER_HEIGHT: u16 = 1;

/// Width of the vertical scrollbar in columns.
pub const SCROLLBAR_WIDTH: u16 = 1;

/// Cell rows moved per mouse wheel notch.
pub const WHEEL_ROWS: i64 = 1;

/// Longest the event loop blocks when nothing is scheduled.
pub const IDLE_POLL: Duration = Duration::from_millis(250);

/// Smallest cell that still gets a border (needs room for one inner line).
pub const MIN_BORDERED_HEIGHT: u16 = 3;
