//! Input-driven state transitions (pure).
//!
//! Handlers here translate user intent into grid notifications and are
//! testable without a terminal.

pub mod scroll_handler;

pub use scroll_handler::{handle_scroll_action, handle_wheel, scroll_target, scroll_to};
