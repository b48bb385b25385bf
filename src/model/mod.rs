//! Domain model types (pure).
//!
//! Widgets, their identifiers, the versioned widget sequence, value updates,
//! keyboard actions and the error taxonomy.

pub mod collection;
pub mod error;
pub mod identifiers;
pub mod key_action;
pub mod widget;

pub use collection::WidgetCollection;
pub use error::{AppError, InputError, ParseError, UpdateError};
pub use identifiers::WidgetId;
pub use key_action::KeyAction;
pub use widget::{Direction, InvalidDirection, ValueUpdate, Widget};
