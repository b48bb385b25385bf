//! Domain-level keyboard actions independent of key bindings.

/// Actions a key can trigger in the dashboard.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Scroll up one cell row. Default: k/↑
    ScrollUp,
    /// Scroll down one cell row. Default: j/↓
    ScrollDown,
    /// Scroll up one viewport. Default: Page Up/Ctrl+u
    PageUp,
    /// Scroll down one viewport. Default: Page Down/Ctrl+d
    PageDown,
    /// Jump to the first row. Default: g/Home
    ScrollToTop,
    /// Jump to the last row. Default: G/End
    ScrollToBottom,
    /// Leave the dashboard. Default: q/Esc/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Whether this action moves the viewport.
    pub fn is_scroll(self) -> bool {
        !matches!(self, Self::Quit)
    }
}
