//! Cell and chrome styling.
//!
//! Cell color follows the widget value: below 50 is red, above 50 is blue,
//! exactly 50 is gray.

use ratatui::style::{Color, Modifier, Style};
use std::cmp::Ordering;

/// Value at which a cell switches from red to blue.
pub const VALUE_MIDPOINT: i64 = 50;

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors on, regardless of environment.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

/// Color band for a widget value.
pub fn value_color(value: i64) -> Color {
    match value.cmp(&VALUE_MIDPOINT) {
        Ordering::Less => Color::Red,
        Ordering::Greater => Color::Blue,
        Ordering::Equal => Color::Gray,
    }
}

// ===== GridStyles =====

/// Styles for cells and the surrounding chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridStyles {
    colors: ColorConfig,
}

impl GridStyles {
    /// Styles honoring `colors`.
    pub fn new(colors: ColorConfig) -> Self {
        Self { colors }
    }

    /// Border and value style for a cell showing `value`.
    pub fn cell(&self, value: i64) -> Style {
        if self.colors.colors_enabled() {
            Style::default().fg(value_color(value))
        } else {
            Style::default()
        }
    }

    /// Style for a cell's label line.
    pub fn label(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    /// Style for the header bar.
    pub fn header(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }
}

impl Default for GridStyles {
    fn default() -> Self {
        Self::new(ColorConfig::from_env_and_args(false))
    }
}
