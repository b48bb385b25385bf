//! Vertical scrolling action handler.
//!
//! Turns keyboard and wheel input into a semantic [`ScrollPosition`],
//! resolves it against the grid's current extent and hands the offset to
//! the grid as a scroll notification.

use crate::model::KeyAction;
use crate::view_state::{Clock, ScrollPosition, VirtualGrid};

/// Scroll target for a key action.
///
/// Line steps move one cell row; page steps move the number of whole rows
/// that fit in the viewport (at least one). Returns `None` for actions that
/// don't scroll.
///
/// # Arguments
/// * `current` - live scroll offset
/// * `row_unit` - cell height plus spacing
/// * `viewport_height` - visible height
pub fn scroll_target(
    action: KeyAction,
    current: u64,
    row_unit: u64,
    viewport_height: u64,
) -> Option<ScrollPosition> {
    let page = (viewport_height / row_unit.max(1)).max(1) * row_unit;
    let target = match action {
        KeyAction::ScrollUp => ScrollPosition::AtOffset(current.saturating_sub(row_unit)),
        KeyAction::ScrollDown => ScrollPosition::AtOffset(current.saturating_add(row_unit)),
        KeyAction::PageUp => ScrollPosition::AtOffset(current.saturating_sub(page)),
        KeyAction::PageDown => ScrollPosition::AtOffset(current.saturating_add(page)),
        KeyAction::ScrollToTop => ScrollPosition::Top,
        KeyAction::ScrollToBottom => ScrollPosition::Bottom,
        KeyAction::Quit => return None,
    };
    Some(target)
}

/// Resolve `position` against the grid and notify it.
///
/// Returns `true` if the live offset changed.
pub fn scroll_to<C: Clock>(grid: &mut VirtualGrid<C>, position: ScrollPosition) -> bool {
    let viewport = grid.viewport();
    let offset = {
        let layout = grid.layout();
        position.resolve(
            grid.total_height(),
            u64::from(viewport.height()),
            |index| layout.and_then(|l| l.position(index)).map(|p| p.top),
        )
    };
    if offset == viewport.scroll_offset {
        return false;
    }
    grid.on_scroll(offset)
}

/// Handle a scroll key action.
///
/// Returns `true` if the live offset changed.
pub fn handle_scroll_action<C: Clock>(grid: &mut VirtualGrid<C>, action: KeyAction) -> bool {
    let viewport = grid.viewport();
    let Some(target) = scroll_target(
        action,
        viewport.scroll_offset,
        grid.geometry().row_unit(),
        u64::from(viewport.height()),
    ) else {
        return false;
    };
    scroll_to(grid, target)
}

/// Handle mouse wheel movement of `rows` cell rows (negative is up).
pub fn handle_wheel<C: Clock>(grid: &mut VirtualGrid<C>, rows: i64) -> bool {
    let current = grid.viewport().scroll_offset;
    let delta = rows.unsigned_abs().saturating_mul(grid.geometry().row_unit());
    let offset = if rows < 0 {
        current.saturating_sub(delta)
    } else {
        current.saturating_add(delta)
    };
    scroll_to(grid, ScrollPosition::AtOffset(offset))
}
