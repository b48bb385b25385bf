//! Frame layout: header bar on top, grid and scrollbar below.

use super::constants::{HEADER_HEIGHT, SCROLLBAR_WIDTH};
use super::grid::{render_scrollbar, GridView};
use super::styles::GridStyles;
use crate::view_state::{Clock, ViewportDimensions, VirtualGrid};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Screen areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameAreas {
    /// Status line.
    pub header: Rect,
    /// Cell area.
    pub grid: Rect,
    /// Vertical scrollbar column.
    pub scrollbar: Rect,
}

/// Split the frame into header, grid and scrollbar areas.
pub fn calculate_areas(area: Rect) -> FrameAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(SCROLLBAR_WIDTH)])
        .split(rows[1]);
    FrameAreas {
        header: rows[0],
        grid: columns[0],
        scrollbar: columns[1],
    }
}

/// Container dimensions the grid sees for a frame of `area`.
pub fn grid_viewport(area: Rect) -> ViewportDimensions {
    let grid = calculate_areas(area).grid;
    ViewportDimensions::new(u32::from(grid.width), u32::from(grid.height))
}

/// Counters shown in the header bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Updates dropped since start.
    pub dropped_updates: usize,
}

/// Header text for the current grid state.
pub fn header_line<C: Clock>(grid: &VirtualGrid<C>, info: &HeaderInfo) -> String {
    let range = grid.visible_range();
    let mut text = format!(
        " {} widgets | realized {}..{}",
        grid.widgets().len(),
        range.start,
        range.end
    );
    if info.dropped_updates > 0 {
        text.push_str(&format!(" | {} dropped", info.dropped_updates));
    }
    text.push_str(" | q quit");
    text
}

/// Render one full frame.
pub fn render_layout<C: Clock>(
    frame: &mut Frame,
    grid: &VirtualGrid<C>,
    info: &HeaderInfo,
    styles: GridStyles,
) {
    let areas = calculate_areas(frame.area());

    let header = Paragraph::new(Line::from(header_line(grid, info))).style(styles.header());
    frame.render_widget(header, areas.header);
    frame.render_widget(GridView::new(grid, styles), areas.grid);
    render_scrollbar(grid, areas.scrollbar, frame.buffer_mut());
}
