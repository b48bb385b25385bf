//! Grid area renderer.
//!
//! Draws every realized cell at its content position shifted by the live
//! scroll offset. Cells that straddle the top or bottom edge are drawn into
//! a scratch buffer and copied over clipped.

use super::cell::CellView;
use super::styles::GridStyles;
use crate::view_state::{CellProps, Clock, VirtualGrid};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::{
    Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
};

/// Widget drawing the realized part of a [`VirtualGrid`].
pub struct GridView<'a, C: Clock> {
    grid: &'a VirtualGrid<C>,
    styles: GridStyles,
}

impl<'a, C: Clock> GridView<'a, C> {
    /// View over `grid`'s current render set.
    pub fn new(grid: &'a VirtualGrid<C>, styles: GridStyles) -> Self {
        Self { grid, styles }
    }
}

impl<C: Clock> Widget for GridView<'_, C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        if self.grid.widgets().is_empty() {
            Paragraph::new("No widgets")
                .alignment(Alignment::Center)
                .render(area, buf);
            return;
        }
        let scroll = self.grid.viewport().scroll_offset;
        for props in self.grid.cells() {
            render_clipped(props, scroll, self.styles, area, buf);
        }
    }
}

/// Draw one cell, clipped to `area`. Returns `false` if nothing was visible.
fn render_clipped(
    props: CellProps<'_>,
    scroll: u64,
    styles: GridStyles,
    area: Rect,
    buf: &mut Buffer,
) -> bool {
    let height = u64::from(props.height);
    let width = u64::from(props.width);
    let window_bottom = scroll + u64::from(area.height);
    let area_width = u64::from(area.width);

    if props.top + height <= scroll || props.top >= window_bottom || props.left >= area_width {
        return false;
    }

    let cell_w = clamp_u16(width.min(area_width));
    let cell_h = clamp_u16(height);

    // Fully inside: draw straight into the frame.
    if props.top >= scroll && props.top + height <= window_bottom && props.left + width <= area_width {
        let rect = Rect::new(
            area.x + clamp_u16(props.left),
            area.y + clamp_u16(props.top - scroll),
            cell_w,
            cell_h,
        );
        CellView::new(props, styles).render(rect, buf);
        return true;
    }

    let mut scratch = Buffer::empty(Rect::new(0, 0, clamp_u16(width), cell_h));
    CellView::new(props, styles).render(scratch.area, &mut scratch);

    for dy in 0..cell_h {
        let content_y = props.top + u64::from(dy);
        if content_y < scroll || content_y >= window_bottom {
            continue;
        }
        let screen_y = area.y + clamp_u16(content_y - scroll);
        for dx in 0..scratch.area.width {
            let content_x = props.left + u64::from(dx);
            if content_x >= area_width {
                break;
            }
            let screen_x = area.x + clamp_u16(content_x);
            if let (Some(src), Some(dst)) = (scratch.cell((dx, dy)), buf.cell_mut((screen_x, screen_y)))
            {
                *dst = src.clone();
            }
        }
    }
    true
}

fn clamp_u16(value: u64) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Draw a vertical scrollbar for the grid's extent into `area`.
pub fn render_scrollbar<C: Clock>(grid: &VirtualGrid<C>, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    let max_offset = usize::try_from(grid.max_scroll_offset()).unwrap_or(usize::MAX);
    if max_offset == 0 {
        return;
    }
    let position = usize::try_from(grid.viewport().scroll_offset).unwrap_or(usize::MAX);
    let mut state = ScrollbarState::new(max_offset)
        .position(position.min(max_offset))
        .viewport_content_length(usize::from(area.height));
    Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .render(area, buf, &mut state);
}
