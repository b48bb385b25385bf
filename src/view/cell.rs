//! Single-cell renderer.

use super::constants::MIN_BORDERED_HEIGHT;
use super::styles::GridStyles;
use crate::view_state::CellProps;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Ellipsis appended to truncated text.
const ELLIPSIS: char = '…';

/// Cut `text` so it occupies at most `max_width` terminal columns.
///
/// Truncated text ends in an ellipsis when there is room for one.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let budget = max_width - 1;
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

/// One widget drawn as a bordered box with its label and value.
///
/// Cells too short for a border show the text lines alone.
#[derive(Debug, Clone, Copy)]
pub struct CellView<'a> {
    props: CellProps<'a>,
    styles: GridStyles,
}

impl<'a> CellView<'a> {
    /// View of one realized cell.
    pub fn new(props: CellProps<'a>, styles: GridStyles) -> Self {
        Self { props, styles }
    }

    fn label(&self) -> String {
        match self.props.name {
            Some(name) => name.to_string(),
            None => self.props.id.to_string(),
        }
    }
}

impl Widget for CellView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let style = self.styles.cell(self.props.value);
        let inner = if area.height >= MIN_BORDERED_HEIGHT && area.width >= 3 {
            let block = Block::bordered().border_style(style);
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let width = usize::from(inner.width);
        let lines = vec![
            Line::styled(truncate_to_width(&self.label(), width), self.styles.label()),
            Line::styled(truncate_to_width(&self.props.value.to_string(), width), style),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}
