//! Visible range calculation

use super::types::CellGeometry;
use std::ops::Range;

/// Half-open range of widget indices that must be realized.
///
/// Includes one row of lookbehind above the viewport and a lookahead margin
/// below it.
///
/// # Invariants
/// - `start <= end`
/// - `end <= widget_count` of the collection it was computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VisibleRange {
    /// First realized index (inclusive).
    pub start: usize,
    /// Last realized index (exclusive).
    pub end: usize,
}

impl VisibleRange {
    /// Create new visible range.
    ///
    /// # Panics
    /// In debug builds, panics if `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "VisibleRange start {start} > end {end}");
        Self { start, end }
    }

    /// Number of realized indices.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if range is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Iterate over realized indices.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Check if a specific index is realized.
    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }
}

/// Map a scroll position onto the indices that must be realized.
///
/// `start_row` backs off one row from the first visible row; the row count
/// covers the viewport plus two rows of margin. Both ends are clamped to the
/// collection, and `start` is clamped to `end` so a scroll offset past the
/// end of the content yields an empty range.
///
/// Returns `None` when `columns_per_row` is zero: there is nothing sensible
/// to compute and the caller keeps its previous range.
///
/// # Examples
/// ```
/// # use widgrid::view_state::visible_range::{compute_visible_range, VisibleRange};
/// # use widgrid::view_state::types::CellGeometry;
/// let geometry = CellGeometry::new(100, 80, 10).unwrap();
/// let range = compute_visible_range(450, 300, 4, 15, &geometry, 60);
/// assert_eq!(range, Some(VisibleRange::new(16, 40)));
/// ```
pub fn compute_visible_range(
    scroll_offset: u64,
    viewport_height: u32,
    columns_per_row: usize,
    total_rows: usize,
    geometry: &CellGeometry,
    widget_count: usize,
) -> Option<VisibleRange> {
    if columns_per_row == 0 {
        return None;
    }

    let row_unit = geometry.row_unit();
    let first_visible_row = usize::try_from(scroll_offset / row_unit).unwrap_or(usize::MAX);
    let start_row = first_visible_row.saturating_sub(1);
    let rows_in_view = usize::try_from(u64::from(viewport_height).div_ceil(row_unit)).unwrap_or(usize::MAX);
    let visible_row_count = rows_in_view.saturating_add(2);
    let end_row = total_rows.min(start_row.saturating_add(visible_row_count));

    let end = widget_count.min(end_row.saturating_mul(columns_per_row));
    let start = start_row.saturating_mul(columns_per_row).min(end);

    Some(VisibleRange::new(start, end))
}
