//! Grid layout computation.
//!
//! Positions depend only on the widget index, the number of columns that fit
//! in the container, and the fixed cell geometry. Widget content never
//! participates.

use super::layout_params::LayoutParams;
use super::types::CellGeometry;

/// Absolute placement of one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Offset from the left edge of the content.
    pub left: u64,
    /// Offset from the top edge of the content.
    pub top: u64,
    /// Zero-based row.
    pub row_index: usize,
    /// Zero-based column.
    pub col_index: usize,
}

/// One complete layout generation.
///
/// # Invariants
/// - `positions.len() == widget_count`
/// - `columns_per_row >= 1`
/// - `total_rows == ceil(widget_count / columns_per_row)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    positions: Vec<Position>,
    columns_per_row: usize,
    total_rows: usize,
}

impl Layout {
    /// Position for every widget index, in index order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Position of a single index, if it is covered by this layout.
    pub fn position(&self, index: usize) -> Option<&Position> {
        self.positions.get(index)
    }

    /// Columns per row. Always `>= 1`.
    pub fn columns_per_row(&self) -> usize {
        self.columns_per_row
    }

    /// Number of rows, the last possibly partial.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Number of widgets laid out.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True for a layout of zero widgets.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// A layout tagged with the inputs that produced it and a generation number.
///
/// Replaced wholesale on every recompute so layout metadata and positions are
/// never read from two different generations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutState {
    layout: Layout,
    params: LayoutParams,
    generation: u64,
}

impl LayoutState {
    /// Compute a new generation for `params`.
    pub fn compute(params: LayoutParams, geometry: &CellGeometry, generation: u64) -> Self {
        Self {
            layout: compute_layout(params.widget_count, params.container_width, geometry),
            params,
            generation,
        }
    }

    /// The computed layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Inputs this generation was computed from.
    pub fn params(&self) -> LayoutParams {
        self.params
    }

    /// Monotonic generation number.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Columns that fit in `container_width`, clamped to at least one.
pub fn columns_per_row(container_width: u32, geometry: &CellGeometry) -> usize {
    let fit = u64::from(container_width) / geometry.column_unit();
    usize::try_from(fit).unwrap_or(usize::MAX).max(1)
}

/// Compute positions for `widget_count` widgets in a container of the given width.
///
/// Pure and deterministic: identical inputs always produce identical output.
/// Callers skip this while the container is unmeasured or the collection is
/// empty; the column clamp still keeps a zero width well-defined.
///
/// # Examples
/// ```
/// # use widgrid::view_state::layout::compute_layout;
/// # use widgrid::view_state::types::CellGeometry;
/// let geometry = CellGeometry::new(100, 80, 10).unwrap();
/// let layout = compute_layout(6, 450, &geometry);
/// assert_eq!(layout.columns_per_row(), 4);
/// assert_eq!(layout.total_rows(), 2);
/// assert_eq!(layout.positions()[5].left, 110);
/// assert_eq!(layout.positions()[5].top, 90);
/// ```
pub fn compute_layout(widget_count: usize, container_width: u32, geometry: &CellGeometry) -> Layout {
    let columns = columns_per_row(container_width, geometry);
    let column_unit = geometry.column_unit();
    let row_unit = geometry.row_unit();

    let positions = (0..widget_count)
        .map(|index| {
            let row_index = index / columns;
            let col_index = index % columns;
            Position {
                left: col_index as u64 * column_unit,
                top: row_index as u64 * row_unit,
                row_index,
                col_index,
            }
        })
        .collect();

    Layout {
        positions,
        columns_per_row: columns,
        total_rows: widget_count.div_ceil(columns),
    }
}

/// Total scrollable extent of the grid.
///
/// Zero when there are no widgets or the container has no width yet.
pub fn compute_total_height(widget_count: usize, container_width: u32, geometry: &CellGeometry) -> u64 {
    if widget_count == 0 || container_width == 0 {
        return 0;
    }
    let rows = widget_count.div_ceil(columns_per_row(container_width, geometry));
    rows as u64 * geometry.row_unit()
}
