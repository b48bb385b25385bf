//! Core view-state newtypes

/// Error returned when a cell dimension is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cell geometry must be positive (width={cell_width}, height={cell_height}, spacing={spacing})")]
pub struct InvalidGeometry {
    /// Rejected cell width.
    pub cell_width: u32,
    /// Rejected cell height.
    pub cell_height: u32,
    /// Rejected spacing.
    pub spacing: u32,
}

/// Fixed cell dimensions shared by every widget in a grid.
///
/// # Invariants
/// - `cell_width`, `cell_height` and `spacing` are all `>= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellGeometry {
    cell_width: u32,
    cell_height: u32,
    spacing: u32,
}

impl CellGeometry {
    /// Smart constructor that rejects zero dimensions.
    pub fn new(cell_width: u32, cell_height: u32, spacing: u32) -> Result<Self, InvalidGeometry> {
        if cell_width == 0 || cell_height == 0 || spacing == 0 {
            return Err(InvalidGeometry {
                cell_width,
                cell_height,
                spacing,
            });
        }
        Ok(Self {
            cell_width,
            cell_height,
            spacing,
        })
    }

    /// Width of one cell.
    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    /// Height of one cell.
    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// Gap between adjacent cells, horizontally and vertically.
    pub fn spacing(&self) -> u32 {
        self.spacing
    }

    /// Horizontal stride: `cell_width + spacing`.
    pub fn column_unit(&self) -> u64 {
        u64::from(self.cell_width) + u64::from(self.spacing)
    }

    /// Vertical stride: `cell_height + spacing`.
    pub fn row_unit(&self) -> u64 {
        u64::from(self.cell_height) + u64::from(self.spacing)
    }
}

/// Container size as reported by the geometry source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportDimensions {
    /// Width in units.
    pub width: u32,
    /// Height in units.
    pub height: u32,
}

impl ViewportDimensions {
    /// Create new viewport dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True until the container has a non-zero width.
    pub fn is_unmeasured(&self) -> bool {
        self.width == 0
    }
}

/// Live viewport state: container size plus the current scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportState {
    /// Vertical scroll offset from the top of the content.
    pub scroll_offset: u64,
    /// Container size.
    pub dimensions: ViewportDimensions,
}

impl ViewportState {
    /// Container width.
    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    /// Container height.
    pub fn height(&self) -> u32 {
        self.dimensions.height
    }
}
