//! Layout inputs for invalidation tracking.

/// The two inputs a grid layout depends on.
///
/// Used for invalidation: a new layout generation is computed only when the
/// current params differ from the ones the last generation was built from.
/// Value updates and scroll changes never touch these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutParams {
    /// Number of widgets in the collection.
    pub widget_count: usize,
    /// Container width in units.
    pub container_width: u32,
}

impl LayoutParams {
    /// Create new layout params.
    pub fn new(widget_count: usize, container_width: u32) -> Self {
        Self {
            widget_count,
            container_width,
        }
    }

    /// Whether a layout can be computed from these params at all.
    pub fn is_layoutable(&self) -> bool {
        self.widget_count > 0 && self.container_width > 0
    }
}
