//! Semantic scroll position

/// A scroll target expressed by intent rather than raw offset.
///
/// - `Top`: offset 0
/// - `Bottom`: last full viewport of content
/// - `AtOffset`: absolute offset
/// - `AtWidget`: row containing a widget index, at the top of the viewport
/// - `Fraction`: proportional position (for scrollbar clicks)
///
/// # Clamping Behavior
/// Every variant resolves into `[0, max(0, total_height - viewport_height)]`
/// so the viewport is never scrolled past the content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScrollPosition {
    /// View from the very top.
    #[default]
    Top,

    /// View the last viewport of content.
    Bottom,

    /// Specific offset from the top. Clamped on resolution.
    AtOffset(u64),

    /// Put the row of this widget at the top of the viewport.
    /// Unknown indices resolve to the top.
    AtWidget(usize),

    /// Fractional position, 0.0 = top, 1.0 = bottom. Clamped to [0.0, 1.0].
    Fraction(f64),
}

impl ScrollPosition {
    /// Resolve to an absolute scroll offset.
    ///
    /// # Arguments
    /// - `total_height`: scrollable extent of the content
    /// - `viewport_height`: visible height
    /// - `widget_top`: top offset of a widget index in the current layout
    pub fn resolve<F>(&self, total_height: u64, viewport_height: u64, widget_top: F) -> u64
    where
        F: Fn(usize) -> Option<u64>,
    {
        let max_offset = total_height.saturating_sub(viewport_height);
        let raw = match *self {
            Self::Top => 0,
            Self::Bottom => max_offset,
            Self::AtOffset(offset) => offset,
            Self::AtWidget(index) => widget_top(index).unwrap_or(0),
            Self::Fraction(fraction) => {
                let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
                (fraction * max_offset as f64).round() as u64
            }
        };
        raw.min(max_offset)
    }
}
