//! Render set: the (widget, position) pairs currently realized.

use super::layout::Position;
use super::visible_range::VisibleRange;
use crate::model::Widget;

/// One realized cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderEntry {
    /// Index into the widget sequence.
    pub index: usize,
    /// Snapshot of the widget; `value` is patched in place by updates.
    pub widget: Widget,
    /// Placement from the layout generation the set was built against.
    pub position: Position,
}

/// Ordered render entries plus the inputs they were derived from.
///
/// # Invariants
/// - entries are sorted by `index`, all within `range`
/// - rebuilt only when the range, the sequence version, or the layout
///   generation changes; value updates patch entries instead
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderSet {
    entries: Vec<RenderEntry>,
    range: VisibleRange,
    source_version: u64,
    layout_generation: u64,
}

impl RenderSet {
    /// Build a render set for `range`.
    pub fn build(
        range: VisibleRange,
        widgets: &[Widget],
        positions: &[Position],
        source_version: u64,
        layout_generation: u64,
    ) -> Self {
        Self {
            entries: build_render_entries(range, widgets, positions),
            range,
            source_version,
            layout_generation,
        }
    }

    /// Realized entries in index order.
    pub fn entries(&self) -> &[RenderEntry] {
        &self.entries
    }

    /// Number of realized entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is realized.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Range the set was built for.
    pub fn range(&self) -> VisibleRange {
        self.range
    }

    /// Whether a rebuild is needed for the given derivation inputs.
    pub fn is_stale(&self, range: VisibleRange, source_version: u64, layout_generation: u64) -> bool {
        self.range != range
            || self.source_version != source_version
            || self.layout_generation != layout_generation
    }

    /// Entry for a widget index, if realized.
    pub fn entry(&self, index: usize) -> Option<&RenderEntry> {
        self.entries
            .binary_search_by_key(&index, |entry| entry.index)
            .ok()
            .map(|slot| &self.entries[slot])
    }

    /// Patch the value of a realized entry.
    ///
    /// Returns `true` when the entry exists and its value changed. Positions
    /// and every other entry are left untouched.
    pub fn apply_value(&mut self, index: usize, value: i64) -> bool {
        let Ok(slot) = self.entries.binary_search_by_key(&index, |entry| entry.index) else {
            return false;
        };
        let widget = &mut self.entries[slot].widget;
        if widget.value == value {
            return false;
        }
        widget.value = value;
        true
    }

    /// Drop every entry, keeping nothing realized.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Pair each index in `range` with its widget and position.
///
/// Indices missing from either slice are skipped; this happens transiently
/// while a count change has reached the sequence but not yet the layout.
pub fn build_render_entries(
    range: VisibleRange,
    widgets: &[Widget],
    positions: &[Position],
) -> Vec<RenderEntry> {
    range
        .indices()
        .filter_map(|index| {
            let widget = widgets.get(index)?;
            let position = positions.get(index)?;
            Some(RenderEntry {
                index,
                widget: widget.clone(),
                position: *position,
            })
        })
        .collect()
}
