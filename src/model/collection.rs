//! Versioned, index-addressable widget sequence.

use super::identifiers::WidgetId;
use super::widget::Widget;
use std::collections::HashMap;

/// Ordered widgets with an id index and a sequence version.
///
/// The version identifies the *sequence*: it changes on every re-seed
/// (which is how the set, order or count changes) and never on a value-only
/// update. Consumers compare versions instead of sequence references.
///
/// If the same id appears more than once, lookups resolve to its first
/// occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetCollection {
    widgets: Vec<Widget>,
    index: HashMap<WidgetId, usize>,
    version: u64,
}

impl Default for WidgetCollection {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl WidgetCollection {
    /// Create a collection at version 1.
    pub fn new(widgets: Vec<Widget>) -> Self {
        let index = build_index(&widgets);
        Self {
            widgets,
            index,
            version: 1,
        }
    }

    /// Replace the whole sequence.
    pub fn reseed(&mut self, widgets: Vec<Widget>) {
        self.index = build_index(&widgets);
        self.widgets = widgets;
        self.version += 1;
    }

    /// Set a widget's value in place. Returns its index, or `None` for an unknown id.
    ///
    /// Does not change the version.
    pub fn set_value(&mut self, id: &WidgetId, value: i64) -> Option<usize> {
        let slot = *self.index.get(id)?;
        self.widgets[slot].value = value;
        Some(slot)
    }

    /// Index of `id`.
    pub fn index_of(&self, id: &WidgetId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Widget at `index`.
    pub fn get(&self, index: usize) -> Option<&Widget> {
        self.widgets.get(index)
    }

    /// All widgets in order.
    pub fn as_slice(&self) -> &[Widget] {
        &self.widgets
    }

    /// Number of widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// True when empty.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Current sequence version.
    pub fn version(&self) -> u64 {
        self.version
    }
}

fn build_index(widgets: &[Widget]) -> HashMap<WidgetId, usize> {
    let mut index = HashMap::with_capacity(widgets.len());
    for (slot, widget) in widgets.iter().enumerate() {
        index.entry(widget.id.clone()).or_insert(slot);
    }
    index
}
