//! Row selection keyed by row ID.
//!
//! Using string IDs keeps a selection stable across pagination and row
//! replacement: a row selected on page one is still selected when the
//! user comes back to it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Selection mode for table rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Rows cannot be selected
    #[default]
    None,
    /// At most one row is selected
    Single,
    /// Any number of rows may be selected
    Multiple,
}

/// ID-based selection state.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn selected(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selection.
    /// Returns the IDs that were deselected.
    pub fn clear(&mut self) -> Vec<String> {
        let mut removed: Vec<_> = self.selected.drain().collect();
        removed.sort();
        removed
    }

    /// Toggle one ID under `mode`.
    /// Returns (added, removed) IDs.
    pub fn toggle(&mut self, id: &str, mode: SelectionMode) -> (Vec<String>, Vec<String>) {
        match mode {
            SelectionMode::None => (vec![], vec![]),
            SelectionMode::Single => {
                if self.selected.contains(id) {
                    self.selected.remove(id);
                    (vec![], vec![id.to_string()])
                } else {
                    let removed = self.clear();
                    self.selected.insert(id.to_string());
                    (vec![id.to_string()], removed)
                }
            }
            SelectionMode::Multiple => {
                if self.selected.remove(id) {
                    (vec![], vec![id.to_string()])
                } else {
                    self.selected.insert(id.to_string());
                    (vec![id.to_string()], vec![])
                }
            }
        }
    }

    /// Select every ID in `ids`.
    /// Returns the IDs that were newly selected.
    pub fn select_all(&mut self, ids: &[String]) -> Vec<String> {
        ids.iter()
            .filter(|id| self.selected.insert((*id).clone()))
            .cloned()
            .collect()
    }
}
