//! Table model state.
//!
//! `TableState` is the row/column model the pinning engine and keyboard
//! navigation read from: column pin and visibility, row IDs, selection,
//! and pagination. It is a cheap cloneable handle; every clone sees the
//! same data and the same change notifications.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use weft_dom::{Observers, Subscription};

use super::column::{ColumnDef, ColumnId, PinSide};
use super::selection::{Selection, SelectionMode};

/// Unique identifier for a table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// Change notifications published by [`TableState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// A column's pin side changed.
    PinningChanged,
    /// A column was shown or hidden.
    VisibilityChanged,
    /// The number of rows on the current page changed.
    RowCountChanged(usize),
    /// Rows were selected or deselected.
    SelectionChanged,
    /// The current page changed.
    PageChanged(usize),
}

#[derive(Debug)]
struct TableInner {
    columns: Vec<ColumnDef>,
    /// Row IDs across all pages, in display order.
    rows: Vec<String>,
    selection: Selection,
    selection_mode: SelectionMode,
    /// Rows per page; `None` disables pagination.
    page_size: Option<usize>,
    page_index: usize,
}

impl TableInner {
    fn page_count(&self) -> usize {
        match self.page_size {
            Some(size) if size > 0 => self.rows.len().div_ceil(size).max(1),
            _ => 1,
        }
    }

    fn page_range(&self) -> Range<usize> {
        match self.page_size {
            Some(size) if size > 0 => {
                let start = (self.page_index * size).min(self.rows.len());
                let end = (start + size).min(self.rows.len());
                start..end
            }
            _ => 0..self.rows.len(),
        }
    }

    fn row_count(&self) -> usize {
        self.page_range().len()
    }

    fn pinned(&self, side: PinSide) -> Vec<ColumnId> {
        self.columns
            .iter()
            .filter(|c| c.visible && c.pin == side)
            .map(|c| c.id.clone())
            .collect()
    }

    fn column_mut(&mut self, id: &ColumnId) -> Option<&mut ColumnDef> {
        self.columns.iter_mut().find(|c| &c.id == id)
    }
}

/// Shared table model.
#[derive(Debug, Clone)]
pub struct TableState {
    id: TableId,
    inner: Arc<RwLock<TableInner>>,
    events: Observers<TableEvent>,
}

impl TableState {
    /// Create a table with column definitions and no rows.
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        Self {
            id: TableId::new(),
            inner: Arc::new(RwLock::new(TableInner {
                columns,
                rows: Vec::new(),
                selection: Selection::new(),
                selection_mode: SelectionMode::None,
                page_size: None,
                page_index: 0,
            })),
            events: Observers::new(),
        }
    }

    /// Create a table with initial rows.
    pub fn with_rows(columns: Vec<ColumnDef>, rows: Vec<String>) -> Self {
        let table = Self::new(columns);
        if let Ok(mut guard) = table.inner.write() {
            guard.rows = rows;
        }
        table
    }

    /// Set the selection mode.
    pub fn with_selection_mode(self, mode: SelectionMode) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.selection_mode = mode;
        }
        self
    }

    /// Enable pagination with `size` rows per page.
    pub fn with_page_size(self, size: usize) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.page_size = Some(size);
        }
        self
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    /// Subscribe to model changes.
    #[must_use = "dropping the subscription removes the callback"]
    pub fn on_change(&self, callback: impl Fn(&TableEvent) + Send + Sync + 'static) -> Subscription {
        self.events.subscribe(callback)
    }

    fn emit(&self, events: Vec<TableEvent>) {
        for event in &events {
            log::trace!("[table {}] {:?}", self.id, event);
            self.events.notify(event);
        }
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> Vec<ColumnDef> {
        self.inner
            .read()
            .map(|g| g.columns.clone())
            .unwrap_or_default()
    }

    /// Visible columns in table order.
    pub fn visible_columns(&self) -> Vec<ColumnDef> {
        self.inner
            .read()
            .map(|g| g.columns.iter().filter(|c| c.visible).cloned().collect())
            .unwrap_or_default()
    }

    /// Visible left-pinned columns in table order.
    pub fn leaf_columns_pinned_left(&self) -> Vec<ColumnId> {
        self.inner
            .read()
            .map(|g| g.pinned(PinSide::Left))
            .unwrap_or_default()
    }

    /// Visible right-pinned columns in table order.
    pub fn leaf_columns_pinned_right(&self) -> Vec<ColumnId> {
        self.inner
            .read()
            .map(|g| g.pinned(PinSide::Right))
            .unwrap_or_default()
    }

    /// Pin (or unpin) a column. Returns true if the side changed.
    pub fn set_pin(&self, id: &ColumnId, side: PinSide) -> bool {
        let changed = self
            .inner
            .write()
            .ok()
            .and_then(|mut g| {
                let column = g.column_mut(id)?;
                if column.pin == side {
                    return Some(false);
                }
                column.pin = side;
                Some(true)
            })
            .unwrap_or(false);

        if changed {
            self.emit(vec![TableEvent::PinningChanged]);
        }
        changed
    }

    /// Show or hide a column. Returns true if visibility changed.
    pub fn set_visible(&self, id: &ColumnId, visible: bool) -> bool {
        let changed = self
            .inner
            .write()
            .ok()
            .and_then(|mut g| {
                let column = g.column_mut(id)?;
                if column.visible == visible {
                    return Some(false);
                }
                column.visible = visible;
                Some(true)
            })
            .unwrap_or(false);

        if changed {
            self.emit(vec![TableEvent::VisibilityChanged]);
        }
        changed
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Number of rows on the current page.
    pub fn row_count(&self) -> usize {
        self.inner.read().map(|g| g.row_count()).unwrap_or(0)
    }

    /// Number of rows across all pages.
    pub fn total_rows(&self) -> usize {
        self.inner.read().map(|g| g.rows.len()).unwrap_or(0)
    }

    /// ID of the row at `index` on the current page.
    pub fn row_id(&self, index: usize) -> Option<String> {
        self.inner.read().ok().and_then(|g| {
            g.page_range()
                .nth(index)
                .and_then(|absolute| g.rows.get(absolute).cloned())
        })
    }

    /// IDs of the rows on the current page.
    pub fn page_row_ids(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.rows[g.page_range()].to_vec())
            .unwrap_or_default()
    }

    /// Replace all rows.
    ///
    /// The page index is clamped to the new page count and selected IDs
    /// that no longer exist are dropped.
    pub fn set_rows(&self, rows: Vec<String>) {
        let mut events = Vec::new();
        if let Ok(mut guard) = self.inner.write() {
            let before_count = guard.row_count();
            let before_page = guard.page_index;

            guard.rows = rows;
            guard.page_index = guard.page_index.min(guard.page_count() - 1);

            let present: HashSet<&str> = guard.rows.iter().map(String::as_str).collect();
            let stale: Vec<String> = guard
                .selection
                .selected()
                .into_iter()
                .filter(|id| !present.contains(id.as_str()))
                .collect();
            drop(present);
            if !stale.is_empty() {
                for id in &stale {
                    guard.selection.toggle(id, SelectionMode::Multiple);
                }
                events.push(TableEvent::SelectionChanged);
            }
            if guard.page_index != before_page {
                events.push(TableEvent::PageChanged(guard.page_index));
            }
            let after_count = guard.row_count();
            if after_count != before_count {
                events.push(TableEvent::RowCountChanged(after_count));
            }
        }
        self.emit(events);
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn selection_mode(&self) -> SelectionMode {
        self.inner
            .read()
            .map(|g| g.selection_mode)
            .unwrap_or_default()
    }

    pub fn set_selection_mode(&self, mode: SelectionMode) {
        let mut cleared = false;
        if let Ok(mut guard) = self.inner.write() {
            guard.selection_mode = mode;
            if mode == SelectionMode::None {
                cleared = !guard.selection.clear().is_empty();
            }
        }
        if cleared {
            self.emit(vec![TableEvent::SelectionChanged]);
        }
    }

    /// All selected row IDs, sorted.
    pub fn selected_ids(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.selection.selected())
            .unwrap_or_default()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.inner
            .read()
            .map(|g| g.selection.is_selected(id))
            .unwrap_or(false)
    }

    /// Toggle selection of a row by ID.
    /// Returns (added IDs, removed IDs).
    pub fn toggle_selected(&self, id: &str) -> (Vec<String>, Vec<String>) {
        let result = self
            .inner
            .write()
            .map(|mut g| {
                let mode = g.selection_mode;
                g.selection.toggle(id, mode)
            })
            .unwrap_or_default();

        if !result.0.is_empty() || !result.1.is_empty() {
            self.emit(vec![TableEvent::SelectionChanged]);
        }
        result
    }

    /// Select every row on the current page. Only applies in
    /// [`SelectionMode::Multiple`]. Returns the newly selected IDs.
    pub fn select_page(&self) -> Vec<String> {
        let added = self
            .inner
            .write()
            .map(|mut g| {
                if g.selection_mode != SelectionMode::Multiple {
                    return Vec::new();
                }
                let page = g.rows[g.page_range()].to_vec();
                g.selection.select_all(&page)
            })
            .unwrap_or_default();

        if !added.is_empty() {
            self.emit(vec![TableEvent::SelectionChanged]);
        }
        added
    }

    /// Deselect every row.
    /// Returns the IDs that were deselected.
    pub fn clear_selection(&self) -> Vec<String> {
        let removed = self
            .inner
            .write()
            .map(|mut g| g.selection.clear())
            .unwrap_or_default();

        if !removed.is_empty() {
            self.emit(vec![TableEvent::SelectionChanged]);
        }
        removed
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    pub fn pagination_enabled(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.page_size.is_some_and(|s| s > 0))
            .unwrap_or(false)
    }

    /// Change the page size (`None` disables pagination). Returns to page 0.
    pub fn set_page_size(&self, size: Option<usize>) {
        let mut events = Vec::new();
        if let Ok(mut guard) = self.inner.write() {
            let before_count = guard.row_count();
            let before_page = guard.page_index;
            guard.page_size = size;
            guard.page_index = 0;
            if before_page != 0 {
                events.push(TableEvent::PageChanged(0));
            }
            let after_count = guard.row_count();
            if after_count != before_count {
                events.push(TableEvent::RowCountChanged(after_count));
            }
        }
        self.emit(events);
    }

    pub fn page_index(&self) -> usize {
        self.inner.read().map(|g| g.page_index).unwrap_or(0)
    }

    pub fn page_count(&self) -> usize {
        self.inner.read().map(|g| g.page_count()).unwrap_or(1)
    }

    pub fn can_next_page(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.page_index + 1 < g.page_count())
            .unwrap_or(false)
    }

    pub fn can_previous_page(&self) -> bool {
        self.inner.read().map(|g| g.page_index > 0).unwrap_or(false)
    }

    /// Go to `index`, clamped to the valid range. Returns true if the page changed.
    pub fn set_page_index(&self, index: usize) -> bool {
        let mut events = Vec::new();
        if let Ok(mut guard) = self.inner.write() {
            let target = index.min(guard.page_count() - 1);
            if target != guard.page_index {
                let before_count = guard.row_count();
                guard.page_index = target;
                events.push(TableEvent::PageChanged(target));
                let after_count = guard.row_count();
                if after_count != before_count {
                    events.push(TableEvent::RowCountChanged(after_count));
                }
            }
        }
        let changed = !events.is_empty();
        self.emit(events);
        changed
    }

    pub fn next_page(&self) -> bool {
        self.set_page_index(self.page_index() + 1)
    }

    pub fn previous_page(&self) -> bool {
        match self.page_index().checked_sub(1) {
            Some(index) => self.set_page_index(index),
            None => false,
        }
    }

    pub fn first_page(&self) -> bool {
        self.set_page_index(0)
    }

    pub fn last_page(&self) -> bool {
        self.set_page_index(self.page_count() - 1)
    }
}
