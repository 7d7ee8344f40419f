//! Keyboard navigation over table rows.
//!
//! Tracks a focus cursor (the row keyboard actions apply to) independently
//! of selection, and maps keys on the navigation surface to cursor moves,
//! page changes, selection toggles and row activation. The cursor is kept
//! in range as the row model shrinks.
//!
//! | Key        | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | Up / Down  | Move one row (first press focuses row 0)                 |
//! | Home / End | First / last row                                         |
//! | PageUp/Dn  | Previous / next page, Ctrl for first / last; cursor to 0 |
//! | Space      | Toggle selection of the focused row                      |
//! | Enter      | Activate the focused row                                 |
//! | Escape     | Clear selection, drop the cursor                         |

use std::sync::{Arc, Mutex, RwLock};

use weft_dom::{
    Document, DomEvent, Key, KeyEvent, Mutation, ScrollBehavior, ScrollBlock, Subscription, Tag,
};

use super::markup::ROW_ATTR;
use super::selection::SelectionMode;
use super::state::{TableEvent, TableState};
use crate::config::NavigationOptions;

/// Attribute marking the row that holds the focus cursor.
pub const FOCUSED_ATTR: &str = "data-focused";

/// Result of handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Key was not for us; let the host handle it.
    Ignored,
    /// Key was handled; the host should suppress its default action.
    Consumed,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

type RowActivateFn = dyn Fn(usize, &str) + Send + Sync;
type SelectionChangeFn = dyn Fn(&[String]) + Send + Sync;
type EscapeFn = dyn Fn() + Send + Sync;

#[derive(Default)]
struct Callbacks {
    row_activate: Option<Arc<RowActivateFn>>,
    selection_change: Option<Arc<SelectionChangeFn>>,
    escape: Option<Arc<EscapeFn>>,
}

#[derive(Debug, Default)]
struct Cursor {
    focused_row: Option<usize>,
    is_focused: bool,
}

struct NavInner {
    doc: Document,
    table: TableState,
    surface_id: String,
    options: RwLock<NavigationOptions>,
    cursor: RwLock<Cursor>,
    callbacks: RwLock<Callbacks>,
}

impl NavInner {
    fn options(&self) -> NavigationOptions {
        self.options.read().map(|g| *g).unwrap_or_default()
    }

    fn focused_row(&self) -> Option<usize> {
        self.cursor.read().ok().and_then(|g| g.focused_row)
    }

    /// Element IDs of the body rows under the surface, in page order.
    fn row_elements(&self) -> Vec<String> {
        self.doc
            .read_element(&self.surface_id, |surface| {
                surface
                    .query_all(|el| el.tag == Tag::Row && el.attribute(ROW_ATTR).is_some())
                    .into_iter()
                    .map(|el| el.id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether keys on `target` belong to a text control inside the surface.
    fn is_input_target(&self, target: Option<&str>) -> bool {
        let Some(target) = target else {
            return false;
        };
        self.doc.contains(&self.surface_id, target)
            && self
                .doc
                .read_element(target, |el| el.is_text_input())
                .unwrap_or(false)
    }

    fn within_surface(&self, id: &str) -> bool {
        self.doc.contains(&self.surface_id, id)
    }

    /// Move the cursor, then sync the focus marker and scroll position.
    fn move_focus(&self, next: Option<usize>) {
        let previous = match self.cursor.write() {
            Ok(mut guard) => std::mem::replace(&mut guard.focused_row, next),
            Err(_) => return,
        };
        if previous == next {
            return;
        }
        log::debug!(
            "[navigation] surface={} focus {:?} -> {:?}",
            self.surface_id,
            previous,
            next
        );
        self.sync_marker();
    }

    /// Put the focus marker on the cursor row (and only there), and bring
    /// that row into view.
    fn sync_marker(&self) {
        let focused = self.focused_row();
        let rows = self.row_elements();

        self.doc.update_element(&self.surface_id, |surface| {
            surface.walk_mut(&mut |el| {
                if el.tag == Tag::Row {
                    el.remove_attribute(FOCUSED_ATTR);
                }
            });
        });

        let Some(target) = focused.and_then(|i| rows.get(i)) else {
            return;
        };
        self.doc
            .update_element(target, |el| el.set_attribute(FOCUSED_ATTR, "true"));
        self.doc
            .scroll_into_view(target, ScrollBlock::Nearest, ScrollBehavior::Smooth);
    }

    fn sync_row_count(&self, count: usize) {
        let clamped = match self.focused_row() {
            Some(_) if count == 0 => None,
            Some(i) if i >= count => Some(count - 1),
            other => other,
        };
        if clamped != self.focused_row() {
            self.move_focus(clamped);
        }
    }

    fn on_focus_in(&self) {
        if let Ok(mut guard) = self.cursor.write() {
            guard.is_focused = true;
        }
        if self.focused_row().is_none() && self.table.row_count() > 0 {
            self.move_focus(Some(0));
        }
    }

    fn on_focus_out(&self, related: Option<&str>) {
        if related.is_some_and(|id| self.within_surface(id)) {
            return;
        }
        if let Ok(mut guard) = self.cursor.write() {
            guard.is_focused = false;
        }
    }

    fn notify_selection_change(&self) {
        let callback = self
            .callbacks
            .read()
            .ok()
            .and_then(|g| g.selection_change.clone());
        if let Some(callback) = callback {
            callback(&self.table.selected_ids());
        }
    }

    fn notify_row_activate(&self, index: usize, row_id: &str) {
        let callback = self
            .callbacks
            .read()
            .ok()
            .and_then(|g| g.row_activate.clone());
        if let Some(callback) = callback {
            callback(index, row_id);
        }
    }

    fn notify_escape(&self) {
        let callback = self.callbacks.read().ok().and_then(|g| g.escape.clone());
        if let Some(callback) = callback {
            callback();
        }
    }

    fn handle_key(&self, event: &KeyEvent) -> EventResult {
        if self.is_input_target(event.target.as_deref()) {
            return EventResult::Ignored;
        }

        let options = self.options();
        let row_count = self.table.row_count();
        let current = self.focused_row();
        let last = row_count.checked_sub(1);

        match event.key {
            Key::Down => {
                let Some(last) = last else {
                    return EventResult::Ignored;
                };
                self.move_focus(Some(current.map_or(0, |i| (i + 1).min(last))));
                EventResult::Consumed
            }
            Key::Up => {
                if row_count == 0 {
                    return EventResult::Ignored;
                }
                self.move_focus(Some(current.map_or(0, |i| i.saturating_sub(1))));
                EventResult::Consumed
            }
            Key::Home => {
                if row_count == 0 {
                    return EventResult::Ignored;
                }
                self.move_focus(Some(0));
                EventResult::Consumed
            }
            Key::End => match last {
                Some(last) => {
                    self.move_focus(Some(last));
                    EventResult::Consumed
                }
                None => EventResult::Ignored,
            },
            Key::PageDown if options.pagination_enabled && self.table.can_next_page() => {
                if event.modifiers.ctrl {
                    self.table.last_page();
                } else {
                    self.table.next_page();
                }
                self.reset_to_first_row();
                EventResult::Consumed
            }
            Key::PageUp if options.pagination_enabled && self.table.can_previous_page() => {
                if event.modifiers.ctrl {
                    self.table.first_page();
                } else {
                    self.table.previous_page();
                }
                self.reset_to_first_row();
                EventResult::Consumed
            }
            Key::Char(' ')
                if options.selection_enabled
                    && self.table.selection_mode() != SelectionMode::None =>
            {
                let Some(row_id) = current.and_then(|i| self.table.row_id(i)) else {
                    return EventResult::Ignored;
                };
                let (added, removed) = self.table.toggle_selected(&row_id);
                if !added.is_empty() || !removed.is_empty() {
                    self.notify_selection_change();
                }
                EventResult::Consumed
            }
            Key::Enter => {
                let Some((index, row_id)) =
                    current.and_then(|i| self.table.row_id(i).map(|id| (i, id)))
                else {
                    return EventResult::Ignored;
                };
                log::debug!("[navigation] activate row {index} ({row_id})");
                self.notify_row_activate(index, &row_id);
                EventResult::Consumed
            }
            Key::Escape => {
                if options.selection_enabled {
                    self.table.clear_selection();
                    self.notify_selection_change();
                }
                self.move_focus(None);
                self.notify_escape();
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    /// After a page change the rows are new; point the cursor at the first one.
    fn reset_to_first_row(&self) {
        let next = (self.table.row_count() > 0).then_some(0);
        if self.focused_row() == next {
            // Same index, different row: the marker still has to move.
            self.sync_marker();
        } else {
            self.move_focus(next);
        }
    }

    fn handle_dom_event(&self, event: &DomEvent) {
        let Some(target) = event.target() else {
            return;
        };
        if !self.within_surface(target) {
            return;
        }
        match event {
            DomEvent::KeyDown(key) => {
                self.handle_key(key);
            }
            DomEvent::FocusIn { .. } => self.on_focus_in(),
            DomEvent::FocusOut { related, .. } => self.on_focus_out(related.as_deref()),
        }
    }
}

/// Keyboard navigation state for one table surface.
///
/// # Example
///
/// ```
/// use weft::table::{ColumnDef, KeyboardNavigation, TableMarkup, TableState};
/// use weft::config::NavigationOptions;
/// use weft_dom::{Document, Key, KeyEvent};
///
/// let table = TableState::with_rows(
///     vec![ColumnDef::new("name", "Name")],
///     vec!["a".into(), "b".into()],
/// );
/// let markup = TableMarkup::for_table(&table);
/// let doc = Document::with_root(markup.render(&table, 400.0, |_| 100.0));
///
/// let nav = KeyboardNavigation::new(doc, table, &markup.table_id)
///     .with_options(NavigationOptions::default());
/// nav.attach();
/// nav.focus_table();
/// nav.handle_key(&KeyEvent::new(Key::Down));
/// assert_eq!(nav.focused_row_index(), Some(1));
/// ```
pub struct KeyboardNavigation {
    inner: Arc<NavInner>,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl KeyboardNavigation {
    /// Create navigation for the surface element `surface_id` in `doc`.
    pub fn new(doc: Document, table: TableState, surface_id: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(NavInner {
                doc,
                table,
                surface_id: surface_id.into(),
                options: RwLock::new(NavigationOptions::default()),
                cursor: RwLock::new(Cursor::default()),
                callbacks: RwLock::new(Callbacks::default()),
            }),
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    pub fn with_options(self, options: NavigationOptions) -> Self {
        self.set_options(options);
        self
    }

    /// Called with (row index on page, row ID) when Enter is pressed on a row.
    pub fn on_row_activate(self, callback: impl Fn(usize, &str) + Send + Sync + 'static) -> Self {
        if let Ok(mut guard) = self.inner.callbacks.write() {
            guard.row_activate = Some(Arc::new(callback));
        }
        self
    }

    /// Called with the full selected-ID list after Space or Escape changes it.
    pub fn on_selection_change(
        self,
        callback: impl Fn(&[String]) + Send + Sync + 'static,
    ) -> Self {
        if let Ok(mut guard) = self.inner.callbacks.write() {
            guard.selection_change = Some(Arc::new(callback));
        }
        self
    }

    /// Called after Escape has been handled.
    pub fn on_escape(self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        if let Ok(mut guard) = self.inner.callbacks.write() {
            guard.escape = Some(Arc::new(callback));
        }
        self
    }

    pub fn options(&self) -> NavigationOptions {
        self.inner.options()
    }

    pub fn set_options(&self, options: NavigationOptions) {
        if let Ok(mut guard) = self.inner.options.write() {
            *guard = options;
        }
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    /// Row holding the focus cursor, or `None` when no row is focused.
    pub fn focused_row_index(&self) -> Option<usize> {
        self.inner.focused_row()
    }

    /// Whether the navigation surface currently holds input focus.
    pub fn is_focused(&self) -> bool {
        self.inner
            .cursor
            .read()
            .map(|g| g.is_focused)
            .unwrap_or(false)
    }

    /// Move the cursor to `index` (clamped to the current page).
    pub fn set_focused_row(&self, index: usize) {
        let count = self.inner.table.row_count();
        if count == 0 {
            return;
        }
        self.inner.move_focus(Some(index.min(count - 1)));
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Handle a key press on the surface.
    pub fn handle_key(&self, event: &KeyEvent) -> EventResult {
        self.inner.handle_key(event)
    }

    /// The surface gained focus.
    pub fn handle_focus_in(&self) {
        self.inner.on_focus_in();
    }

    /// The surface lost focus to `related` (`None` when focus left the document).
    pub fn handle_focus_out(&self, related: Option<&str>) {
        self.inner.on_focus_out(related);
    }

    /// Re-clamp the cursor after the row collection changed size.
    pub fn sync_row_count(&self, count: usize) {
        self.inner.sync_row_count(count);
    }

    /// Give the surface document focus.
    pub fn focus_table(&self) {
        self.inner.doc.focus(&self.inner.surface_id);
        self.inner.on_focus_in();
    }

    /// Take document focus away from the surface.
    pub fn blur_table(&self) {
        let holds_focus = self
            .inner
            .doc
            .focused()
            .is_some_and(|id| self.inner.within_surface(&id));
        if holds_focus {
            self.inner.doc.blur();
        }
        self.inner.on_focus_out(None);
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Start listening for key and focus events on the surface, for
    /// re-rendered trees, and for row-count changes on the table. Replaces
    /// any previous listeners.
    pub fn attach(&self) {
        self.detach();

        let mut subscriptions = Vec::with_capacity(3);

        let inner = Arc::clone(&self.inner);
        subscriptions.push(self.inner.doc.on_event(move |event| inner.handle_dom_event(event)));

        let inner = Arc::clone(&self.inner);
        subscriptions.push(self.inner.doc.on_mutation(move |mutation| {
            if let Mutation::Mounted { .. } = mutation {
                inner.sync_marker();
            }
        }));

        let inner = Arc::clone(&self.inner);
        subscriptions.push(self.inner.table.on_change(move |event| {
            if let TableEvent::RowCountChanged(count) = event {
                inner.sync_row_count(*count);
            }
        }));

        if let Ok(mut guard) = self.subscriptions.lock() {
            *guard = subscriptions;
        }
        log::debug!("[navigation] attached to surface {}", self.inner.surface_id);
    }

    /// Remove every listener registered by [`attach`](Self::attach).
    pub fn detach(&self) {
        let previous = self
            .subscriptions
            .lock()
            .map(|mut g| std::mem::take(&mut *g))
            .unwrap_or_default();
        if !previous.is_empty() {
            log::debug!("[navigation] detached from surface {}", self.inner.surface_id);
        }
        drop(previous);
    }

    pub fn is_attached(&self) -> bool {
        self.subscriptions
            .lock()
            .map(|g| !g.is_empty())
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for KeyboardNavigation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardNavigation")
            .field("surface", &self.inner.surface_id)
            .field("focused_row", &self.focused_row_index())
            .field("is_focused", &self.is_focused())
            .finish()
    }
}
