//! Offsets for columns frozen to the leading or trailing edge.
//!
//! A pinned column stays put while the rest of the table scrolls under it,
//! so each one needs its distance from the edge it is pinned to: the sum of
//! the rendered widths of the pinned columns between it and that edge.
//!
//! [`compute_offsets`] is the pure calculation. [`PinnedColumns`] binds it to
//! a [`Document`] and a [`TableState`], measuring header cells, writing
//! `left`/`right` inline styles to every cell of each pinned column, and
//! recomputing whenever pinning, visibility, the row model or any cell size
//! changes, and whenever the host mounts a re-rendered tree. Each recompute starts from the current tree, so running it
//! twice for the same change is harmless.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use weft_dom::{Document, Element, Mutation, Observers, Subscription, Tag};

use super::column::{ColumnId, PinSide};
use super::markup::{COLUMN_ATTR, TableMarkup};
use super::shadow::ScrollShadow;
use super::state::{TableEvent, TableState};

/// Attribute naming the edge a cell is pinned to.
pub const PINNED_ATTR: &str = "data-pinned";

/// Distance of a pinned column from its edge, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnOffset {
    pub side: PinSide,
    pub px: f32,
}

impl ColumnOffset {
    /// The inline style property this offset is written to.
    pub fn style_property(&self) -> Option<&'static str> {
        match self.side {
            PinSide::Left => Some("left"),
            PinSide::Right => Some("right"),
            PinSide::None => None,
        }
    }
}

/// Offsets keyed by column.
pub type PinOffsets = HashMap<ColumnId, ColumnOffset>;

/// Compute offsets from `(column, rendered width)` pairs in table order.
///
/// Left columns accumulate from the first column; right columns accumulate
/// from the last one, so the column nearest the trailing edge sits at 0.
pub fn compute_offsets(left: &[(ColumnId, f32)], right: &[(ColumnId, f32)]) -> PinOffsets {
    let mut offsets = PinOffsets::with_capacity(left.len() + right.len());

    let mut acc = 0.0;
    for (id, width) in left {
        offsets.insert(
            id.clone(),
            ColumnOffset {
                side: PinSide::Left,
                px: acc,
            },
        );
        acc += width;
    }

    let mut acc = 0.0;
    for (id, width) in right.iter().rev() {
        offsets.insert(
            id.clone(),
            ColumnOffset {
                side: PinSide::Right,
                px: acc,
            },
        );
        acc += width;
    }

    offsets
}

fn format_px(px: f32) -> String {
    format!("{px}px")
}

/// Rendered width of the header cell for `column`, if one exists.
fn header_width(table: &Element, column: &ColumnId) -> Option<f32> {
    table
        .query_all(|el| {
            el.tag == Tag::HeaderCell && el.attribute(COLUMN_ATTR) == Some(column.as_str())
        })
        .first()
        .map(|el| el.width)
}

/// Pair each column with its measured width, skipping columns with no header cell.
fn measure(table: &Element, columns: &[ColumnId]) -> Vec<(ColumnId, f32)> {
    columns
        .iter()
        .filter_map(|id| match header_width(table, id) {
            Some(width) => Some((id.clone(), width)),
            None => {
                log::debug!("[pinning] no header cell for column {id}, skipping");
                None
            }
        })
        .collect()
}

/// Write offsets onto every header and body cell; clear stale ones.
fn apply_offsets(table: &mut Element, offsets: &PinOffsets) {
    table.walk_mut(&mut |el| {
        if !matches!(el.tag, Tag::HeaderCell | Tag::Cell) {
            return;
        }
        let Some(column) = el.attribute(COLUMN_ATTR).map(ColumnId::from) else {
            return;
        };

        el.remove_style_property("left");
        el.remove_style_property("right");
        el.remove_attribute(PINNED_ATTR);

        if let Some(offset) = offsets.get(&column)
            && let Some(property) = offset.style_property()
        {
            el.set_style_property(property, format_px(offset.px));
            el.set_attribute(PINNED_ATTR, property);
        }
    });
}

struct PinnedInner {
    doc: Document,
    table: TableState,
    table_el: String,
    viewport_el: String,
    offsets: RwLock<PinOffsets>,
    shadow: RwLock<ScrollShadow>,
    shadow_observers: Observers<ScrollShadow>,
}

impl PinnedInner {
    fn recompute_offsets(&self) {
        if !self.doc.is_mounted() {
            log::debug!("[pinning] document not mounted, skipping recompute");
            return;
        }

        let left = self.table.leaf_columns_pinned_left();
        let right = self.table.leaf_columns_pinned_right();

        let computed = self.doc.update_element(&self.table_el, |table_el| {
            let left = measure(table_el, &left);
            let right = measure(table_el, &right);
            let offsets = compute_offsets(&left, &right);
            apply_offsets(table_el, &offsets);
            offsets
        });

        match computed {
            Some(offsets) => {
                log::debug!(
                    "[pinning] table={} recomputed {} pinned column offsets",
                    self.table_el,
                    offsets.len()
                );
                for (id, offset) in &offsets {
                    log::trace!("[pinning]   {id} {:?} {}px", offset.side, offset.px);
                }
                if let Ok(mut guard) = self.offsets.write() {
                    *guard = offsets;
                }
            }
            None => log::debug!("[pinning] table element {} not found", self.table_el),
        }
    }

    fn recompute_shadow(&self) {
        let Some(metrics) = self.doc.read_element(&self.viewport_el, |el| el.scroll) else {
            return;
        };
        let next = ScrollShadow::from_metrics(&metrics);

        let changed = self
            .shadow
            .write()
            .map(|mut guard| {
                let changed = *guard != next;
                *guard = next;
                changed
            })
            .unwrap_or(false);

        if changed {
            log::trace!("[pinning] shadow {:?}", next);
            self.shadow_observers.notify(&next);
        }
    }

    /// Whether a resize of `id` can move a pinned column.
    fn observes(&self, id: &str) -> bool {
        self.doc.contains(&self.table_el, id)
    }
}

/// Pinned-column offset engine for one table.
pub struct PinnedColumns {
    inner: Arc<PinnedInner>,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl PinnedColumns {
    /// Bind to the table's markup inside `doc`. Call [`attach`](Self::attach)
    /// to start reacting to changes.
    pub fn new(doc: Document, table: TableState, markup: &TableMarkup) -> Self {
        Self {
            inner: Arc::new(PinnedInner {
                doc,
                table,
                table_el: markup.table_id.clone(),
                viewport_el: markup.viewport_id.clone(),
                offsets: RwLock::new(PinOffsets::new()),
                shadow: RwLock::new(ScrollShadow::default()),
                shadow_observers: Observers::new(),
            }),
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    /// Recompute every pinned column's offset from the current tree.
    ///
    /// No-op while the document is unmounted or the table element is absent.
    pub fn recompute_offsets(&self) {
        self.inner.recompute_offsets();
    }

    /// Recompute the scroll-shadow flags from the viewport's scroll position.
    pub fn recompute_shadow(&self) {
        self.inner.recompute_shadow();
    }

    /// Offsets from the most recent recompute.
    pub fn offsets(&self) -> PinOffsets {
        self.inner
            .offsets
            .read()
            .map(|g| g.clone())
            .unwrap_or_default()
    }

    pub fn offset(&self, column: &ColumnId) -> Option<ColumnOffset> {
        self.inner
            .offsets
            .read()
            .ok()
            .and_then(|g| g.get(column).copied())
    }

    pub fn shadow(&self) -> ScrollShadow {
        self.inner.shadow.read().map(|g| *g).unwrap_or_default()
    }

    /// True while scrolled away from the leading edge.
    pub fn is_scrolled(&self) -> bool {
        self.shadow().is_scrolled
    }

    /// True while more content lies past the trailing edge.
    pub fn has_right_scroll(&self) -> bool {
        self.shadow().has_right_scroll
    }

    /// Subscribe to scroll-shadow changes.
    #[must_use = "dropping the subscription removes the callback"]
    pub fn on_shadow_change(
        &self,
        callback: impl Fn(&ScrollShadow) + Send + Sync + 'static,
    ) -> Subscription {
        self.inner.shadow_observers.subscribe(callback)
    }

    /// Start observing the table model and the document.
    ///
    /// Any previous observation is torn down first, so calling this again
    /// never registers duplicate observers. Recomputes once immediately.
    pub fn attach(&self) {
        self.detach();

        let mut subscriptions = Vec::with_capacity(2);

        let inner = Arc::clone(&self.inner);
        subscriptions.push(self.inner.table.on_change(move |event| match event {
            TableEvent::PinningChanged
            | TableEvent::VisibilityChanged
            | TableEvent::RowCountChanged(_)
            | TableEvent::PageChanged(_) => inner.recompute_offsets(),
            TableEvent::SelectionChanged => {}
        }));

        let inner = Arc::clone(&self.inner);
        subscriptions.push(self.inner.doc.on_mutation(move |mutation| match mutation {
            Mutation::Resized { id, .. } if inner.observes(id) => inner.recompute_offsets(),
            Mutation::Scrolled { id, .. } if *id == inner.viewport_el => inner.recompute_shadow(),
            Mutation::Mounted { .. } => {
                inner.recompute_offsets();
                inner.recompute_shadow();
            }
            _ => {}
        }));

        if let Ok(mut guard) = self.subscriptions.lock() {
            *guard = subscriptions;
        }

        log::debug!("[pinning] attached to table {}", self.inner.table_el);
        self.inner.recompute_offsets();
        self.inner.recompute_shadow();
    }

    /// Stop observing. Offsets already written stay in place.
    pub fn detach(&self) {
        let previous = self
            .subscriptions
            .lock()
            .map(|mut g| std::mem::take(&mut *g))
            .unwrap_or_default();
        if !previous.is_empty() {
            log::debug!("[pinning] detached from table {}", self.inner.table_el);
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

impl std::fmt::Debug for PinnedColumns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinnedColumns")
            .field("table", &self.inner.table_el)
            .field("attached", &self.is_attached())
            .finish()
    }
}
