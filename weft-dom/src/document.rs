//! Shared handle over the host element tree.
//!
//! `Document` stands in for the live page: components read rendered
//! geometry from it, write attributes and inline styles back, and listen
//! for resize/scroll mutations and input events. Every notification is sent
//! after the tree lock is released, so listeners may read or update the
//! document from inside their callback.

use std::sync::{Arc, RwLock};

use crate::element::{self, Element};
use crate::event::{DomEvent, KeyEvent};
use crate::observe::{Observers, Subscription};
use crate::scroll::ScrollMetrics;

/// Vertical alignment requested by `scroll_into_view`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBlock {
    Start,
    Center,
    End,
    #[default]
    Nearest,
}

/// Animation requested by `scroll_into_view`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

/// Observable changes to the element tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// An element's rendered width changed.
    Resized { id: String, width: f32 },
    /// An element's horizontal scroll position or extent changed.
    Scrolled { id: String, metrics: ScrollMetrics },
    /// A new tree was mounted; `root` is its root element ID.
    Mounted { root: String },
    /// A component asked the host to bring an element into view.
    ScrollIntoView {
        id: String,
        block: ScrollBlock,
        behavior: ScrollBehavior,
    },
}

#[derive(Debug, Default)]
struct DocumentInner {
    root: Option<Element>,
    focused: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    inner: Arc<RwLock<DocumentInner>>,
    mutations: Observers<Mutation>,
    events: Observers<DomEvent>,
}

impl Document {
    /// Create an empty (unmounted) document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document with `root` already mounted.
    pub fn with_root(root: Element) -> Self {
        let doc = Self::new();
        doc.mount(root);
        doc
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Mount `root`, replacing any previous tree, and notify `Mounted`.
    /// Focus survives when the focused ID exists in the new tree.
    pub fn mount(&self, root: Element) {
        let root_id = root.id.clone();
        {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            log::debug!("[document] mount root={root_id}");
            let keep_focus = guard
                .focused
                .as_deref()
                .is_some_and(|id| element::find_element(&root, id).is_some());
            if !keep_focus {
                guard.focused = None;
            }
            guard.root = Some(root);
        }
        self.mutations.notify(&Mutation::Mounted { root: root_id });
    }

    /// Remove the tree. Returns the old root, if any.
    pub fn unmount(&self) -> Option<Element> {
        self.inner.write().ok().and_then(|mut guard| {
            guard.focused = None;
            guard.root.take()
        })
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.read().map(|g| g.root.is_some()).unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Tree access
    // -------------------------------------------------------------------------

    /// Run `f` against the root. `None` when nothing is mounted.
    pub fn read<R>(&self, f: impl FnOnce(&Element) -> R) -> Option<R> {
        let guard = self.inner.read().ok()?;
        guard.root.as_ref().map(f)
    }

    /// Run `f` against the mutable root. Does not notify observers.
    pub fn update<R>(&self, f: impl FnOnce(&mut Element) -> R) -> Option<R> {
        let mut guard = self.inner.write().ok()?;
        guard.root.as_mut().map(f)
    }

    /// Run `f` against the element with `id`, if mounted and present.
    pub fn read_element<R>(&self, id: &str, f: impl FnOnce(&Element) -> R) -> Option<R> {
        self.read(|root| element::find_element(root, id).map(f))
            .flatten()
    }

    /// Run `f` against the element with `id`, mutably.
    pub fn update_element<R>(&self, id: &str, f: impl FnOnce(&mut Element) -> R) -> Option<R> {
        self.update(|root| element::find_element_mut(root, id).map(f))
            .flatten()
    }

    pub fn exists(&self, id: &str) -> bool {
        self.read_element(id, |_| ()).is_some()
    }

    /// True if `descendant` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: &str, descendant: &str) -> bool {
        self.read(|root| element::contains(root, ancestor, descendant))
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Set an element's rendered width. Notifies `Resized` when it changed.
    pub fn resize(&self, id: &str, width: f32) -> bool {
        let changed = self
            .update_element(id, |el| {
                if el.width == width {
                    false
                } else {
                    el.width = width;
                    true
                }
            })
            .unwrap_or(false);

        if changed {
            self.mutations.notify(&Mutation::Resized {
                id: id.to_string(),
                width,
            });
        }
        changed
    }

    /// Scroll an element horizontally, clamped to its extent.
    /// Notifies `Scrolled` when the position changed.
    pub fn scroll_to(&self, id: &str, left: f32) -> bool {
        let result = self
            .update_element(id, |el| {
                let next = el.scroll.scrolled_to(left);
                if next == el.scroll {
                    None
                } else {
                    el.scroll = next;
                    Some(next)
                }
            })
            .flatten();

        match result {
            Some(metrics) => {
                self.mutations.notify(&Mutation::Scrolled {
                    id: id.to_string(),
                    metrics,
                });
                true
            }
            None => false,
        }
    }

    /// Replace scroll extent after a layout change, re-clamping the position.
    pub fn set_scroll_extent(&self, id: &str, scroll_width: f32, client_width: f32) -> bool {
        let result = self
            .update_element(id, |el| {
                let next = ScrollMetrics::new(el.scroll.scroll_left, scroll_width, client_width)
                    .scrolled_to(el.scroll.scroll_left);
                if next == el.scroll {
                    None
                } else {
                    el.scroll = next;
                    Some(next)
                }
            })
            .flatten();

        match result {
            Some(metrics) => {
                self.mutations.notify(&Mutation::Scrolled {
                    id: id.to_string(),
                    metrics,
                });
                true
            }
            None => false,
        }
    }

    /// Ask the host to bring `id` into view.
    pub fn scroll_into_view(&self, id: &str, block: ScrollBlock, behavior: ScrollBehavior) {
        if !self.exists(id) {
            return;
        }
        self.mutations.notify(&Mutation::ScrollIntoView {
            id: id.to_string(),
            block,
            behavior,
        });
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    pub fn focused(&self) -> Option<String> {
        self.inner.read().ok().and_then(|g| g.focused.clone())
    }

    /// Move focus to `id`, dispatching `FocusOut` then `FocusIn`.
    /// Returns true if focus changed.
    pub fn focus(&self, id: &str) -> bool {
        let previous = {
            let Ok(mut guard) = self.inner.write() else {
                return false;
            };
            let present = guard
                .root
                .as_ref()
                .is_some_and(|root| element::find_element(root, id).is_some());
            if !present || guard.focused.as_deref() == Some(id) {
                return false;
            }
            guard.focused.replace(id.to_string())
        };

        if let Some(old) = &previous {
            self.dispatch(DomEvent::FocusOut {
                target: old.clone(),
                related: Some(id.to_string()),
            });
        }
        self.dispatch(DomEvent::FocusIn {
            target: id.to_string(),
            related: previous,
        });
        true
    }

    /// Clear focus. Returns true if something was focused.
    pub fn blur(&self) -> bool {
        let previous = self.inner.write().ok().and_then(|mut g| g.focused.take());
        match previous {
            Some(old) => {
                self.dispatch(DomEvent::FocusOut {
                    target: old,
                    related: None,
                });
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Deliver an event to every listener.
    pub fn dispatch(&self, event: DomEvent) {
        self.events.notify(&event);
    }

    /// Dispatch a key press. Untargeted presses go to the focused element.
    pub fn key_down(&self, mut event: KeyEvent) {
        if event.target.is_none() {
            event.target = self.focused();
        }
        self.dispatch(DomEvent::KeyDown(event));
    }

    #[must_use = "dropping the subscription removes the listener"]
    pub fn on_event(&self, callback: impl Fn(&DomEvent) + Send + Sync + 'static) -> Subscription {
        self.events.subscribe(callback)
    }

    #[must_use = "dropping the subscription removes the observer"]
    pub fn on_mutation(
        &self,
        callback: impl Fn(&Mutation) + Send + Sync + 'static,
    ) -> Subscription {
        self.mutations.subscribe(callback)
    }

    /// Number of live event listeners (mostly useful in tests).
    pub fn listener_count(&self) -> usize {
        self.events.len()
    }

    /// Number of live mutation observers.
    pub fn observer_count(&self) -> usize {
        self.mutations.len()
    }
}
