//! Callback registries with detachable subscriptions.
//!
//! Anything that "watches" the host (resize observation, key listeners,
//! table model changes) goes through [`Observers`]. Registering returns a
//! [`Subscription`]; dropping it or calling [`Subscription::unsubscribe`]
//! removes the callback.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registry<T> {
    entries: Vec<(u64, Callback<T>)>,
}

/// A set of callbacks notified with a shared payload.
pub struct Observers<T> {
    registry: Arc<Mutex<Registry<T>>>,
    next_id: Arc<AtomicU64>,
}

impl<T> Clone for Observers<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                entries: Vec::new(),
            })),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl<T: 'static> std::fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.len())
            .finish()
    }
}

impl<T: 'static> Observers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. It stays registered while the returned
    /// subscription is alive.
    #[must_use = "dropping the subscription removes the callback"]
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut guard) = self.registry.lock() {
            guard.entries.push((id, Arc::new(callback)));
        }

        let weak: Weak<Mutex<Registry<T>>> = Arc::downgrade(&self.registry);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade()
                    && let Ok(mut guard) = registry.lock()
                {
                    guard.entries.retain(|(entry_id, _)| *entry_id != id);
                }
            })),
        }
    }

    /// Call every registered callback with `value`.
    ///
    /// The callback list is snapshotted first, so callbacks may subscribe or
    /// unsubscribe without deadlocking.
    pub fn notify(&self, value: &T) {
        let snapshot: Vec<Callback<T>> = match self.registry.lock() {
            Ok(guard) => guard.entries.iter().map(|(_, cb)| Arc::clone(cb)).collect(),
            Err(_) => return,
        };
        for callback in snapshot {
            callback(value);
        }
    }

    /// Number of live callbacks.
    pub fn len(&self) -> usize {
        self.registry.lock().map(|g| g.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle returned by [`Observers::subscribe`].
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Remove the callback now.
    pub fn unsubscribe(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.detach.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_notify_reaches_subscribers() {
        let observers = Observers::<u32>::new();
        let total = Arc::new(AtomicUsize::new(0));
        let t = Arc::clone(&total);
        let _sub = observers.subscribe(move |v| {
            t.fetch_add(*v as usize, Ordering::SeqCst);
        });

        observers.notify(&3);
        observers.notify(&4);
        assert_eq!(total.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let observers = Observers::<()>::new();
        let sub = observers.subscribe(|_| {});
        assert_eq!(observers.len(), 1);
        drop(sub);
        assert!(observers.is_empty());
    }

    #[test]
    fn test_unsubscribe_only_removes_own_callback() {
        let observers = Observers::<()>::new();
        let a = observers.subscribe(|_| {});
        let _b = observers.subscribe(|_| {});
        a.unsubscribe();
        assert_eq!(observers.len(), 1);
    }

    #[test]
    fn test_callback_may_subscribe_during_notify() {
        let observers = Observers::<()>::new();
        let inner = observers.clone();
        let held = Arc::new(Mutex::new(Vec::new()));
        let h = Arc::clone(&held);
        let _sub = observers.subscribe(move |_| {
            let sub = inner.subscribe(|_| {});
            h.lock().unwrap().push(sub);
        });

        observers.notify(&());
        assert_eq!(observers.len(), 2);
    }

    #[test]
    fn test_debug_reports_subscriber_count() {
        let observers = Observers::<u32>::new();
        let _sub = observers.subscribe(|_| {});
        assert_eq!(format!("{observers:?}"), "Observers { len: 1 }");
    }
}
