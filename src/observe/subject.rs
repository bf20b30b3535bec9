//! Cached multicast subject.

use crossbeam_channel::bounded;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

use super::types::{Observer, ObserverId};

struct Inner<T> {
    /// Latest published value, replayed to new observers. `None` means the
    /// value is currently undefined and nothing is replayed.
    latest: Option<T>,
    observers: HashMap<ObserverId, crossbeam_channel::Sender<T>>,
}

/// Multicast subject that caches its latest value.
///
/// New observers receive the current value as their first notification (when
/// one is defined), then every subsequent publish, in publish order. All
/// observers share the single upstream publisher; subscribing never triggers
/// recomputation.
pub struct CachedSubject<T> {
    inner: RwLock<Inner<T>>,
    next_id: AtomicU64,
    buffer_size: usize,
}

impl<T: Clone> CachedSubject<T> {
    /// Create a subject with no current value.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                latest: None,
                observers: HashMap::new(),
            }),
            next_id: AtomicU64::new(1),
            buffer_size,
        }
    }

    /// Create a subject seeded with an initial value.
    pub fn with_initial(value: T, buffer_size: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                latest: Some(value),
                observers: HashMap::new(),
            }),
            next_id: AtomicU64::new(1),
            buffer_size,
        }
    }

    /// The latest published value, if defined.
    pub fn latest(&self) -> Option<T> {
        self.inner.read().latest.clone()
    }

    /// Register a new observer.
    ///
    /// Registration and publishing serialize on the same lock, so the new
    /// observer sees the current value exactly once: either as the replayed
    /// first notification or as a concurrent publish, never both.
    pub fn subscribe(&self) -> Observer<T> {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = bounded(self.buffer_size);

        let mut inner = self.inner.write();
        if let Some(value) = &inner.latest {
            // Fresh channel with capacity >= 1, cannot be full.
            let _ = sender.try_send(value.clone());
        }
        inner.observers.insert(id, sender);

        Observer { id, receiver }
    }

    /// Remove an observer. No values are delivered after this returns.
    pub fn unsubscribe(&self, id: ObserverId) {
        self.inner.write().observers.remove(&id);
    }

    /// Publish a new value: cache it and notify every observer.
    ///
    /// Observers whose buffer is full are dropped, as are observers whose
    /// receiving end is gone.
    pub fn publish(&self, value: T) {
        let mut inner = self.inner.write();
        inner.latest = Some(value.clone());

        let mut dropped = Vec::new();
        for (id, sender) in &inner.observers {
            if sender.try_send(value.clone()).is_err() {
                dropped.push(*id);
            }
        }
        for id in dropped {
            inner.observers.remove(&id);
            warn!(observer = id.0, "dropping unresponsive observer");
        }
    }

    /// Clear the cached value without emitting anything.
    ///
    /// Subsequent observers get no replay until the next publish. Used when
    /// the derived value becomes undefined (empty catalog).
    pub fn withdraw(&self) {
        self.inner.write().latest = None;
    }

    /// Number of live observers.
    pub fn observer_count(&self) -> usize {
        self.inner.read().observers.len()
    }
}
