//! The catalog store: single owner of the accumulated item list.

use parking_lot::Mutex;
use tracing::debug;

use crate::observe::{CachedSubject, Observer, ObserverId, DEFAULT_OBSERVER_BUFFER};
use crate::types::{Catalog, Item};

/// Owns the accumulated catalog and publishes every change to observers.
///
/// The catalog has exactly one writer path: `append` and `clear`, serialized
/// by an internal write lock. Two sequential appends are therefore observed
/// in call order by every observer. Reads never block behind a write in
/// progress beyond the snapshot swap itself.
pub struct CatalogStore {
    subject: CachedSubject<Catalog>,
    write_lock: Mutex<()>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::with_buffer(DEFAULT_OBSERVER_BUFFER)
    }

    pub fn with_buffer(buffer_size: usize) -> Self {
        Self {
            subject: CachedSubject::with_initial(Catalog::default(), buffer_size),
            write_lock: Mutex::new(()),
        }
    }

    /// The latest accumulated catalog. Never blocks, never fails.
    pub fn current(&self) -> Catalog {
        // The subject is seeded at construction and never withdrawn.
        self.subject.latest().unwrap_or_default()
    }

    /// Observe the catalog: the current value is the first notification,
    /// followed by every subsequent change in order.
    pub fn observe(&self) -> Observer<Catalog> {
        self.subject.subscribe()
    }

    /// Release an observer registration.
    pub fn unobserve(&self, id: ObserverId) {
        self.subject.unsubscribe(id);
    }

    /// Concatenate `page` onto the catalog and publish the new snapshot.
    pub fn append(&self, page: Vec<Item>) -> Catalog {
        let _guard = self.write_lock.lock();
        let next = self.current().concat(page);
        debug!(items = next.len(), "catalog appended");
        self.subject.publish(next.clone());
        next
    }

    /// Publish an empty catalog.
    ///
    /// This is the store half of a reset; refetching the first page is the
    /// owning service's job since the store does not hold the fetcher.
    pub fn clear(&self) -> Catalog {
        let _guard = self.write_lock.lock();
        let empty = Catalog::default();
        debug!("catalog cleared");
        self.subject.publish(empty.clone());
        empty
    }

    /// Number of live observers.
    pub fn observer_count(&self) -> usize {
        self.subject.observer_count()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}
