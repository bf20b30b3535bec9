//! Derived views over the catalog.
//!
//! Both views recompute only in reaction to catalog changes, never by
//! polling:
//! - the total count comes from the endpoint's authoritative count resource
//!   (the cache may hold fewer items than exist remotely), fetched at most
//!   once and shared by every observer;
//! - the most expensive item is derived purely from the current catalog and
//!   withheld while the catalog is empty.

use std::sync::Arc;

use crate::error::Result;
use crate::observe::{CachedSubject, Observer, ObserverId, SharedFetch, DEFAULT_OBSERVER_BUFFER};
use crate::remote::RemoteCatalog;
use crate::types::{Catalog, Item};

/// Computes and multicasts the derived views.
pub struct ViewEngine {
    remote: Arc<dyn RemoteCatalog>,
    most_expensive: CachedSubject<Item>,
    total: SharedFetch<u64>,
}

impl ViewEngine {
    pub fn new(remote: Arc<dyn RemoteCatalog>) -> Self {
        Self::with_buffer(remote, DEFAULT_OBSERVER_BUFFER)
    }

    pub fn with_buffer(remote: Arc<dyn RemoteCatalog>, buffer_size: usize) -> Self {
        Self {
            remote,
            most_expensive: CachedSubject::new(buffer_size),
            total: SharedFetch::new(),
        }
    }

    /// Authoritative remote item count.
    ///
    /// Resolved on first call and cached; concurrent callers coalesce onto a
    /// single remote request. A failure is returned uncached, so the next
    /// caller retries.
    pub fn total_count(&self) -> Result<u64> {
        self.total.get_or_fetch(|| self.remote.count())
    }

    /// Observe the most expensive item.
    ///
    /// Replays the latest derived value when the catalog is non-empty;
    /// while it is empty the view is absent and nothing is delivered.
    pub fn observe_most_expensive(&self) -> Observer<Item> {
        self.most_expensive.subscribe()
    }

    /// Release a most-expensive observer registration.
    pub fn unobserve_most_expensive(&self, id: ObserverId) {
        self.most_expensive.unsubscribe(id);
    }

    /// Latest derived most-expensive item, if the catalog is non-empty.
    pub fn latest_most_expensive(&self) -> Option<Item> {
        self.most_expensive.latest()
    }

    /// Live most-expensive observers.
    pub fn most_expensive_observer_count(&self) -> usize {
        self.most_expensive.observer_count()
    }

    /// Recompute hook, invoked once per committed catalog change.
    ///
    /// Emits exactly one value per change when the catalog is non-empty.
    /// An empty catalog withholds emission and clears the cached value, so
    /// observers subscribing after a reset see nothing stale.
    pub fn on_catalog_change(&self, catalog: &Catalog) {
        match most_expensive_of(catalog) {
            Some(item) => self.most_expensive.publish(item),
            None => self.most_expensive.withdraw(),
        }
    }
}

/// Maximum-price item of a snapshot. Tie order among equal prices is
/// unspecified.
fn most_expensive_of(catalog: &Catalog) -> Option<Item> {
    catalog
        .iter()
        .max_by(|a, b| a.price.total_cmp(&b.price))
        .cloned()
}
