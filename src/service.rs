//! The catalog service: owning facade tying all components together.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::gateway::MutationGateway;
use crate::observe::{Observer, ObserverId, DEFAULT_OBSERVER_BUFFER};
use crate::remote::RemoteCatalog;
use crate::store::CatalogStore;
use crate::types::{Catalog, CatalogStats, Item, ItemDraft, ItemId, PageOrdering, PageQuery};
use crate::views::ViewEngine;

/// Service configuration.
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    /// Items per page for `load_more` and `reset`.
    pub page_size: u64,

    /// Buffered notifications per observer before it is dropped.
    pub observer_buffer: usize,

    /// Ordering requested from the endpoint for every page load.
    pub ordering: PageOrdering,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            observer_buffer: DEFAULT_OBSERVER_BUFFER,
            ordering: PageOrdering::default(),
        }
    }
}

/// The owning facade over store, derived views, fetcher and gateway.
///
/// Constructed explicitly with the remote endpoint handle; there are no
/// ambient singletons. One instance per session; the cache dies with it.
///
/// Every committed catalog change (append or clear) recomputes the derived
/// views under a single commit lock, so observers of the catalog and of the
/// derived views agree on change order.
pub struct CatalogService {
    config: CatalogConfig,
    store: CatalogStore,
    views: ViewEngine,
    fetcher: PageFetcher,
    gateway: MutationGateway,
    commit_lock: Mutex<()>,
    pages_loaded: AtomicU64,
    resets: AtomicU64,
}

impl CatalogService {
    pub fn new(remote: Arc<dyn RemoteCatalog>) -> Self {
        Self::with_config(remote, CatalogConfig::default())
    }

    pub fn with_config(remote: Arc<dyn RemoteCatalog>, config: CatalogConfig) -> Self {
        Self {
            store: CatalogStore::with_buffer(config.observer_buffer),
            views: ViewEngine::with_buffer(Arc::clone(&remote), config.observer_buffer),
            fetcher: PageFetcher::new(Arc::clone(&remote)),
            gateway: MutationGateway::new(remote),
            config,
            commit_lock: Mutex::new(()),
            pages_loaded: AtomicU64::new(0),
            resets: AtomicU64::new(0),
        }
    }

    // --- Catalog ---

    /// The current catalog snapshot.
    pub fn current(&self) -> Catalog {
        self.store.current()
    }

    /// Observe catalog snapshots: current value first, then every change.
    pub fn observe_catalog(&self) -> Observer<Catalog> {
        self.store.observe()
    }

    pub fn unobserve_catalog(&self, id: ObserverId) {
        self.store.unobserve(id);
    }

    // --- Derived Views ---

    /// Observe the most expensive cached item.
    pub fn observe_most_expensive(&self) -> Observer<Item> {
        self.views.observe_most_expensive()
    }

    pub fn unobserve_most_expensive(&self, id: ObserverId) {
        self.views.unobserve_most_expensive(id);
    }

    /// Latest most-expensive item, if the catalog is non-empty.
    pub fn latest_most_expensive(&self) -> Option<Item> {
        self.views.latest_most_expensive()
    }

    /// Authoritative remote item count (fetched once, then cached).
    pub fn total_count(&self) -> Result<u64> {
        self.views.total_count()
    }

    // --- Loading ---

    /// Fetch one page and append it to the catalog.
    ///
    /// On failure the catalog and the derived views are left exactly as they
    /// were.
    pub fn load_next_page(&self, skip: u64, take: u64) -> Result<Catalog> {
        let query = PageQuery {
            skip,
            take,
            order: self.config.ordering,
        };
        let page = self.fetcher.fetch(&query)?;
        Ok(self.commit(page))
    }

    /// Load the page after the cached items, using the configured page size.
    pub fn load_more(&self) -> Result<Catalog> {
        let skip = self.store.current().len() as u64;
        self.load_next_page(skip, self.config.page_size)
    }

    /// Clear the cache, then reload the first page.
    ///
    /// The empty catalog is published immediately and is observable until
    /// the new first page arrives; that transient state is expected. When
    /// the refetch fails the cache stays empty and the error is returned.
    pub fn reset(&self) -> Result<Catalog> {
        self.resets.fetch_add(1, Ordering::SeqCst);
        {
            let _guard = self.commit_lock.lock();
            let empty = self.store.clear();
            self.views.on_catalog_change(&empty);
        }
        debug!("catalog reset, reloading first page");
        self.load_next_page(0, self.config.page_size)
    }

    /// Append a fetched page and recompute the derived views atomically with
    /// respect to other commits.
    fn commit(&self, page: Vec<Item>) -> Catalog {
        let _guard = self.commit_lock.lock();
        let catalog = self.store.append(page);
        self.views.on_catalog_change(&catalog);
        self.pages_loaded.fetch_add(1, Ordering::SeqCst);
        catalog
    }

    // --- Mutations ---

    /// Create an item on the remote collection.
    ///
    /// The cache is not refreshed automatically; call [`reset`](Self::reset)
    /// (or a targeted `load_next_page`) when the catalog must reflect the
    /// write.
    pub fn create_item(&self, draft: &ItemDraft) -> Result<Item> {
        self.gateway.create(draft)
    }

    /// Delete an item on the remote collection. Same cache semantics as
    /// [`create_item`](Self::create_item).
    pub fn delete_item(&self, id: ItemId) -> Result<()> {
        self.gateway.delete(id)
    }

    // --- Introspection ---

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            items_cached: self.store.current().len(),
            pages_loaded: self.pages_loaded.load(Ordering::SeqCst),
            resets: self.resets.load(Ordering::SeqCst),
            catalog_observers: self.store.observer_count(),
            most_expensive_observers: self.views.most_expensive_observer_count(),
        }
    }
}
