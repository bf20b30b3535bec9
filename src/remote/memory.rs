//! In-process endpoint for tests and demos.

use parking_lot::{Mutex, RwLock};
use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::error::{CatalogError, Result};
use crate::types::{Item, ItemDraft, ItemId, PageOrdering, PageQuery, SortDirection, SortField, Timestamp};

use super::RemoteCatalog;

/// Per-operation call counts, for asserting how often the endpoint was hit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EndpointCalls {
    pub pages: u64,
    pub counts: u64,
    pub creates: u64,
    pub deletes: u64,
}

#[derive(Default)]
struct CallCounters {
    pages: AtomicU64,
    counts: AtomicU64,
    creates: AtomicU64,
    deletes: AtomicU64,
}

/// An in-memory [`RemoteCatalog`].
///
/// Holds its own item collection (the "remote" side), orders and windows
/// pages the way the real endpoint does, and can simulate latency or fail
/// every request with an injected error. Calls are counted, including ones
/// that fail.
pub struct InMemoryEndpoint {
    items: RwLock<Vec<Item>>,
    next_id: AtomicU64,
    latency: RwLock<Option<Duration>>,
    failure: Mutex<Option<CatalogError>>,
    calls: CallCounters,
}

impl InMemoryEndpoint {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Endpoint seeded with an existing collection.
    pub fn with_items(items: Vec<Item>) -> Self {
        let next_id = items.iter().map(|i| i.id.0).max().unwrap_or(0) + 1;
        Self {
            items: RwLock::new(items),
            next_id: AtomicU64::new(next_id),
            latency: RwLock::new(None),
            failure: Mutex::new(None),
            calls: CallCounters::default(),
        }
    }

    /// Sleep this long before serving each request.
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.write() = latency;
    }

    /// Fail every subsequent request with `error` until [`restore`](Self::restore).
    pub fn fail_requests(&self, error: CatalogError) {
        *self.failure.lock() = Some(error);
    }

    /// Stop failing requests.
    pub fn restore(&self) {
        *self.failure.lock() = None;
    }

    /// Snapshot of the per-operation call counts.
    pub fn calls(&self) -> EndpointCalls {
        EndpointCalls {
            pages: self.calls.pages.load(Ordering::SeqCst),
            counts: self.calls.counts.load(Ordering::SeqCst),
            creates: self.calls.creates.load(Ordering::SeqCst),
            deletes: self.calls.deletes.load(Ordering::SeqCst),
        }
    }

    /// Snapshot of the remote-side collection.
    pub fn items(&self) -> Vec<Item> {
        self.items.read().clone()
    }

    fn simulate(&self) -> Result<()> {
        let latency = *self.latency.read();
        if let Some(latency) = latency {
            std::thread::sleep(latency);
        }
        if let Some(error) = self.failure.lock().clone() {
            return Err(error);
        }
        Ok(())
    }
}

impl Default for InMemoryEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

fn compare(a: &Item, b: &Item, order: PageOrdering) -> CmpOrdering {
    let by_field = match order.field {
        SortField::ModifiedAt => a.modified_at.cmp(&b.modified_at),
        SortField::Price => a.price.total_cmp(&b.price),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Id => a.id.0.cmp(&b.id.0),
    };
    match order.direction {
        SortDirection::Ascending => by_field,
        SortDirection::Descending => by_field.reverse(),
    }
}

impl RemoteCatalog for InMemoryEndpoint {
    fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Item>> {
        self.calls.pages.fetch_add(1, Ordering::SeqCst);
        self.simulate()?;

        let mut items = self.items.read().clone();
        items.sort_by(|a, b| compare(a, b, query.order));
        Ok(items
            .into_iter()
            .skip(query.skip as usize)
            .take(query.take as usize)
            .collect())
    }

    fn count(&self) -> Result<u64> {
        self.calls.counts.fetch_add(1, Ordering::SeqCst);
        self.simulate()?;
        Ok(self.items.read().len() as u64)
    }

    fn create(&self, draft: &ItemDraft) -> Result<Item> {
        self.calls.creates.fetch_add(1, Ordering::SeqCst);
        self.simulate()?;

        let item = Item {
            id: ItemId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            name: draft.name.clone(),
            price: draft.price,
            modified_at: Timestamp::now(),
            extra: draft.extra.clone(),
        };
        self.items.write().push(item.clone());
        Ok(item)
    }

    fn delete(&self, id: ItemId) -> Result<()> {
        self.calls.deletes.fetch_add(1, Ordering::SeqCst);
        self.simulate()?;

        let mut items = self.items.write();
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Err(CatalogError::NotFound(id));
        }
        Ok(())
    }
}
