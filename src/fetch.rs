//! Page fetcher: bounded reads with request coalescing.

use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::remote::RemoteCatalog;
use crate::types::{Item, PageQuery};

/// A fetch in progress, shared by every caller of the same query.
struct InFlight {
    result: Mutex<Option<Result<Vec<Item>>>>,
    ready: Condvar,
}

impl InFlight {
    fn new() -> Self {
        Self {
            result: Mutex::new(None),
            ready: Condvar::new(),
        }
    }

    fn resolve(&self, result: Result<Vec<Item>>) {
        *self.result.lock() = Some(result);
        self.ready.notify_all();
    }

    fn wait(&self) -> Result<Vec<Item>> {
        let mut slot = self.result.lock();
        loop {
            if let Some(result) = &*slot {
                return result.clone();
            }
            self.ready.wait(&mut slot);
        }
    }
}

/// Issues bounded reads against the remote collection.
///
/// Concurrent calls for the same query coalesce onto one remote request: the
/// first caller performs the fetch, the rest wait on it and receive the same
/// result, success or failure. A waiter giving up does not abort the shared
/// request. The fetcher never mutates the catalog; a failed fetch leaves the
/// cache exactly as it was.
pub struct PageFetcher {
    remote: Arc<dyn RemoteCatalog>,
    in_flight: Mutex<HashMap<PageQuery, Arc<InFlight>>>,
}

impl PageFetcher {
    pub fn new(remote: Arc<dyn RemoteCatalog>) -> Self {
        Self {
            remote,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch one page.
    ///
    /// `take` must be at least 1; a zero-sized request is rejected before
    /// any remote call.
    pub fn fetch(&self, query: &PageQuery) -> Result<Vec<Item>> {
        if query.take == 0 {
            return Err(CatalogError::InvalidRequest(
                "take must be at least 1".into(),
            ));
        }

        let (cell, leader) = {
            let mut in_flight = self.in_flight.lock();
            match in_flight.get(query) {
                Some(cell) => (Arc::clone(cell), false),
                None => {
                    let cell = Arc::new(InFlight::new());
                    in_flight.insert(query.clone(), Arc::clone(&cell));
                    (cell, true)
                }
            }
        };

        if leader {
            debug!(skip = query.skip, take = query.take, "fetching page");
            let result = self.remote.fetch_page(query);
            cell.resolve(result.clone());
            self.in_flight.lock().remove(query);
            result
        } else {
            debug!(skip = query.skip, take = query.take, "joining in-flight fetch");
            cell.wait()
        }
    }
}
