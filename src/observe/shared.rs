//! Single-flight cached remote reads.

use parking_lot::Mutex;

use crate::error::Result;

/// A remote read resolved at most once and shared by every observer.
///
/// The lock is held across the upstream call, so concurrent observers
/// coalesce onto a single request and all receive the resolved value.
/// Failures are returned to the caller and not cached; the next observer
/// retries.
pub struct SharedFetch<T> {
    state: Mutex<Option<T>>,
}

impl<T: Clone> SharedFetch<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(None),
        }
    }

    /// Return the cached value, or resolve it with `fetch` and cache it.
    pub fn get_or_fetch<F>(&self, fetch: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let mut state = self.state.lock();
        if let Some(value) = &*state {
            return Ok(value.clone());
        }
        let value = fetch()?;
        *state = Some(value.clone());
        Ok(value)
    }

    /// The cached value, if already resolved. Never triggers a fetch.
    pub fn peek(&self) -> Option<T> {
        self.state.lock().clone()
    }
}

impl<T: Clone> Default for SharedFetch<T> {
    fn default() -> Self {
        Self::new()
    }
}
