//! The remote collection endpoint boundary.
//!
//! The endpoint itself is an external collaborator; this module specifies it
//! as a trait and the cache consumes it through an explicitly injected
//! handle. A transport implementation maps the trait onto the HTTP surface:
//!
//! - `fetch_page` → `GET /items{query}` where `query` comes from
//!   [`PageQuery::query_string`](crate::types::PageQuery::query_string)
//! - `count` → `GET /items/count`
//! - `create` → `POST /items`
//! - `delete` → `DELETE /items/{id}`
//!
//! [`InMemoryEndpoint`] is the in-process stand-in used by tests and demos,
//! with latency simulation, failure injection, and call counters.

mod memory;

pub use memory::{EndpointCalls, InMemoryEndpoint};

use crate::error::Result;
use crate::types::{Item, ItemDraft, ItemId, PageQuery};

/// A paginated, orderable remote collection.
///
/// All methods block until the remote acknowledges or fails. Errors map to
/// [`CatalogError`](crate::error::CatalogError): transport failures to
/// `Transport`, non-success statuses to `Status`, malformed bodies to
/// `Decode`.
pub trait RemoteCatalog: Send + Sync {
    /// One bounded, ordered read of the collection.
    fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Item>>;

    /// Authoritative item count of the full remote collection.
    fn count(&self) -> Result<u64>;

    /// Create an item; resolves once the remote write is acknowledged.
    fn create(&self, draft: &ItemDraft) -> Result<Item>;

    /// Delete an item by id.
    fn delete(&self, id: ItemId) -> Result<()>;
}
