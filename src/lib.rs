//! # Catalog Cache
//!
//! A client-side, incrementally-loaded cache of a remote product catalog
//! with continuously-updated derived views.
//!
//! ## Core Concepts
//!
//! - **Catalog**: the accumulated in-memory sequence of fetched items,
//!   append-only between resets
//! - **Observers**: multicast notifications of every catalog change, with
//!   the current value replayed on subscribe
//! - **Derived views**: the authoritative remote item count and the most
//!   expensive cached item, recomputed reactively on each change
//! - **Mutations**: remote create/delete that never touch the cache; callers
//!   refresh explicitly
//!
//! ## Example
//!
//! ```ignore
//! use catalog_cache::{CatalogService, InMemoryEndpoint, ItemDraft};
//! use std::sync::Arc;
//!
//! let endpoint = Arc::new(InMemoryEndpoint::new());
//! let service = CatalogService::new(endpoint.clone());
//!
//! // Load the first page and watch the catalog grow.
//! let observer = service.observe_catalog();
//! service.load_more()?;
//!
//! // Derived views follow every change.
//! let total = service.total_count()?;
//! let priciest = service.latest_most_expensive();
//!
//! // Writes go straight to the endpoint; refresh the cache explicitly.
//! service.create_item(&ItemDraft::new("Gravel Bike", 1249.5))?;
//! service.reset()?;
//! ```

pub mod error;
pub mod fetch;
pub mod gateway;
pub mod observe;
pub mod remote;
pub mod service;
pub mod store;
pub mod types;
pub mod views;

// Re-exports
pub use error::{CatalogError, Result};
pub use fetch::PageFetcher;
pub use gateway::MutationGateway;
pub use observe::{CachedSubject, Observer, ObserverId, SharedFetch, DEFAULT_OBSERVER_BUFFER};
pub use remote::{EndpointCalls, InMemoryEndpoint, RemoteCatalog};
pub use service::{CatalogConfig, CatalogService};
pub use store::CatalogStore;
pub use types::*;
pub use views::ViewEngine;
