//! Error types for the catalog cache.

use crate::types::ItemId;
use thiserror::Error;

/// Main error type for cache operations.
///
/// `Clone` so a failure from a coalesced remote call can be delivered to
/// every waiter that shared it.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("endpoint returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("item not found: {0}")]
    NotFound(ItemId),

    #[error("invalid page request: {0}")]
    InvalidRequest(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Decode(e.to_string())
    }
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
