//! Mutation gateway: remote writes, decoupled from the cache.

use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::remote::RemoteCatalog;
use crate::types::{Item, ItemDraft, ItemId};

/// Performs create/delete against the remote collection.
///
/// The gateway never touches the catalog store. Callers that need the cache
/// to reflect a mutation refresh it explicitly afterwards, via a reset or a
/// targeted append.
pub struct MutationGateway {
    remote: Arc<dyn RemoteCatalog>,
}

impl MutationGateway {
    pub fn new(remote: Arc<dyn RemoteCatalog>) -> Self {
        Self { remote }
    }

    /// Create an item. Resolves once the remote write is acknowledged.
    pub fn create(&self, draft: &ItemDraft) -> Result<Item> {
        debug!(name = %draft.name, "creating item");
        let item = self.remote.create(draft)?;
        debug!(id = %item.id, "item created");
        Ok(item)
    }

    /// Delete an item by id.
    pub fn delete(&self, id: ItemId) -> Result<()> {
        debug!(id = %id, "deleting item");
        self.remote.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::remote::InMemoryEndpoint;
    use crate::store::CatalogStore;

    #[test]
    fn test_create_resolves_with_assigned_id() {
        let endpoint = Arc::new(InMemoryEndpoint::new());
        let gateway = MutationGateway::new(Arc::clone(&endpoint) as Arc<dyn RemoteCatalog>);

        let item = gateway.create(&ItemDraft::new("Saddle", 89.0)).unwrap();
        assert_eq!(item.id, ItemId(1));
        assert_eq!(endpoint.items().len(), 1);
    }

    #[test]
    fn test_mutations_do_not_touch_the_store() {
        let endpoint = Arc::new(InMemoryEndpoint::new());
        let gateway = MutationGateway::new(Arc::clone(&endpoint) as Arc<dyn RemoteCatalog>);
        let store = CatalogStore::new();

        let created = gateway.create(&ItemDraft::new("Saddle", 89.0)).unwrap();
        assert!(store.current().is_empty());

        gateway.delete(created.id).unwrap();
        assert!(store.current().is_empty());
    }

    #[test]
    fn test_delete_unknown_id_fails() {
        let endpoint = Arc::new(InMemoryEndpoint::new());
        let gateway = MutationGateway::new(endpoint as Arc<dyn RemoteCatalog>);

        let result = gateway.delete(ItemId(42));
        assert!(matches!(result, Err(CatalogError::NotFound(ItemId(42)))));
    }
}
