//! Error handling and edge case tests.

use catalog_cache::{
    CatalogError, CatalogService, InMemoryEndpoint, Item, ItemId, RemoteCatalog, Timestamp,
};
use std::sync::Arc;

fn seeded_item(id: u64, price: f64) -> Item {
    Item {
        id: ItemId(id),
        name: format!("item-{}", id),
        price,
        modified_at: Timestamp(id as i64),
        extra: serde_json::Map::new(),
    }
}

fn service_over(items: Vec<Item>) -> (Arc<InMemoryEndpoint>, CatalogService) {
    let endpoint = Arc::new(InMemoryEndpoint::with_items(items));
    let service = CatalogService::new(Arc::clone(&endpoint) as Arc<dyn RemoteCatalog>);
    (endpoint, service)
}

// --- Fetch Failures ---

#[test]
fn test_failed_fetch_leaves_catalog_unchanged() {
    let (endpoint, service) = service_over((1..=5).map(|i| seeded_item(i, i as f64)).collect());

    service.load_next_page(0, 3).unwrap();
    let before = service.current();

    endpoint.fail_requests(CatalogError::Transport("connection reset".into()));
    let result = service.load_next_page(3, 3);

    assert!(matches!(result, Err(CatalogError::Transport(_))));
    assert_eq!(service.current(), before);
}

#[test]
fn test_failed_fetch_leaves_derived_views_at_last_good_value() {
    let (endpoint, service) = service_over(vec![seeded_item(1, 10.0), seeded_item(2, 50.0)]);

    service.load_next_page(0, 10).unwrap();
    let before = service.latest_most_expensive().unwrap();

    endpoint.fail_requests(CatalogError::Transport("connection reset".into()));
    assert!(service.load_next_page(10, 10).is_err());

    assert_eq!(service.latest_most_expensive().unwrap(), before);
}

#[test]
fn test_failure_does_not_emit_catalog_change() {
    let (endpoint, service) = service_over((1..=5).map(|i| seeded_item(i, i as f64)).collect());

    let observer = service.observe_catalog();
    assert_eq!(observer.recv().unwrap().len(), 0);

    endpoint.fail_requests(CatalogError::Transport("down".into()));
    assert!(service.load_next_page(0, 5).is_err());

    // No partial or garbage append reaches observers.
    assert!(observer.try_recv().is_err());
}

#[test]
fn test_recovery_after_transient_failure() {
    let (endpoint, service) = service_over((1..=5).map(|i| seeded_item(i, i as f64)).collect());

    endpoint.fail_requests(CatalogError::Transport("down".into()));
    assert!(service.load_next_page(0, 5).is_err());

    endpoint.restore();
    service.load_next_page(0, 5).unwrap();
    assert_eq!(service.current().len(), 5);
}

// --- Reset Failures ---

#[test]
fn test_reset_with_failing_refetch_stays_empty() {
    let (endpoint, service) = service_over((1..=5).map(|i| seeded_item(i, i as f64)).collect());

    service.load_next_page(0, 5).unwrap();
    let observer = service.observe_catalog();

    endpoint.fail_requests(CatalogError::Transport("down".into()));
    let result = service.reset();

    assert!(matches!(result, Err(CatalogError::Transport(_))));
    assert!(service.current().is_empty());

    // The empty publish still happened before the refetch failed.
    assert_eq!(observer.recv().unwrap().len(), 5);
    assert_eq!(observer.recv().unwrap().len(), 0);
    assert!(observer.try_recv().is_err());
}

// --- Count Failures ---

#[test]
fn test_count_failure_is_not_cached() {
    let (endpoint, service) = service_over((1..=5).map(|i| seeded_item(i, i as f64)).collect());

    endpoint.fail_requests(CatalogError::Transport("down".into()));
    assert!(service.total_count().is_err());

    endpoint.restore();
    assert_eq!(service.total_count().unwrap(), 5);

    // The failed attempt plus the successful retry.
    assert_eq!(endpoint.calls().counts, 2);
}

// --- Mutation Failures ---

#[test]
fn test_delete_unknown_item() {
    let (_, service) = service_over(Vec::new());

    let result = service.delete_item(ItemId(404));
    assert!(matches!(result, Err(CatalogError::NotFound(ItemId(404)))));
}

#[test]
fn test_failed_create_leaves_endpoint_and_cache_unchanged() {
    let (endpoint, service) = service_over(Vec::new());

    endpoint.fail_requests(CatalogError::Status {
        status: 503,
        message: "service unavailable".into(),
    });
    let result = service.create_item(&catalog_cache::ItemDraft::new("Helmet", 59.9));

    assert!(matches!(result, Err(CatalogError::Status { status: 503, .. })));
    assert!(endpoint.items().is_empty());
    assert!(service.current().is_empty());
}

// --- Invalid Requests ---

#[test]
fn test_zero_take_is_rejected_without_remote_call() {
    let (endpoint, service) = service_over((1..=5).map(|i| seeded_item(i, i as f64)).collect());

    let result = service.load_next_page(0, 0);
    assert!(matches!(result, Err(CatalogError::InvalidRequest(_))));
    assert_eq!(endpoint.calls().pages, 0);
}
