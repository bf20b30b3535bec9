//! Core types for the catalog cache.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for an item. Assigned by the remote endpoint.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Microseconds since Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Current time.
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards");
        Timestamp(duration.as_micros() as i64)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

/// A single catalog item as returned by the remote endpoint.
///
/// Immutable once fetched; the cache never edits items in place. Fields the
/// core does not interpret ride along in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Remote-assigned identifier.
    pub id: ItemId,

    /// Display name.
    pub name: String,

    /// Unit price.
    pub price: f64,

    /// Last modification time on the remote side.
    pub modified_at: Timestamp,

    /// Opaque endpoint fields, passed through untouched.
    #[serde(flatten, default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Input for creating a new item (before id/modified_at are assigned).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub name: String,
    pub price: f64,
    #[serde(flatten, default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ItemDraft {
    /// Create a draft with the required fields.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            extra: serde_json::Map::new(),
        }
    }

    /// Attach an opaque field.
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Field the remote endpoint can order a page by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortField {
    ModifiedAt,
    Price,
    Name,
    Id,
}

impl SortField {
    /// Wire name used in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::ModifiedAt => "modifiedAt",
            SortField::Price => "price",
            SortField::Name => "name",
            SortField::Id => "id",
        }
    }
}

/// Sort direction for a page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Ordering requested from the remote endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PageOrdering {
    pub field: SortField,
    pub direction: SortDirection,
}

impl PageOrdering {
    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }
}

impl Default for PageOrdering {
    /// Most recently modified first, matching the endpoint's default listing.
    fn default() -> Self {
        PageOrdering::descending(SortField::ModifiedAt)
    }
}

/// One bounded read against the remote collection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PageQuery {
    /// Items to skip.
    pub skip: u64,
    /// Items to return. Must be at least 1.
    pub take: u64,
    /// Requested ordering.
    pub order: PageOrdering,
}

impl PageQuery {
    /// Query with the default ordering.
    pub fn new(skip: u64, take: u64) -> Self {
        Self {
            skip,
            take,
            order: PageOrdering::default(),
        }
    }

    /// Override the ordering.
    pub fn with_order(mut self, order: PageOrdering) -> Self {
        self.order = order;
        self
    }

    /// Render as an HTTP query string for transport implementations.
    pub fn query_string(&self) -> String {
        format!(
            "?skip={}&take={}&orderby={}%20{}",
            self.skip,
            self.take,
            self.order.field.as_str(),
            self.order.direction.as_str()
        )
    }
}

/// The accumulated in-memory catalog: every fetched page since the last
/// reset, in append order.
///
/// Snapshots are cheap to clone; observers each receive their own handle to
/// the same backing slice.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    items: Arc<[Item]>,
}

impl Catalog {
    /// The items in append order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// New snapshot with `page` concatenated after the current items.
    pub fn concat(&self, page: Vec<Item>) -> Catalog {
        if page.is_empty() {
            return self.clone();
        }
        let mut items = Vec::with_capacity(self.items.len() + page.len());
        items.extend_from_slice(&self.items);
        items.extend(page);
        Catalog {
            items: items.into(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            items: Vec::new().into(),
        }
    }
}

impl From<Vec<Item>> for Catalog {
    fn from(items: Vec<Item>) -> Self {
        Catalog {
            items: items.into(),
        }
    }
}

/// Cache statistics.
#[derive(Clone, Debug, Default)]
pub struct CatalogStats {
    /// Items currently cached.
    pub items_cached: usize,
    /// Pages successfully appended since construction.
    pub pages_loaded: u64,
    /// Resets performed.
    pub resets: u64,
    /// Live catalog observers.
    pub catalog_observers: usize,
    /// Live most-expensive-item observers.
    pub most_expensive_observers: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: u64, price: f64) -> Item {
        Item {
            id: ItemId(id),
            name: format!("item-{}", id),
            price,
            modified_at: Timestamp(id as i64),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_query_string_default_ordering() {
        let query = PageQuery::new(0, 10);
        assert_eq!(
            query.query_string(),
            "?skip=0&take=10&orderby=modifiedAt%20desc"
        );
    }

    #[test]
    fn test_query_string_custom_ordering() {
        let query = PageQuery::new(20, 5).with_order(PageOrdering::ascending(SortField::Price));
        assert_eq!(query.query_string(), "?skip=20&take=5&orderby=price%20asc");
    }

    #[test]
    fn test_catalog_concat_preserves_order() {
        let catalog = Catalog::default()
            .concat(vec![item(1, 10.0), item(2, 20.0)])
            .concat(vec![item(3, 30.0)]);

        let ids: Vec<u64> = catalog.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_catalog_concat_empty_page() {
        let catalog = Catalog::from(vec![item(1, 10.0)]);
        let next = catalog.concat(Vec::new());
        assert_eq!(next, catalog);
    }

    #[test]
    fn test_item_json_field_names() {
        let parsed: Item = serde_json::from_value(json!({
            "id": 7,
            "name": "Gravel Bike",
            "price": 1249.5,
            "modifiedAt": 1700000000000000i64,
            "category": "bikes"
        }))
        .unwrap();

        assert_eq!(parsed.id, ItemId(7));
        assert_eq!(parsed.modified_at, Timestamp(1700000000000000));
        assert_eq!(parsed.extra["category"], json!("bikes"));
    }

    #[test]
    fn test_draft_builder() {
        let draft = ItemDraft::new("Helmet", 59.9).with_field("color", json!("red"));
        assert_eq!(draft.name, "Helmet");
        assert_eq!(draft.extra["color"], json!("red"));

        let encoded = serde_json::to_value(&draft).unwrap();
        assert_eq!(encoded["color"], json!("red"));
    }
}
