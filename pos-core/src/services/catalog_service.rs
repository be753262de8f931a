//! Catalog Service - read-only menu lookup with in-memory caching
//!
//! Menu management lives outside the session core. It pushes items in via
//! [`CatalogService::replace_all`] / [`CatalogService::upsert`]; the ledger
//! only reads through [`CatalogLookup`].

use parking_lot::RwLock;
use shared::models::CatalogItem;
use shared::types::MenuItemId;
use std::collections::HashMap;
use std::sync::Arc;

/// Read-only catalog access used by the order ledger
pub trait CatalogLookup: Send + Sync {
    fn get_catalog_item(&self, id: &str) -> Option<CatalogItem>;
}

/// In-memory catalog cache
#[derive(Clone, Default)]
pub struct CatalogService {
    /// Items cache: menu item id -> CatalogItem
    items: Arc<RwLock<HashMap<MenuItemId, CatalogItem>>>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let items_count = self.items.read().len();
        f.debug_struct("CatalogService")
            .field("items_count", &items_count)
            .finish()
    }
}

impl CatalogService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a service pre-loaded with `items`
    pub fn with_items(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        let service = Self::new();
        service.replace_all(items);
        service
    }

    /// Replace the whole cache (menu sync)
    pub fn replace_all(&self, items: impl IntoIterator<Item = CatalogItem>) {
        let map: HashMap<_, _> = items.into_iter().map(|i| (i.id.clone(), i)).collect();
        let count = map.len();
        *self.items.write() = map;
        tracing::info!(count, "Catalog cache loaded");
    }

    /// Insert or update one item
    pub fn upsert(&self, item: CatalogItem) {
        tracing::debug!(menu_item_id = %item.id, "Catalog item upserted");
        self.items.write().insert(item.id.clone(), item);
    }

    pub fn remove(&self, id: &str) -> Option<CatalogItem> {
        self.items.write().remove(id)
    }

    /// List all items (from cache), sorted by name
    pub fn list_items(&self) -> Vec<CatalogItem> {
        let cache = self.items.read();
        let mut items: Vec<_> = cache.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl CatalogLookup for CatalogService {
    fn get_catalog_item(&self, id: &str) -> Option<CatalogItem> {
        self.items.read().get(id).cloned()
    }
}
