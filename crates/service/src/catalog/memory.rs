use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use super::seed::Seed;
use super::CatalogRepository;
use crate::errors::ServiceError;
use crate::record::{Collection, Record};
use crate::storage::record_table::RecordTable;

struct Tables {
    categories: RecordTable,
    items: RecordTable,
}

impl Tables {
    fn empty() -> Self {
        Self {
            categories: RecordTable::new(Collection::Categories),
            items: RecordTable::new(Collection::Items),
        }
    }

    fn table(&self, collection: Collection) -> &RecordTable {
        match collection {
            Collection::Categories => &self.categories,
            Collection::Items => &self.items,
        }
    }

    fn table_mut(&mut self, collection: Collection) -> &mut RecordTable {
        match collection {
            Collection::Categories => &mut self.categories,
            Collection::Items => &mut self.items,
        }
    }
}

/// Process-local catalog. Both tables share one lock, so each operation
/// (including a reset of both tables) is applied atomically and writers are
/// serialized. Concurrent updates of one record are last-write-wins.
#[derive(Clone)]
pub struct MemoryCatalog {
    inner: Arc<RwLock<Tables>>,
    seed: Arc<Seed>,
}

impl MemoryCatalog {
    /// Start with empty tables; `seed` is what [`CatalogRepository::reset`] installs.
    pub fn new(seed: Seed) -> Arc<Self> {
        Arc::new(Self { inner: Arc::new(RwLock::new(Tables::empty())), seed: Arc::new(seed) })
    }

    /// Start with the seed already installed.
    pub fn seeded(seed: Seed) -> Arc<Self> {
        let mut tables = Tables::empty();
        for collection in Collection::ALL {
            tables.table_mut(collection).replace(seed.rows(collection).clone());
        }
        Arc::new(Self { inner: Arc::new(RwLock::new(tables)), seed: Arc::new(seed) })
    }

    #[cfg(test)]
    async fn count(&self, collection: Collection) -> usize {
        self.inner.read().await.table(collection).len()
    }
}

#[async_trait]
impl CatalogRepository for MemoryCatalog {
    async fn list(&self, collection: Collection) -> Vec<Record> {
        self.inner.read().await.table(collection).list()
    }

    async fn create(&self, collection: Collection, record: Record) -> Result<Record, ServiceError> {
        let mut tables = self.inner.write().await;
        let created = tables.table_mut(collection).create(record)?;
        info!(collection = collection.as_str(), key = ?collection.key_of(&created), "record created");
        Ok(created)
    }

    async fn update(&self, collection: Collection, key: &str, patch: Record) -> Result<Record, ServiceError> {
        let mut tables = self.inner.write().await;
        let merged = tables.table_mut(collection).update(key, patch)?;
        info!(collection = collection.as_str(), key, "record updated");
        Ok(merged)
    }

    async fn delete(&self, collection: Collection, key: &str) -> Result<(), ServiceError> {
        let mut tables = self.inner.write().await;
        tables.table_mut(collection).delete(key)?;
        info!(collection = collection.as_str(), key, "record deleted");
        Ok(())
    }

    async fn reset(&self) {
        let mut tables = self.inner.write().await;
        for collection in Collection::ALL {
            tables.table_mut(collection).replace(self.seed.rows(collection).clone());
        }
        info!(
            categories = tables.categories.len(),
            items = tables.items.len(),
            "catalog reset"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configs::SeedConfig;
    use serde_json::{json, Value};

    fn rec(v: Value) -> Record {
        v.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn crud_through_repository_trait() -> Result<(), anyhow::Error> {
        let catalog: Arc<dyn CatalogRepository> = MemoryCatalog::new(Seed::empty());

        let created = catalog.create(Collection::Items, rec(json!({"item_id": 10, "name": "tea"}))).await?;
        assert_eq!(catalog.list(Collection::Items).await, vec![created]);
        assert!(catalog.list(Collection::Categories).await.is_empty());

        let merged = catalog.update(Collection::Items, "10", rec(json!({"price": 3}))).await?;
        assert_eq!(Value::Object(merged), json!({"item_id": 10, "name": "tea", "price": 3}));

        catalog.delete(Collection::Items, "10").await?;
        assert_eq!(
            catalog.delete(Collection::Items, "10").await,
            Err(ServiceError::NotFound("Item not found".into()))
        );
        Ok(())
    }

    #[tokio::test]
    async fn tables_are_independent() -> Result<(), anyhow::Error> {
        let catalog = MemoryCatalog::new(Seed::empty());
        catalog.create(Collection::Categories, rec(json!({"category_name": "x"}))).await?;
        catalog.create(Collection::Items, rec(json!({"item_id": "x"}))).await?;
        catalog.delete(Collection::Categories, "x").await?;
        assert_eq!(catalog.count(Collection::Categories).await, 0);
        assert_eq!(catalog.count(Collection::Items).await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn reset_without_seed_clears_everything() -> Result<(), anyhow::Error> {
        let catalog = MemoryCatalog::new(Seed::empty());
        catalog.create(Collection::Categories, rec(json!({"category_name": "drinks"}))).await?;
        catalog.create(Collection::Items, rec(json!({"item_id": 1}))).await?;
        catalog.reset().await;
        assert_eq!(catalog.count(Collection::Categories).await, 0);
        assert_eq!(catalog.count(Collection::Items).await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn reset_restores_seed_and_discards_changes() -> Result<(), anyhow::Error> {
        let cfg = SeedConfig {
            categories: vec![rec(json!({"category_name": "drinks", "visible": true}))],
            items: vec![rec(json!({"item_id": 1, "category_name": "drinks"}))],
            load_on_startup: false,
        };
        let catalog = MemoryCatalog::new(Seed::from_config(&cfg)?);
        assert_eq!(catalog.count(Collection::Categories).await, 0);

        catalog.reset().await;
        catalog.update(Collection::Categories, "drinks", rec(json!({"visible": false}))).await?;
        catalog.create(Collection::Items, rec(json!({"item_id": 2}))).await?;

        catalog.reset().await;
        let categories = catalog.list(Collection::Categories).await;
        assert_eq!(categories, vec![rec(json!({"category_name": "drinks", "visible": true}))]);
        assert_eq!(catalog.count(Collection::Items).await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn seeded_starts_with_seed_rows() -> Result<(), anyhow::Error> {
        let cfg = SeedConfig {
            categories: vec![rec(json!({"category_name": "food"}))],
            items: vec![],
            load_on_startup: true,
        };
        let catalog = MemoryCatalog::seeded(Seed::from_config(&cfg)?);
        assert_eq!(catalog.count(Collection::Categories).await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_creates_of_same_key_admit_exactly_one() {
        let catalog = MemoryCatalog::new(Seed::empty());
        let mut handles = Vec::new();
        for n in 0..16 {
            let c = Arc::clone(&catalog);
            handles.push(tokio::spawn(async move {
                c.create(Collection::Categories, rec(json!({"category_name": "dup", "n": n}))).await.is_ok()
            }));
        }
        let mut ok = 0;
        for h in handles {
            if h.await.unwrap() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(catalog.count(Collection::Categories).await, 1);
    }
}
