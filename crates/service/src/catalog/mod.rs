//! Catalog repository: the two record tables behind one async interface.

pub mod memory;
pub mod seed;

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::record::{Collection, Record};

/// Trait abstraction for catalog storage.
/// Handlers only see this; the shipped implementation is [`memory::MemoryCatalog`].
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list(&self, collection: Collection) -> Vec<Record>;
    async fn create(&self, collection: Collection, record: Record) -> Result<Record, ServiceError>;
    async fn update(&self, collection: Collection, key: &str, patch: Record) -> Result<Record, ServiceError>;
    async fn delete(&self, collection: Collection, key: &str) -> Result<(), ServiceError>;
    /// Atomically replace both tables with the seed state.
    async fn reset(&self);
}
