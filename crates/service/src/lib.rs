//! Service layer for the catalog admin API.
//! - `record`: open-ended JSON records and identifier rules.
//! - `storage`: single-collection tables.
//! - `catalog`: repository trait, in-memory implementation, seed data.

pub mod errors;
pub mod record;
pub mod storage;
pub mod catalog;

pub use catalog::{memory::MemoryCatalog, seed::Seed, CatalogRepository};
pub use errors::ServiceError;
pub use record::{Collection, Record};
