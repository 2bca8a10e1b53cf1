//! Storage primitives for the service layer.
//!
//! Tables here are plain synchronous maps; locking lives one level up in
//! [`crate::catalog::memory::MemoryCatalog`].

pub mod record_table;
