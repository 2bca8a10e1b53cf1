//! Shared helpers for the catalog admin binaries and crates.

pub mod utils;
