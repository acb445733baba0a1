//! Products: the menu item projection authorization decisions are made about,
//! and the lookup seam the attribute extractor reads it through.
//!
//! Persistence is someone else's job; this crate only ships an in-memory
//! catalog for tests/dev.

pub mod catalog;
pub mod product;

pub use catalog::{InMemoryProductCatalog, ProductCatalog, StoreError};
pub use product::ProductRecord;
