use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use brewguard_core::{Entity, ProductId};

use crate::ProductRecord;

/// Infrastructure failure while reading or writing products.
///
/// Distinct from "not found": a missing product is `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("product store unavailable: {0}")]
    Unavailable(String),
}

/// Product lookup seam used by the attribute extractor.
pub trait ProductCatalog: Send + Sync {
    fn get(&self, id: &ProductId) -> Result<Option<ProductRecord>, StoreError>;
    fn upsert(&self, product: ProductRecord) -> Result<(), StoreError>;
}

impl<S> ProductCatalog for Arc<S>
where
    S: ProductCatalog + ?Sized,
{
    fn get(&self, id: &ProductId) -> Result<Option<ProductRecord>, StoreError> {
        (**self).get(id)
    }

    fn upsert(&self, product: ProductRecord) -> Result<(), StoreError> {
        (**self).upsert(product)
    }
}

/// In-memory catalog for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    inner: RwLock<HashMap<ProductId, ProductRecord>>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductCatalog for InMemoryProductCatalog {
    fn get(&self, id: &ProductId) -> Result<Option<ProductRecord>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("catalog lock poisoned".to_string()))?;
        Ok(map.get(id).cloned())
    }

    fn upsert(&self, product: ProductRecord) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Unavailable("catalog lock poisoned".to_string()))?;
        map.insert(*product.id(), product);
        Ok(())
    }
}
