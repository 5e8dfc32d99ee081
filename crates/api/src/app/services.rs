use std::sync::RwLock;

use thiserror::Error;

use medcat_inventory::{Catalog, CatalogError};

use crate::config::ApiConfig;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("catalog lock poisoned")]
    Poisoned,
}

/// Shared state behind every handler.
///
/// Lookups take the read side of the lock; stock adjustments take the write side.
#[derive(Debug)]
pub struct AppServices {
    catalog: RwLock<Catalog>,
}

impl AppServices {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::embedded()?,
        };
        tracing::info!(
            items = catalog.len(),
            currency = %catalog.currency(),
            low_stock = catalog.low_stock().len(),
            "catalog ready"
        );
        Ok(Self::new(catalog))
    }

    pub fn read<T>(&self, f: impl FnOnce(&Catalog) -> T) -> Result<T, ServiceError> {
        let guard = self.catalog.read().map_err(|_| ServiceError::Poisoned)?;
        Ok(f(&guard))
    }

    pub fn write<T>(&self, f: impl FnOnce(&mut Catalog) -> T) -> Result<T, ServiceError> {
        let mut guard = self.catalog.write().map_err(|_| ServiceError::Poisoned)?;
        Ok(f(&mut guard))
    }
}
