use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};
use validator::Validate;

use crate::models::product::Product;

#[derive(Error, Debug)]
pub enum CatalogSourceError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid product '{product_id}': {errors}")]
    Invalid {
        product_id: String,
        errors: validator::ValidationErrors,
    },

    #[error("Duplicate product id '{id}' in catalog")]
    DuplicateProduct { id: String },
}

/// Catalog source boundary. Supplies the read-only product definitions
/// the configurators work from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<Vec<Product>, CatalogSourceError>;
}

/// JSON-file implementation of [`CatalogSource`].
///
/// Expects `{ "products": [ ... ] }`; every product is validated and
/// product ids must be unique.
pub struct JsonCatalogSource {
    path: PathBuf,
}

impl JsonCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(serde::Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

#[async_trait]
impl CatalogSource for JsonCatalogSource {
    async fn load(&self) -> Result<Vec<Product>, CatalogSourceError> {
        debug!("Loading catalog from {}", self.path.display());

        let raw = tokio::fs::read_to_string(&self.path).await?;
        let file: CatalogFile = serde_json::from_str(&raw)?;

        let mut seen = HashSet::new();
        for product in &file.products {
            product
                .validate()
                .map_err(|errors| CatalogSourceError::Invalid {
                    product_id: product.id.clone(),
                    errors,
                })?;

            if !seen.insert(product.id.clone()) {
                return Err(CatalogSourceError::DuplicateProduct {
                    id: product.id.clone(),
                });
            }
        }

        info!(
            "Loaded {} products from {}",
            file.products.len(),
            self.path.display()
        );
        Ok(file.products)
    }
}
