//! Static product catalog.

use std::collections::HashSet;
use thiserror::Error;
use validator::{Validate, ValidationErrors};
use crate::domain::aggregates::Product;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("product `{id}` is invalid: {source}")]
    Invalid { id: String, source: ValidationErrors },
    #[error("product id `{0}` appears more than once")]
    DuplicateId(String),
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::from_products(serde_json::from_str(json)?)
    }

    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        {
            let mut seen = HashSet::new();
            for product in &products {
                product
                    .validate()
                    .map_err(|source| CatalogError::Invalid { id: product.id.clone(), source })?;
                if !seen.insert(product.id.as_str()) {
                    return Err(CatalogError::DuplicateId(product.id.clone()));
                }
            }
        }
        Ok(Self { products })
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }
    pub fn len(&self) -> usize {
        self.products.len()
    }
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
