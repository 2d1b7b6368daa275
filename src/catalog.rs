//! Catalog
//!
//! Products loaded from an API listing dump, as JSON or YAML.

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    pricing::PriceError,
    products::{Product, ProductId, ProductRecord},
};

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading catalog files
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unsupported file extension
    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    /// A product price could not be converted
    #[error("Invalid price for product {0}: {1}")]
    InvalidPrice(ProductId, PriceError),

    /// The same id appears twice
    #[error("Duplicate product: {0}")]
    DuplicateProduct(ProductId),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
}

/// Shape of a product listing response.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    /// Listed products
    pub products: Vec<ProductRecord>,
}

/// Products available to add to the cart, in listing order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from API records, pricing them in `currency`.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] for an unconvertible price or a repeated id.
    pub fn from_records(
        records: impl IntoIterator<Item = ProductRecord>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::default();

        for record in records {
            let id = record.id;

            if catalog.index.contains_key(&id) {
                return Err(CatalogError::DuplicateProduct(id));
            }

            let product = record
                .into_product(currency)
                .map_err(|error| CatalogError::InvalidPrice(id, error))?;

            catalog.index.insert(id, catalog.products.len());
            catalog.products.push(product);
        }

        Ok(catalog)
    }

    /// Parse a JSON listing.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the JSON or a record is invalid.
    pub fn from_json(raw: &str, currency: &'static Currency) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(raw)?;

        Self::from_records(file.products, currency)
    }

    /// Parse a YAML listing.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the YAML or a record is invalid.
    pub fn from_yaml(raw: &str, currency: &'static Currency) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_norway::from_str(raw)?;

        Self::from_records(file.products, currency)
    }

    /// Load a listing from disk, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or parsed.
    pub fn from_path(path: &Path, currency: &'static Currency) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let raw = fs::read_to_string(path)?;

        match extension.as_str() {
            "json" => Self::from_json(&raw, currency),
            "yml" | "yaml" => Self::from_yaml(&raw, currency),
            _ => Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Look up a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] for an unknown id.
    pub fn get(&self, id: ProductId) -> Result<&Product, CatalogError> {
        self.index
            .get(&id)
            .and_then(|&position| self.products.get(position))
            .ok_or(CatalogError::ProductNotFound(id))
    }

    /// Iterate over the products in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
