//! Catalog
//!
//! Loads product snapshots and scripted sessions from YAML. Stands in for
//! the remote listing service when replaying a session locally.

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::products::{Product, ProductId};

pub mod products;
pub mod sessions;

pub use sessions::{SessionFixture, SessionStep};

/// Catalog Parsing Errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A session step is missing a field
    #[error("Session step {step} is missing `{field}`")]
    MissingField {
        /// One-based step number
        step: usize,
        /// Name of the missing field
        field: &'static str,
    },
}

/// Products available to a session, keyed by id.
#[derive(Debug, Default)]
pub struct Catalog {
    products: FxHashMap<ProductId, Product>,
    currency: Option<&'static Currency>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if its
    /// products disagree on currency.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path.as_ref())?;

        let catalog = Self::from_yaml(&contents)?;

        debug!(
            path = %path.as_ref().display(),
            products = catalog.len(),
            "catalog loaded"
        );

        Ok(catalog)
    }

    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a price is invalid, or
    /// products disagree on currency.
    pub fn from_yaml(contents: &str) -> Result<Self, CatalogError> {
        let fixture: products::ProductsFixture = serde_norway::from_str(contents)?;

        let mut catalog = Self::new();

        for (key, product_fixture) in fixture.products {
            let (product, currency) = product_fixture.into_product(ProductId::from(key))?;

            catalog.insert(product, currency)?;
        }

        Ok(catalog)
    }

    /// Add a product priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CurrencyMismatch`] if `currency` differs from
    /// the currency of products already in the catalog.
    pub fn insert(
        &mut self,
        product: Product,
        currency: &'static Currency,
    ) -> Result<(), CatalogError> {
        match self.currency {
            Some(existing) if existing != currency => {
                return Err(CatalogError::CurrencyMismatch(
                    existing.iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }
            Some(_) => {}
            None => self.currency = Some(currency),
        }

        self.products.insert(product.id.clone(), product);

        Ok(())
    }

    /// Look up a product.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    /// Look up a product that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if there is no such product.
    pub fn product(&self, id: &ProductId) -> Result<&Product, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))
    }

    /// The single currency every product is priced in.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoCurrency`] if the catalog is empty.
    pub fn currency(&self) -> Result<&'static Currency, CatalogError> {
        self.currency.ok_or(CatalogError::NoCurrency)
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Load a session script from a YAML file and resolve it against this catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a step
    /// cannot be resolved.
    pub fn load_session(&self, path: impl AsRef<Path>) -> Result<Vec<SessionStep>, CatalogError> {
        let contents = fs::read_to_string(path)?;
        let session: SessionFixture = serde_norway::from_str(&contents)?;

        session.resolve(self)
    }
}
