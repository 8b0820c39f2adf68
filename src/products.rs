//! Products
//!
//! Read-only product snapshots handed to the cart by the catalog service.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque product identifier, as issued by the catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Units of a product the catalog reports as purchasable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stock {
    /// At most this many units may be held in a cart.
    Bounded(u32),

    /// No stock limit was reported.
    #[default]
    Unlimited,
}

impl Stock {
    /// Check whether a cart may hold `quantity` units.
    #[must_use]
    pub fn allows(self, quantity: u32) -> bool {
        match self {
            Stock::Bounded(available) => quantity <= available,
            Stock::Unlimited => true,
        }
    }

    /// The bounded quantity, if any.
    #[must_use]
    pub fn available(self) -> Option<u32> {
        match self {
            Stock::Bounded(available) => Some(available),
            Stock::Unlimited => None,
        }
    }
}

impl From<Option<u32>> for Stock {
    fn from(available: Option<u32>) -> Self {
        available.map_or(Stock::Unlimited, Stock::Bounded)
    }
}

/// Product snapshot.
///
/// Captured at a point in time. Later catalog changes to price or stock are
/// not reflected in snapshots already held by a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Unit price, in the cart's currency; never negative
    pub price: Decimal,

    /// Stock reported by the catalog
    pub available: Stock,

    /// Product category
    pub category: Option<String>,

    /// Product description
    pub description: Option<String>,
}

impl Product {
    /// Create a product with unlimited stock and no display extras.
    ///
    /// `price` must not be negative. Catalog loading rejects negative prices;
    /// other callers are trusted to do the same.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Decimal) -> Self {
        debug_assert!(!price.is_sign_negative(), "product price cannot be negative");

        Self {
            id: id.into(),
            name: name.into(),
            price,
            available: Stock::Unlimited,
            category: None,
            description: None,
        }
    }

    /// Replace the stock bound on this snapshot.
    #[must_use]
    pub fn with_stock(mut self, available: Stock) -> Self {
        self.available = available;
        self
    }

    /// Set the product category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
