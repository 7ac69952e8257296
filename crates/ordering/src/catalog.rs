//! The fixed product catalog.
//!
//! A catalog is built once at startup and never changes for the life of an
//! engine. Construction validates the product list so the rest of the engine
//! can rely on unique IDs, positive prices, and a single currency.

use std::collections::HashSet;

use fishmarket_core::{CurrencyCode, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a [`Catalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog must contain at least one product")]
    Empty,
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
    #[error("product {0} must have a positive price")]
    NonPositivePrice(ProductId),
    #[error("product {id} is priced in {found}, expected {expected}")]
    MixedCurrency {
        id: ProductId,
        expected: CurrencyCode,
        found: CurrencyCode,
    },
    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique catalog identifier.
    pub id: ProductId,
    /// Display name (e.g. "Fresh Tilapia").
    pub name: String,
    /// Price per `unit`.
    pub unit_price: Price,
    /// Display unit (e.g. "per kg").
    pub unit: String,
}

impl Product {
    /// Create a new product.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Price,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            unit: unit.into(),
        }
    }
}

/// An immutable, ordered list of products.
///
/// Order matters: line items and listings follow catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a product list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the list is empty, an ID repeats, a price is
    /// zero or negative, or products are priced in different currencies.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let first = products.first().ok_or(CatalogError::Empty)?;
        let currency = first.unit_price.currency_code;

        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            if !product.unit_price.is_positive() {
                return Err(CatalogError::NonPositivePrice(product.id.clone()));
            }
            if product.unit_price.currency_code != currency {
                return Err(CatalogError::MixedCurrency {
                    id: product.id.clone(),
                    expected: currency,
                    found: product.unit_price.currency_code,
                });
            }
        }

        Ok(Self { products })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON, or any error
    /// [`Catalog::new`] would return for the decoded list.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// The storefront's standard fish catalog, priced in cedis.
    #[must_use]
    pub fn fish_market() -> Self {
        let ghs = |minor| Price::from_minor_units(minor, CurrencyCode::GHS);
        Self {
            products: vec![
                Product::new("1", "Fresh Tilapia", ghs(899), "per kg"),
                Product::new("2", "Smoked Tilapia", ghs(1049), "per kg"),
                Product::new("3", "Live Tilapia", ghs(999), "per kg"),
                Product::new("4", "Fresh Catfish", ghs(799), "per kg"),
                Product::new("5", "Smoked Catfish", ghs(949), "per kg"),
                Product::new("6", "Live Catfish", ghs(899), "per kg"),
            ],
        }
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    /// Returns `true` if the catalog has a product with this ID.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Always `false` for a constructed catalog; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The single currency every product is priced in.
    #[must_use]
    pub fn currency(&self) -> CurrencyCode {
        self.products
            .first()
            .map(|p| p.unit_price.currency_code)
            .unwrap_or_default()
    }

    /// A zero amount in the catalog currency.
    #[must_use]
    pub fn zero(&self) -> Price {
        Price::new(Decimal::ZERO, self.currency())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
