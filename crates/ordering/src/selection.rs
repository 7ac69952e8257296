//! Product quantity selection.
//!
//! A [`Selection`] maps product IDs to quantities of at least one. Products
//! the visitor has not picked (or has decremented back to zero) are simply
//! absent. Transitions are pure: [`Selection::adjusted`] returns a new value
//! and leaves the original untouched.

use std::collections::HashMap;

use fishmarket_core::{Price, ProductId};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::order::OrderLineItem;

/// Chosen quantities keyed by product ID. Never stores a zero quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection {
    quantities: HashMap<ProductId, u32>,
}

impl Selection {
    /// An empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with `delta` added to the quantity of `product_id`.
    ///
    /// The result is clamped at zero, and a zero quantity removes the entry.
    /// IDs missing from `catalog` are ignored and the selection is returned
    /// unchanged.
    #[must_use]
    pub fn adjusted(&self, catalog: &Catalog, product_id: &str, delta: i64) -> Self {
        let Some(product) = catalog.get(product_id) else {
            return self.clone();
        };

        let current = i64::from(self.quantity(product_id));
        let next = current.saturating_add(delta).clamp(0, i64::from(u32::MAX));
        let next = u32::try_from(next).unwrap_or(u32::MAX);

        let mut quantities = self.quantities.clone();
        if next == 0 {
            quantities.remove(product_id);
        } else {
            quantities.insert(product.id.clone(), next);
        }
        Self { quantities }
    }

    /// Quantity chosen for a product (zero when absent).
    #[must_use]
    pub fn quantity(&self, product_id: &str) -> u32 {
        self.quantities.get(product_id).copied().unwrap_or(0)
    }

    /// Returns `true` if at least one product is selected.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.quantities.is_empty()
    }

    /// Number of distinct products selected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Total units across all products.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.quantities.values().map(|&q| u64::from(q)).sum()
    }

    /// One line per selected product, in catalog order.
    #[must_use]
    pub fn line_items(&self, catalog: &Catalog) -> Vec<OrderLineItem> {
        catalog
            .into_iter()
            .filter_map(|product| {
                self.quantities
                    .get(&product.id)
                    .map(|&quantity| OrderLineItem::new(product, quantity))
            })
            .collect()
    }

    /// Exact sum of `unit_price × quantity`, rounded to two decimal places.
    #[must_use]
    pub fn total(&self, catalog: &Catalog) -> Price {
        let amount = self
            .line_items(catalog)
            .iter()
            .fold(catalog.zero().amount, |acc, line| {
                acc.saturating_add(line.line_total().amount)
            });
        Price::new(amount, catalog.currency()).rounded()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_fresh_selection_is_empty() {
        let selection = Selection::new();
        assert!(!selection.has_selection());
        assert_eq!(selection.quantity("1"), 0);
        assert_eq!(selection.total(&Catalog::fish_market()).amount, Decimal::ZERO);
    }

    #[test]
    fn test_increment_selects() {
        let catalog = Catalog::fish_market();
        let selection = Selection::new().adjusted(&catalog, "3", 1);
        assert!(selection.has_selection());
        assert_eq!(selection.quantity("3"), 1);
    }

    #[test]
    fn test_adjusted_leaves_original_untouched() {
        let catalog = Catalog::fish_market();
        let before = Selection::new().adjusted(&catalog, "1", 2);
        let after = before.adjusted(&catalog, "1", 1);
        assert_eq!(before.quantity("1"), 2);
        assert_eq!(after.quantity("1"), 3);
    }

    #[test]
    fn test_decrement_at_zero_stays_zero() {
        let catalog = Catalog::fish_market();
        for product in &catalog {
            let selection = Selection::new().adjusted(&catalog, product.id.as_str(), -1);
            assert_eq!(selection.quantity(product.id.as_str()), 0);
            assert!(selection.is_empty());
        }
    }

    #[test]
    fn test_decrement_to_zero_removes_entry() {
        let catalog = Catalog::fish_market();
        let selection = Selection::new()
            .adjusted(&catalog, "1", 1)
            .adjusted(&catalog, "2", 1)
            .adjusted(&catalog, "1", -1);
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.quantity("1"), 0);
        assert_eq!(selection, Selection::new().adjusted(&catalog, "2", 1));
    }

    #[test]
    fn test_large_negative_delta_clamps() {
        let catalog = Catalog::fish_market();
        let selection = Selection::new()
            .adjusted(&catalog, "5", 4)
            .adjusted(&catalog, "5", -100);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_large_positive_delta_saturates() {
        let catalog = Catalog::fish_market();
        let selection = Selection::new()
            .adjusted(&catalog, "5", i64::MAX)
            .adjusted(&catalog, "5", 1);
        assert_eq!(selection.quantity("5"), u32::MAX);
    }

    #[test]
    fn test_unknown_product_is_noop() {
        let catalog = Catalog::fish_market();
        let selection = Selection::new().adjusted(&catalog, "99", 1);
        assert!(selection.is_empty());
        assert_eq!(selection.quantity("99"), 0);
    }

    #[test]
    fn test_total_two_tilapia_one_catfish() {
        let catalog = Catalog::fish_market();
        let selection = Selection::new()
            .adjusted(&catalog, "1", 1)
            .adjusted(&catalog, "1", 1)
            .adjusted(&catalog, "4", 1);
        assert_eq!(selection.total(&catalog).amount, dec!(25.97));
        assert_eq!(selection.item_count(), 3);
    }

    #[test]
    fn test_total_is_exact_over_many_lines() {
        let catalog = Catalog::fish_market();
        let mut selection = Selection::new();
        for product in &catalog {
            selection = selection.adjusted(&catalog, product.id.as_str(), 1000);
        }
        // (8.99 + 10.49 + 9.99 + 7.99 + 9.49 + 8.99) * 1000
        assert_eq!(selection.total(&catalog).amount, dec!(55940.00));
    }

    #[test]
    fn test_line_items_follow_catalog_order() {
        let catalog = Catalog::fish_market();
        let selection = Selection::new()
            .adjusted(&catalog, "6", 1)
            .adjusted(&catalog, "2", 3)
            .adjusted(&catalog, "4", 2);
        let lines = selection.line_items(&catalog);
        let ids: Vec<&str> = lines.iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, ["2", "4", "6"]);
        assert_eq!(lines[0].name, "Smoked Tilapia");
        assert_eq!(lines[0].quantity, 3);
        assert_eq!(lines[0].unit_price.amount, dec!(10.49));
    }
}
