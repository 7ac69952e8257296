//! Line items and finalized orders.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use fishmarket_core::{Price, ProductId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Product;
use crate::validation::CustomerInfo;

/// One product-quantity pair destined for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
}

impl OrderLineItem {
    /// Build a line item for `quantity` units of `product`.
    #[must_use]
    pub fn new(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            quantity,
        }
    }

    /// `unit_price × quantity`, saturating at the decimal maximum.
    #[must_use]
    pub fn line_total(&self) -> Price {
        Price::new(
            self.unit_price
                .amount
                .saturating_mul(self.quantity.into()),
            self.unit_price.currency_code,
        )
    }
}

/// A finalized order, assembled at submission time and handed to a
/// dispatcher. Never stored by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Fresh reference for each assembled order.
    pub reference: Uuid,
    pub placed_at: DateTime<Utc>,
    pub customer: CustomerInfo,
    /// Selected products in catalog order.
    pub lines: Vec<OrderLineItem>,
    /// Sum of line totals, rounded to two decimal places.
    pub total_amount: Price,
}

impl Order {
    /// Assemble an order with a new reference and the current timestamp.
    #[must_use]
    pub fn assemble(customer: CustomerInfo, lines: Vec<OrderLineItem>, total_amount: Price) -> Self {
        Self {
            reference: Uuid::new_v4(),
            placed_at: Utc::now(),
            customer,
            lines,
            total_amount,
        }
    }

    /// Items as `"Fresh Tilapia x2, Fresh Catfish x1"`.
    #[must_use]
    pub fn item_list(&self) -> String {
        self.lines
            .iter()
            .map(|line| format!("{} x{}", line.name, line.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Human-readable order text for a messaging channel.
    #[must_use]
    pub fn summary(&self) -> String {
        let c = &self.customer;
        let mut out = String::from("New Order:\n\n");
        let _ = writeln!(out, "Customer: {}", c.name);
        let _ = writeln!(out, "Email: {}", c.email);
        let _ = writeln!(out, "Phone: {}", c.phone);
        let _ = write!(out, "\nDelivery Address:\n{}\n", c.delivery_address());
        let _ = write!(out, "\nItems:\n{}\n", self.item_list());
        let _ = write!(out, "\nTotal: {}", self.total_amount);
        out
    }
}
