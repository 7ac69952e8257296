//! Place an order through the order engine.

use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use fishmarket_ordering::{
    CustomerForm, LogDispatcher, Order, OrderConfig, OrderEngine, SubmitError,
};
use tracing::{error, info};

use super::{CommandError, load_catalog};

/// A `--item ID=QTY` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemArg {
    pub product_id: String,
    pub quantity: u32,
}

impl FromStr for ItemArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, qty) = s
            .split_once('=')
            .ok_or_else(|| format!("expected ID=QTY, got '{s}'"))?;
        let id = id.trim();
        if id.is_empty() {
            return Err(format!("missing product id in '{s}'"));
        }
        let quantity = qty
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid quantity in '{s}': {e}"))?;
        if quantity == 0 {
            return Err(format!("quantity must be at least 1 in '{s}'"));
        }
        Ok(Self {
            product_id: id.to_string(),
            quantity,
        })
    }
}

/// Select the requested items, fill the form, and submit.
///
/// # Errors
///
/// Returns an error for unknown product IDs, validation failures (each field
/// is logged first), or dispatch failures.
pub async fn place(
    catalog_flag: Option<PathBuf>,
    items: &[ItemArg],
    form: CustomerForm,
    json: bool,
) -> Result<(), CommandError> {
    let config = OrderConfig::from_env()?;
    let catalog = load_catalog(catalog_flag, &config).await?;
    let mut engine = OrderEngine::new(catalog, config);

    for item in items {
        // The engine ignores unknown IDs; on the command line that is a typo
        if !engine.catalog().contains(&item.product_id) {
            return Err(CommandError::UnknownProduct(item.product_id.clone()));
        }
        engine.adjust_quantity(&item.product_id, i64::from(item.quantity));
    }
    engine.set_form(form);

    let order = match engine.submit(&LogDispatcher).await {
        Ok(order) => order,
        Err(SubmitError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                error!(field = %field, "{message}");
            }
            return Err(SubmitError::Validation(errors).into());
        }
        Err(e) => return Err(e.into()),
    };

    info!(reference = %order.reference, total = %order.total_amount, "Order placed");
    write_order(&order, json)
}

fn write_order(order: &Order, json: bool) -> Result<(), CommandError> {
    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, order)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", order.summary())?;
    }
    Ok(())
}
