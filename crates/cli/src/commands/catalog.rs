//! List the product catalog.

use std::io::Write;
use std::path::PathBuf;

use fishmarket_ordering::{Catalog, OrderConfig};

use super::{CommandError, load_catalog};

/// Print every product with its price and unit.
///
/// # Errors
///
/// Returns an error if configuration or the catalog file is invalid.
pub async fn list(catalog_flag: Option<PathBuf>) -> Result<(), CommandError> {
    let config = OrderConfig::from_env()?;
    let catalog = load_catalog(catalog_flag, &config).await?;

    let mut out = std::io::stdout().lock();
    out.write_all(render(&catalog).as_bytes())?;
    Ok(())
}

/// One line per product: `ID  NAME  PRICE UNIT`.
fn render(catalog: &Catalog) -> String {
    let width = catalog
        .products()
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0);

    catalog
        .products()
        .iter()
        .map(|p| format!("{:<4}{:<width$}  {} {}\n", p.id, p.name, p.unit_price, p.unit))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fish_market() {
        let text = render(&Catalog::fish_market());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "1   Fresh Tilapia   GHS 8.99 per kg");
        assert_eq!(lines[1], "2   Smoked Tilapia  GHS 10.49 per kg");
    }
}
