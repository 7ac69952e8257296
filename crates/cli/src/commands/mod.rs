//! CLI subcommands.

use std::path::{Path, PathBuf};

use fishmarket_ordering::{Catalog, CatalogError, ConfigError, OrderConfig, SubmitError};
use thiserror::Error;
use tracing::info;

pub mod catalog;
pub mod order;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unknown product id: {0}")]
    UnknownProduct(String),

    #[error("{0}")]
    Submit(#[from] SubmitError),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Resolve the catalog: explicit flag, then `ORDER_CATALOG_PATH`, then the
/// built-in fish catalog.
pub async fn load_catalog(
    flag: Option<PathBuf>,
    config: &OrderConfig,
) -> Result<Catalog, CommandError> {
    match flag.or_else(|| config.catalog_path.clone()) {
        Some(path) => read_catalog(&path).await,
        None => Ok(Catalog::fish_market()),
    }
}

async fn read_catalog(path: &Path) -> Result<Catalog, CommandError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CommandError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let catalog = Catalog::from_json(&json)?;
    info!(path = %path.display(), products = catalog.len(), "Loaded catalog");
    Ok(catalog)
}
