//! One-time async catalog loading.

use std::path::Path;

use tracing::info;

use crate::catalog::ResponseCatalog;
use crate::error::CatalogError;

/// Read and parse the catalog document at `path`.
///
/// Runs once at startup. Callers degrade to [`ResponseCatalog::empty`] on
/// failure so the engine keeps answering every input with its fallback reply.
pub async fn load_catalog(path: &Path) -> Result<ResponseCatalog, CatalogError> {
    let content = tokio::fs::read_to_string(path).await?;
    let catalog = ResponseCatalog::from_json_str(&content)?;
    info!(
        entries = catalog.len(),
        "Catalog loaded from {}",
        path.display()
    );
    Ok(catalog)
}
