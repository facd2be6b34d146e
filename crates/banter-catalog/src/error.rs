//! Error types for catalog loading and validation.

use banter_core::BanterError;

/// Errors from loading or validating a response catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate catalog key: {key}")]
    DuplicateKey { key: String },
    #[error("entry '{key}' has an empty variant list")]
    EmptyVariants { key: String },
}

impl From<CatalogError> for BanterError {
    fn from(err: CatalogError) -> Self {
        BanterError::Catalog(err.to_string())
    }
}
