use thiserror::Error;

/// Error for catalog read operations.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Catalog store error: {0}")]
    Store(String),
}
