use async_trait::async_trait;
use serde_json::Value;

use crate::catalog::errors::CatalogError;

/// Section holding the per-title documents served by keyed lookup and search.
pub const TITLES_SECTION: &str = "titles";

/// Read-only access to the catalog document store.
///
/// Documents are opaque JSON; this service never interprets their schema.
/// All operations run behind the access gate.
#[async_trait]
pub trait CatalogReader: Send + Sync + 'static {
    /// All documents in a named section (e.g. `top-rated`, `trending`).
    ///
    /// An unknown section is an empty list, not an error.
    async fn list_section(&self, section: &str) -> Result<Vec<Value>, CatalogError>;

    /// Single title document by identifier.
    async fn find_title(&self, title_id: &str) -> Result<Option<Value>, CatalogError>;

    /// Case-insensitive substring search over title documents.
    async fn search_titles(&self, query: &str) -> Result<Vec<Value>, CatalogError>;
}
