use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::Row;

use crate::catalog::errors::CatalogError;
use crate::catalog::ports::CatalogReader;
use crate::catalog::ports::TITLES_SECTION;

/// Catalog adapter over the `catalog_documents` table: one JSONB payload per
/// (section, doc_id) key, read verbatim.
pub struct PostgresCatalogReader {
    pool: PgPool,
}

impl PostgresCatalogReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogReader for PostgresCatalogReader {
    async fn list_section(&self, section: &str) -> Result<Vec<Value>, CatalogError> {
        let rows = sqlx::query(
            r#"
            SELECT document
            FROM catalog_documents
            WHERE section = $1
            ORDER BY doc_id
            "#,
        )
        .bind(section)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::Store(e.to_string()))?;

        rows.iter()
            .map(|row| {
                row.try_get("document")
                    .map_err(|e| CatalogError::Store(e.to_string()))
            })
            .collect()
    }

    async fn find_title(&self, title_id: &str) -> Result<Option<Value>, CatalogError> {
        let row = sqlx::query(
            r#"
            SELECT document
            FROM catalog_documents
            WHERE section = $1 AND doc_id = $2
            "#,
        )
        .bind(TITLES_SECTION)
        .bind(title_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CatalogError::Store(e.to_string()))?;

        row.map(|r| {
            r.try_get("document")
                .map_err(|e| CatalogError::Store(e.to_string()))
        })
        .transpose()
    }

    async fn search_titles(&self, query: &str) -> Result<Vec<Value>, CatalogError> {
        let pattern = format!("%{}%", query);

        let rows = sqlx::query(
            r#"
            SELECT document
            FROM catalog_documents
            WHERE section = $1 AND document->>'title' ILIKE $2
            ORDER BY doc_id
            "#,
        )
        .bind(TITLES_SECTION)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::Store(e.to_string()))?;

        rows.iter()
            .map(|row| {
                row.try_get("document")
                    .map_err(|e| CatalogError::Store(e.to_string()))
            })
            .collect()
    }
}
