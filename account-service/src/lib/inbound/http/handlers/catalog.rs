use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// List every document in a catalog section. Unknown sections return an
/// empty list rather than a 404, matching plain keyed lookup semantics.
pub async fn get_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Result<ApiSuccess<SectionResponseData>, ApiError> {
    let results = state.catalog.list_section(&section).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        SectionResponseData {
            total: results.len(),
            results,
        },
    ))
}

pub async fn get_title(
    State(state): State<AppState>,
    Path(title_id): Path<String>,
) -> Result<ApiSuccess<TitleResponseData>, ApiError> {
    let document = state
        .catalog
        .find_title(&title_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No title found: {}", title_id)))?;

    Ok(ApiSuccess::new(StatusCode::OK, TitleResponseData { document }))
}

pub async fn search_titles(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<ApiSuccess<SectionResponseData>, ApiError> {
    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Search query is required".to_string()))?;

    let results = state.catalog.search_titles(query).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        SectionResponseData {
            total: results.len(),
            results,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionResponseData {
    pub results: Vec<Value>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleResponseData {
    pub document: Value,
}
