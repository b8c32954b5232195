//! Ticker autocomplete

use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use ticker_search::SearchResult;

use crate::extract::ApiQuery;
use crate::request_id::RequestId;
use crate::{ApiResponse, AppError, AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
    /// Kept as text so a malformed value falls back to the default limit
    #[serde(default)]
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
}

pub fn search_routes() -> Router<AppState> {
    Router::new().route("/api/search", get(search_tickers))
}

async fn search_tickers(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiQuery(params): ApiQuery<SearchQuery>,
) -> AppResult<Json<ApiResponse<SearchResponse>>> {
    let query = params.q.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(AppError::BadRequest(
            "Query parameter 'q' is required".to_string(),
        ));
    }

    let requested = params.limit.as_deref().and_then(|l| l.trim().parse::<i64>().ok());
    let limit = state.config.search_limit(requested);
    let results = state.index.search(query, limit);

    tracing::debug!(%request_id, query, limit, hits = results.len(), "Ticker search");

    Ok(Json(ApiResponse::success(SearchResponse {
        query: query.to_string(),
        results,
    })))
}
