//! Sector overview built from caller-supplied peer rows

use axum::{routing::post, Extension, Json, Router};
use chrono::NaiveDate;
use scoring_core::PriceBar;
use sector_stats::{
    calculate_rs_rank, calculate_summary, is_valid_sector, normalize_sector_param, sort_stocks,
    SectorSummary, SortField, StockEntry, VALID_SORT_FIELDS,
};
use serde::{Deserialize, Serialize};

use crate::extract::ApiJson;
use crate::request_id::RequestId;
use crate::{ApiResponse, AppError, AppResult, AppState};

/// A peer row, optionally with the daily history its price fields derive from.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorStockInput {
    #[serde(flatten)]
    pub entry: StockEntry,
    #[serde(default)]
    pub prices: Vec<PriceBar>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorSummaryRequest {
    pub sector: String,
    pub stocks: Vec<SectorStockInput>,
    #[serde(default)]
    pub sort: Option<String>,
    /// Reference date for returns; defaults to today (UTC)
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct SectorSummaryResponse {
    pub sector: String,
    pub summary: SectorSummary,
    pub stocks: Vec<StockEntry>,
}

pub fn sector_routes() -> Router<AppState> {
    Router::new().route("/api/sectors/summary", post(sector_summary))
}

async fn sector_summary(
    Extension(request_id): Extension<RequestId>,
    ApiJson(req): ApiJson<SectorSummaryRequest>,
) -> AppResult<Json<ApiResponse<SectorSummaryResponse>>> {
    let sector = normalize_sector_param(req.sector.trim());
    if !is_valid_sector(&sector) {
        return Err(AppError::BadRequest(format!("Unknown sector '{}'", req.sector)));
    }

    let sort = match req.sort.as_deref() {
        Some(field) => Some(SortField::parse(field).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid sort field '{}', expected one of: {}",
                field,
                VALID_SORT_FIELDS.join(", ")
            ))
        })?),
        None => None,
    };

    let today = req.as_of.unwrap_or_else(|| chrono::Utc::now().date_naive());
    let mut stocks: Vec<StockEntry> = req
        .stocks
        .into_iter()
        .map(|input| {
            if input.prices.is_empty() {
                input.entry
            } else {
                input.entry.with_price_history(&input.prices, today)
            }
        })
        .collect();

    calculate_rs_rank(&mut stocks);
    if let Some(field) = sort {
        sort_stocks(&mut stocks, field);
    }
    let summary = calculate_summary(&stocks);

    tracing::debug!(
        %request_id,
        %sector,
        stocks = stocks.len(),
        sort = ?sort,
        "Sector summary"
    );

    Ok(Json(ApiResponse::success(SectorSummaryResponse {
        sector,
        summary,
        stocks,
    })))
}
