//! Financial health score endpoints

use axum::{routing::post, Json, Router};
use fundamental_scores::{
    calculate_altman_z_score, calculate_rule_of_40, calculate_rule_of_40_with_growth,
    AltmanZResult, RuleOf40Result,
};
use scoring_core::FinancialData;
use serde::Deserialize;

use crate::extract::ApiJson;
use crate::{ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub struct RuleOf40Request {
    pub current: FinancialData,
    #[serde(default)]
    pub previous: Option<FinancialData>,
}

pub fn score_routes() -> Router<AppState> {
    Router::new()
        .route("/api/scores/altman-z", post(altman_z))
        .route("/api/scores/rule-of-40", post(rule_of_40))
}

async fn altman_z(
    ApiJson(data): ApiJson<FinancialData>,
) -> Json<ApiResponse<AltmanZResult>> {
    Json(ApiResponse::success(calculate_altman_z_score(&data)))
}

async fn rule_of_40(
    ApiJson(req): ApiJson<RuleOf40Request>,
) -> Json<ApiResponse<RuleOf40Result>> {
    let result = match &req.previous {
        Some(previous) => calculate_rule_of_40_with_growth(&req.current, previous),
        None => calculate_rule_of_40(&req.current),
    };
    Json(ApiResponse::success(result))
}
