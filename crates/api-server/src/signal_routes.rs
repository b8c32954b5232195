//! Signal generation over a caller-assembled context

use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use signal_engine::{RuleContext, Signal};

use crate::extract::ApiJson;
use crate::{ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub struct SignalsResponse {
    pub signals: Vec<Signal>,
}

pub fn signal_routes() -> Router<AppState> {
    Router::new().route("/api/signals", post(generate_signals))
}

async fn generate_signals(
    State(state): State<AppState>,
    ApiJson(ctx): ApiJson<RuleContext>,
) -> Json<ApiResponse<SignalsResponse>> {
    let signals = state.signals.generate_all(&ctx);
    Json(ApiResponse::success(SignalsResponse { signals }))
}
