//! HTTP surface over the scoring, signal, search and sector crates.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request},
    middleware,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use signal_engine::SignalGenerator;
use ticker_search::{BundledSource, JsonFileSource, TickerIndex, TickerSource};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod extract;
pub mod request_id;
pub mod score_routes;
pub mod search_routes;
pub mod sector_routes;
pub mod signal_routes;


pub use config::{Environment, ServerConfig};
pub use error::{AppError, AppResult};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub index: Arc<TickerIndex>,
    pub signals: Arc<SignalGenerator>,
}

impl AppState {
    pub fn new(config: ServerConfig, index: TickerIndex) -> Self {
        Self {
            config: Arc::new(config),
            index: Arc::new(index),
            signals: Arc::new(SignalGenerator::new()),
        }
    }
}

/// Standard response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: &'static str,
    pub tickers: usize,
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
        tickers: state.index.len(),
    }))
}

async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let allow_origin = if config.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health))
        .merge(search_routes::search_routes())
        .merge(score_routes::score_routes())
        .merge(signal_routes::signal_routes())
        .merge(sector_routes::sector_routes())
        .fallback(not_found)
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .layer(cors)
        .with_state(state)
}

/// Load the ticker universe named by the config, falling back to the bundled list.
pub async fn load_index(config: &ServerConfig) -> Result<TickerIndex> {
    let source: Box<dyn TickerSource> = match &config.tickers_path {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(BundledSource),
    };

    TickerIndex::from_source(source.as_ref())
        .await
        .with_context(|| format!("Failed to build ticker index from {}", source.describe()))
}

pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

pub async fn run_server() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env()?;
    let addr = config.socket_addr()?;
    tracing::info!(environment = ?config.environment, "Configuration loaded");

    let index = load_index(&config).await?;
    let app = build_router(AppState::new(config, index));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use ticker_search::TickerRecord;

    let index = TickerIndex::new(vec![
        TickerRecord::new("AAPL", "Apple Inc.")
            .with_exchange("NASDAQ")
            .with_type("stock"),
        TickerRecord::new("AMZN", "Amazon.com Inc.")
            .with_exchange("NASDAQ")
            .with_type("stock"),
        TickerRecord::new("MA", "Mastercard Incorporated").with_exchange("NYSE"),
        TickerRecord::new("MAR", "Marriott International").with_exchange("NASDAQ"),
        TickerRecord::new("SPY", "SPDR S&P 500 ETF Trust")
            .with_exchange("NYSE")
            .with_type("etf"),
    ]);

    let config = ServerConfig {
        search_default_limit: 3,
        search_max_limit: 4,
        ..ServerConfig::default()
    };
    AppState::new(config, index)
}
