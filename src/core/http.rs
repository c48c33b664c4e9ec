//! HTTP endpoint server using Axum

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::config::AppConfig;
use crate::core::recommendation::RecommendationService;
use crate::metrics::Metrics;
use crate::models::response::{CurrentQuotesResponse, HistoricalQuotesResponse};
use crate::services::cache::QuoteCache;
use crate::services::sources::build_source;

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub cache: Arc<QuoteCache>,
    pub recommendations: Arc<RecommendationService>,
}

impl AppState {
    /// Wire the configured source, cache and analysis service together.
    pub fn from_config(config: &AppConfig) -> Result<Self, prometheus::Error> {
        let metrics = Arc::new(Metrics::new()?);
        let cache = QuoteCache::new(build_source(config), config.refresh_interval, config.lookback_days)
            .with_metrics(metrics.clone());

        Ok(Self {
            metrics,
            start_time: Arc::new(Instant::now()),
            cache: Arc::new(cache),
            recommendations: Arc::new(RecommendationService::new(config.analysis.clone())),
        })
    }
}

/// Liveness plus the outcome of the last quote refresh.
///
/// `degraded` means the last refresh failed; cached data is still served.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.cache.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    let status = if snapshot.last_error.is_some() {
        "degraded"
    } else {
        "healthy"
    };

    Json(json!({
        "status": status,
        "uptime_seconds": uptime_seconds,
        "service": "bullion-quote-engine",
        "last_error": snapshot.error_message(),
    }))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Latest quote per metal, with the last refresh error if any.
pub async fn current_quotes(State(state): State<AppState>) -> Json<CurrentQuotesResponse> {
    state.cache.refresh_if_stale().await;
    let snapshot = state.cache.read().await;
    Json(snapshot.current_quotes_response(Utc::now()))
}

pub async fn historical_quotes(State(state): State<AppState>) -> Json<HistoricalQuotesResponse> {
    state.cache.refresh_if_stale().await;
    let snapshot = state.cache.read().await;
    Json(snapshot.historical_response())
}

/// Per-metal recommendations. A total data failure is answered with 500.
pub async fn recommendations(State(state): State<AppState>) -> Response {
    state.cache.refresh_if_stale().await;
    let snapshot = state.cache.read().await;
    let response = state.recommendations.recommend(&snapshot, Utc::now());

    let status = if response.is_success() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(response)).into_response()
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/metals", get(current_quotes))
        .route("/api/historical_metals", get(historical_quotes))
        .route("/api/recommendations", get(recommendations))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
