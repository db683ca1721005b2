//! API routes for sibyld
//!
//! Three completion endpoints plus a health check. Payload shape is
//! enforced by the typed extractors; a body that does not match is rejected
//! before any provider call. Service failures surface as a generic 500 with
//! the failure's text in `detail`.

use crate::server::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sibyl_common::{AnalysisResponse, DecisionResponse, RecommendationResponse};
use std::sync::Arc;
use tracing::{error, info};

type AppStateArc = Arc<AppState>;

/// Error body for failed requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

fn internal_error(err: impl std::fmt::Display) -> (StatusCode, Json<ErrorDetail>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorDetail {
            detail: err.to_string(),
        }),
    )
}

// ============================================================================
// Completion Routes
// ============================================================================

/// Request for a decision recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRequest {
    pub context: Map<String, Value>,
    pub options: Vec<String>,
}

/// Request for a data analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub data: Map<String, Value>,
    pub question: String,
}

/// Request for personalized recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub user_context: Map<String, Value>,
}

pub fn completion_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/decision", post(get_decision))
        .route("/analyze", post(analyze_data))
        .route("/recommend", post(get_recommendation))
}

async fn get_decision(
    State(state): State<AppStateArc>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<DecisionResponse>, (StatusCode, Json<ErrorDetail>)> {
    info!("  Decision request with {} options", req.options.len());

    match state.service.decide(&req.context, &req.options).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            error!("  Decision failed: {}", e);
            Err(internal_error(e))
        }
    }
}

async fn analyze_data(
    State(state): State<AppStateArc>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, (StatusCode, Json<ErrorDetail>)> {
    info!("  Analysis request: {}", req.question);

    match state.service.analyze(&req.data, &req.question).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            error!("  Analysis failed: {}", e);
            Err(internal_error(e))
        }
    }
}

async fn get_recommendation(
    State(state): State<AppStateArc>,
    Json(req): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, (StatusCode, Json<ErrorDetail>)> {
    info!("  Recommendation request");

    match state.service.recommend(&req.user_context).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            error!("  Recommendation failed: {}", e);
            Err(internal_error(e))
        }
    }
}

// ============================================================================
// Health Routes
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: String,
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: state.service.model().to_string(),
    })
}
