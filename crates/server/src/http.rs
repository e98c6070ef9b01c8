//! HTTP Endpoints
//!
//! REST API consumed by the CRM layer.

use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Json, Path, State},
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use lead_scoring_config::FeatureWeights;
use lead_scoring_core::{LeadFeatures, LeadRecord};
use lead_scoring_engine::{LeadScore, RankedLead};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::metrics::{metrics_handler, record_score};
use crate::state::AppState;
use crate::ServerError;

const DEFAULT_PROFILE: &str = "default";
const TOP_FACTORS: usize = 5;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let config = state.config.read();
    let cors_layer = build_cors_layer(&config.server.cors_origins, config.server.cors_enabled);
    let timeout = Duration::from_secs(config.server.timeout_seconds);
    drop(config);

    Router::new()
        // Scoring
        .route("/api/leads/score", post(score_lead))
        .route("/api/leads/score/batch", post(score_batch))
        .route("/api/leads/features", post(extract_features))
        // Weight tables
        .route("/api/weights", get(list_weights))
        .route("/api/weights/:profile", get(get_weights))
        // Health check
        .route("/health", get(health_check))
        // Prometheus metrics
        .route("/metrics", get(metrics_handler))
        // Admin
        .route("/admin/reload-scoring", post(reload_scoring))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If cors_origins is empty, defaults to localhost:3000
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if parsed_origins.is_empty() {
        if !origins.is_empty() {
            tracing::error!("All configured CORS origins are invalid, falling back to localhost");
        }
        return layer.allow_origin(HeaderValue::from_static("http://localhost:3000"));
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    layer.allow_origin(parsed_origins)
}

/// Single lead scoring request
#[derive(Debug, Deserialize)]
struct ScoreRequest {
    lead: LeadRecord,
    /// Weight profile; the base table when absent
    #[serde(default)]
    profile: Option<String>,
    /// Reference time for temporal features; now when absent
    #[serde(default)]
    as_of: Option<DateTime<Utc>>,
}

/// Batch scoring request
#[derive(Debug, Deserialize)]
struct BatchRequest {
    leads: Vec<LeadRecord>,
    #[serde(default)]
    profile: Option<String>,
    #[serde(default)]
    as_of: Option<DateTime<Utc>>,
}

/// Feature extraction request
#[derive(Debug, Deserialize)]
struct FeaturesRequest {
    lead: LeadRecord,
    #[serde(default)]
    as_of: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct Factor {
    feature: String,
    contribution: f64,
}

fn top_factors(score: &LeadScore) -> Vec<Factor> {
    score
        .top_factors(TOP_FACTORS)
        .into_iter()
        .map(|(feature, contribution)| Factor {
            feature: feature.to_string(),
            contribution,
        })
        .collect()
}

/// Score response
#[derive(Debug, Serialize)]
struct ScoreResponse {
    lead_id: Option<String>,
    profile: String,
    #[serde(flatten)]
    score: LeadScore,
    top_factors: Vec<Factor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    features: Option<LeadFeatures>,
}

#[derive(Debug, Serialize)]
struct BatchResponse {
    profile: String,
    count: usize,
    results: Vec<RankedLead>,
}

/// POST /api/leads/score
async fn score_lead(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, ServerError> {
    let Json(request) = payload?;
    let include_features = state.get_config().features.include_features;
    let engine = state.engine();
    let profile = request.profile.as_deref();
    let now = request.as_of.unwrap_or_else(Utc::now);

    let evaluation = engine.evaluate(&request.lead, profile, now)?;
    let profile = profile.unwrap_or(DEFAULT_PROFILE).to_string();
    record_score(
        &profile,
        evaluation.score.qualification,
        evaluation.score.score,
    );

    Ok(Json(ScoreResponse {
        lead_id: request.lead.profile.id.clone(),
        top_factors: top_factors(&evaluation.score),
        profile,
        score: evaluation.score,
        features: include_features.then_some(evaluation.features),
    }))
}

/// POST /api/leads/score/batch
///
/// Results are ranked by score, highest first.
async fn score_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchResponse>, ServerError> {
    let Json(request) = payload?;
    let max_batch_size = state.get_config().server.max_batch_size;
    if request.leads.len() > max_batch_size {
        return Err(ServerError::InvalidRequest(format!(
            "batch of {} leads exceeds the limit of {}",
            request.leads.len(),
            max_batch_size
        )));
    }

    let engine = state.engine();
    let profile = request.profile.as_deref();
    let now = request.as_of.unwrap_or_else(Utc::now);

    let results = engine.score_batch(&request.leads, profile, now)?;
    let profile = profile.unwrap_or(DEFAULT_PROFILE).to_string();
    for entry in &results {
        record_score(&profile, entry.score.qualification, entry.score.score);
    }

    tracing::info!(leads = results.len(), profile = %profile, "Scored batch");

    Ok(Json(BatchResponse {
        profile,
        count: results.len(),
        results,
    }))
}

/// POST /api/leads/features
async fn extract_features(
    State(state): State<AppState>,
    payload: Result<Json<FeaturesRequest>, JsonRejection>,
) -> Result<Json<LeadFeatures>, ServerError> {
    let Json(request) = payload?;
    let now = request.as_of.unwrap_or_else(Utc::now);
    Ok(Json(state.engine().extract(&request.lead, now)))
}

/// GET /api/weights
async fn list_weights(State(state): State<AppState>) -> Json<serde_json::Value> {
    let engine = state.engine();
    Json(serde_json::json!({
        "profiles": engine.profile_names(),
        "thresholds": engine.scoring_config().qualification_thresholds,
        "weights": engine.scoring_config().weights,
    }))
}

/// GET /api/weights/:profile
///
/// The resolved table (base weights with the profile's overrides applied).
async fn get_weights(
    State(state): State<AppState>,
    Path(profile): Path<String>,
) -> Result<Json<FeatureWeights>, ServerError> {
    let engine = state.engine();
    let weights = engine.weights(Some(profile.as_str()))?;
    Ok(Json(weights.clone()))
}

/// Health check
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let engine = state.engine();
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "profiles": engine.profile_names().len(),
        "text_analyzer": engine.extractor().text_analyzer_name(),
    }))
}

/// POST /admin/reload-scoring
///
/// Rebuilds the engine from the scoring configuration file. A file that
/// fails to load or validate leaves the running engine in place.
async fn reload_scoring(State(state): State<AppState>) -> impl IntoResponse {
    match state.reload_scoring() {
        Ok(engine) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "success",
                "message": "Scoring configuration reloaded successfully",
                "profiles": engine.profile_names(),
            })),
        ),
        Err(e) => {
            tracing::error!("Scoring config reload failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "status": "error",
                    "message": e.to_string(),
                })),
            )
        },
    }
}
