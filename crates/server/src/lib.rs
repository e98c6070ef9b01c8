//! Lead Scoring Server
//!
//! HTTP endpoints that expose the lead scoring engine to the CRM API layer.

pub mod http;
pub mod metrics;
pub mod state;

pub use http::create_router;
pub use metrics::{init_metrics, record_error, record_score};
pub use state::AppState;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lead_scoring_config::ConfigError;
use lead_scoring_engine::ScoringError;
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unknown weight profile: {0}")]
    UnknownProfile(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::UnknownProfile(_) => StatusCode::NOT_FOUND,
            ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label for the error counter
    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::InvalidRequest(_) => "invalid_request",
            ServerError::UnknownProfile(_) => "unknown_profile",
            ServerError::Config(_) => "config",
        }
    }
}

impl From<ScoringError> for ServerError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::UnknownProfile(name)
            | ScoringError::Config(ConfigError::UnknownProfile(name)) => {
                ServerError::UnknownProfile(name)
            }
            other => ServerError::Config(other.to_string()),
        }
    }
}

impl From<ConfigError> for ServerError {
    fn from(err: ConfigError) -> Self {
        ScoringError::from(err).into()
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        record_error(self.kind());
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = Json(serde_json::json!({
            "status": "error",
            "error": self.kind(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
