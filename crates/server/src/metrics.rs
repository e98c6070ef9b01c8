//! Prometheus metrics
//!
//! - `lead_scores_total{profile, qualification}`: leads scored
//! - `lead_score_value{profile}`: score distribution
//! - `lead_scoring_errors_total{kind}`: failed requests

use axum::http::StatusCode;
use axum::response::IntoResponse;
use lead_scoring_core::QualificationLevel;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static PROMETHEUS: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder (idempotent)
pub fn init_metrics() -> Option<&'static PrometheusHandle> {
    if let Some(handle) = PROMETHEUS.get() {
        return Some(handle);
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(PROMETHEUS.get_or_init(|| handle)),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install Prometheus recorder");
            None
        }
    }
}

/// Record one scored lead
pub fn record_score(profile: &str, qualification: QualificationLevel, score: f64) {
    metrics::counter!(
        "lead_scores_total",
        "profile" => profile.to_string(),
        "qualification" => qualification.display_name().to_lowercase()
    )
    .increment(1);
    metrics::histogram!("lead_score_value", "profile" => profile.to_string()).record(score);
}

/// Record a failed request
pub fn record_error(kind: &'static str) {
    metrics::counter!("lead_scoring_errors_total", "kind" => kind).increment(1);
}

/// GET /metrics
pub async fn metrics_handler() -> impl IntoResponse {
    match PROMETHEUS.get() {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed".to_string(),
        ),
    }
}
