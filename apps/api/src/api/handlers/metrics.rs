use axum::{extract::State, http::header::CONTENT_TYPE, response::IntoResponse};

use crate::api::errors::ApiError;
use crate::api::state::AppState;

/// Prometheus text exposition format
const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Expose collected metrics
///
/// GET /metrics
pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let body = state.metrics.render().map_err(|e| {
        tracing::error!(error = %e, "failed to encode metrics");
        ApiError::internal_server_error("internal server error")
    })?;

    Ok(([(CONTENT_TYPE, METRICS_CONTENT_TYPE)], body))
}
