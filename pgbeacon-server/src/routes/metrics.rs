//! Prometheus scrape endpoint

use axum::{extract::State, http::header, response::IntoResponse, routing::get, Router};

use crate::metrics::METRICS_CONTENT_TYPE;
use crate::state::AppState;

/// GET /metrics
async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)],
        state.metrics().render(),
    )
}

/// Metrics routes
pub fn router() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics))
}
