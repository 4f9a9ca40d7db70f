//! Health check endpoints

use axum::{extract::State, http::StatusCode};

use crate::AppState;

/// Liveness probe
pub async fn health_check() -> &'static str {
    "ok"
}

/// Readiness probe (checks store connectivity)
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.services.catalog.check_connection().await {
        Ok(()) => (StatusCode::OK, "ready"),
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    }
}
