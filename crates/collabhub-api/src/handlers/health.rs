//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.store.health_check().await {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
