pub mod auth;
pub mod catalog;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::database;
use crate::state::AppState;

/// GET /health - liveness plus one database round trip.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match database::ping(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "code": 200,
                "database": "ok",
            })),
        ),
        Err(err) => {
            tracing::warn!("health check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "error",
                    "code": 503,
                    "error": "database_unavailable",
                    "message": "Database unreachable",
                })),
            )
        }
    }
}
