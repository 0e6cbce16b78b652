use crate::api::schemas::health::HealthResponse;
use axum::{Json, response::IntoResponse};

/// Liveness probe: answers as long as the server is accepting requests.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok".to_string() })
}
