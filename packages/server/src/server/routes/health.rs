use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use tracing::error;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub const STORE_UNAVAILABLE: &str = "Registration store unavailable";
pub const STORE_TIMEOUT: &str = "Registration store timeout (>5s)";

/// Health check endpoint
///
/// Returns 200 OK if the registration store answers, 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let check = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        state.deps.registrations.ping(),
    )
    .await;

    let error = match check {
        Ok(Ok(())) => None,
        Ok(Err(e)) => {
            error!(error = %e, "Health check: registration store ping failed");
            Some(STORE_UNAVAILABLE)
        }
        Err(_) => {
            error!("Health check: registration store ping timed out");
            Some(STORE_TIMEOUT)
        }
    };

    match error {
        None => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                error: None,
            }),
        ),
        Some(error) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy".to_string(),
                error: Some(error.to_string()),
            }),
        ),
    }
}
