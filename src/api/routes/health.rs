//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// The dashboard serves sample data when its integrations are down,
/// so readiness never depends on them.
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let vision_status = match state.vision.as_ref() {
        Some(vision) => match vision.health_check().await {
            Ok(()) => "ok",
            Err(_) => "unreachable",
        },
        None => "disabled",
    };

    let status = if vision_status == "unreachable" {
        "degraded"
    } else {
        "healthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        provider: state.provider.name().to_string(),
        vision: vision_status.to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn liveness_is_unconditional() {
        assert_eq!(liveness().await, StatusCode::OK);
        assert_eq!(readiness().await, StatusCode::OK);
    }
}
