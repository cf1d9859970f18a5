//! DevPulse REST API
//!
//! HTTP API layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Team
//! - `GET /api/v1/team` - Per-developer overview
//! - `GET /api/v1/team/stats` - Aggregated team statistics
//! - `GET /api/v1/team/insights` - Statistics plus advisory insights
//!
//! ## Developers
//! - `GET /api/v1/developers` - Roster listing
//! - `GET /api/v1/developers/:id` - One developer's detail
//! - `GET /api/v1/developers/:id/telemetry` - Device telemetry
//! - `GET /api/v1/developers/:id/recommendations` - Coaching suggestions
//! - `GET /api/v1/developers/:id/achievements` - Gamification roll-up
//!
//! ## Image Analysis
//! - `POST /api/analyze_image` - Proxy to the vision backend
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Team routes
        .route("/team", get(routes::team::get_team))
        .route("/team/stats", get(routes::team::get_team_stats))
        .route("/team/insights", get(routes::team::get_team_insights))
        // Developer routes
        .route("/developers", get(routes::developers::list_members))
        .route("/developers/:id", get(routes::developers::get_developer))
        .route(
            "/developers/:id/telemetry",
            get(routes::developers::get_telemetry),
        )
        .route(
            "/developers/:id/recommendations",
            get(routes::developers::get_recommendations),
        )
        .route(
            "/developers/:id/achievements",
            get(routes::developers::get_achievements),
        );

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        // Kept at its historical path for dashboard clients
        .route("/api/analyze_image", post(routes::analyze::analyze_image))
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Configure properly in production
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("DevPulse API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("DevPulse API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gitlab::SampleMetricsProvider;
    use crate::roster::Roster;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let roster = Arc::new(Roster::builtin());
        let provider = Arc::new(SampleMetricsProvider);
        let state = AppState::new(roster, provider, ApiConfig::default());
        build_router(state)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full_reports_provider() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["provider"], "sample");
        assert_eq!(body["vision"], "disabled");
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_team_overview() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/team")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["developers"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_team_stats() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/team/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["total_developers"], 4);
        assert!(body["average_productivity"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn test_team_insights_include_stats() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/team/insights")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["insights"].is_array());
        assert_eq!(body["stats"]["total_developers"], 4);
    }

    #[tokio::test]
    async fn test_developer_detail() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/developers/dev1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["user_info"]["name"], "Alex Thompson");
        assert!(body["health_score"].as_i64().unwrap() <= 100);
    }

    #[tokio::test]
    async fn test_unknown_developer_is_404() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/developers/dev99")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_manager_has_no_developer_detail() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/developers/admin")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_recommendations_are_capped() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/developers/dev2/recommendations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["recommendations"].as_array().unwrap().len() <= 4);
    }

    #[tokio::test]
    async fn test_telemetry_exposes_focus_score() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/developers/dev3/telemetry")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let focus = body["focus_score"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&focus));
        // Samples exist, so the focus score comes from the newest one.
        assert_eq!(
            focus,
            body["telemetry"]["daily_data"][0]["focus_score"]
                .as_f64()
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_achievements_roll_up() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/developers/dev1/achievements")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["user_id"], "dev1");
        assert!(body["total_points"].as_u64().unwrap() >= 1400);
        let names: Vec<&str> = body["achievements"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"Code Warrior"));
    }

    #[tokio::test]
    async fn test_achievements_for_unknown_developer_are_404() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/developers/dev99/achievements")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_analyze_missing_fields() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze_image")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"prompt": "What is in this chart?"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Image path and prompt are required.");
    }

    #[tokio::test]
    async fn test_analyze_rejects_path_traversal() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze_image")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        r#"{"image_path": "../secrets.png", "prompt": "Describe this."}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid image path.");
    }

    #[tokio::test]
    async fn test_analyze_without_vision_backend() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze_image")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        r#"{"image_path": "chart.png", "prompt": "Describe this."}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
    }
}
