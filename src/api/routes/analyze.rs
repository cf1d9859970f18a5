//! Image Analysis Route
//!
//! Thin proxy in front of the vision backend.
//!
//! - POST /api/analyze_image - Analyze an image with a prompt
//!
//! The backend's JSON body is relayed verbatim on success. Failures
//! answer with a non-200 status and a top-level "error" string so
//! clients can branch on the status code alone.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::{Component, Path};
use std::sync::Arc;

use crate::api::dto::AnalyzeImageRequest;
use crate::api::state::AppState;
use crate::vision::VisionError;

/// POST /api/analyze_image
pub async fn analyze_image(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeImageRequest>,
) -> Response {
    let (image_path, prompt) = match (req.image_path.as_deref(), req.prompt.as_deref()) {
        (Some(path), Some(prompt)) if !path.is_empty() && !prompt.is_empty() => (path, prompt),
        _ => {
            return failure(
                StatusCode::BAD_REQUEST,
                "Image path and prompt are required.",
            );
        }
    };

    // Image paths are relative names inside the assets directory.
    let relative = Path::new(image_path);
    if relative.is_absolute()
        || relative
            .components()
            .any(|c| matches!(c, Component::ParentDir))
    {
        return failure(StatusCode::BAD_REQUEST, "Invalid image path.");
    }

    let Some(vision) = state.vision.as_ref() else {
        return failure(
            StatusCode::SERVICE_UNAVAILABLE,
            "Vision backend is not configured.",
        );
    };

    let full_path = state.config.assets_dir.join(relative);

    match vision.analyze_image(&full_path, prompt).await {
        Ok(payload) => Json(payload).into_response(),
        Err(e) => {
            tracing::warn!(
                image_path = %image_path,
                error = %e,
                "image analysis failed"
            );
            let status = match &e {
                VisionError::ImageRead { .. } => StatusCode::NOT_FOUND,
                VisionError::Timeout | VisionError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
                VisionError::Backend { .. } | VisionError::Request(_) => StatusCode::BAD_GATEWAY,
            };
            failure(status, &e.to_string())
        }
    }
}

fn failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": message,
        })),
    )
        .into_response()
}
