//! Developer Routes
//!
//! Per-developer views: identity, metrics, telemetry and coaching
//! recommendations.
//!
//! - GET /api/v1/developers - Roster listing (managers included)
//! - GET /api/v1/developers/:id - One developer's full detail
//! - GET /api/v1/developers/:id/telemetry - Device telemetry
//! - GET /api/v1/developers/:id/recommendations - Coaching suggestions
//! - GET /api/v1/developers/:id/achievements - Gamification roll-up

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::achievements::achievement_summary;
use crate::api::dto::{
    AchievementsResponse, DeveloperDetail, MemberDto, RecommendationsResponse, TelemetryResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::model::Role;
use crate::recommendations::recommend;
use crate::roster::sample_telemetry;
use crate::scoring::health_score;

/// GET /api/v1/developers
pub async fn list_members(State(state): State<Arc<AppState>>) -> Json<Vec<MemberDto>> {
    let members = state
        .roster
        .members()
        .iter()
        .map(|(id, info)| MemberDto {
            id: id.clone(),
            info: info.clone(),
        })
        .collect();

    Json(members)
}

/// GET /api/v1/developers/:id
///
/// Managers are listed in the roster but carry no metrics, so they
/// 404 here like unknown ids.
pub async fn get_developer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeveloperDetail>> {
    let info = lookup_developer(&state, &id)?.clone();

    let gitlab = state
        .provider
        .developer_metrics(&id)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to fetch metrics: {}", e)))?;

    let telemetry = sample_telemetry(&id);

    Ok(Json(DeveloperDetail {
        id,
        user_info: info,
        health_score: health_score(&telemetry.health_data),
        gitlab,
    }))
}

/// GET /api/v1/developers/:id/telemetry
pub async fn get_telemetry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<TelemetryResponse>> {
    lookup_developer(&state, &id)?;

    let telemetry = sample_telemetry(&id);
    let health_score = health_score(&telemetry.health_data);
    let focus_score = telemetry.latest_focus_score();

    Ok(Json(TelemetryResponse {
        telemetry,
        health_score,
        focus_score,
    }))
}

/// GET /api/v1/developers/:id/recommendations
pub async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<RecommendationsResponse>> {
    lookup_developer(&state, &id)?;

    let metrics = state
        .provider
        .developer_metrics(&id)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to fetch metrics: {}", e)))?;

    Ok(Json(RecommendationsResponse {
        user_id: id,
        recommendations: recommend(&metrics),
    }))
}

/// GET /api/v1/developers/:id/achievements
pub async fn get_achievements(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<AchievementsResponse>> {
    lookup_developer(&state, &id)?;

    Ok(Json(AchievementsResponse {
        user_id: id,
        summary: achievement_summary(),
    }))
}

fn lookup_developer<'a>(
    state: &'a AppState,
    id: &str,
) -> Result<&'a crate::model::UserInfo, ApiError> {
    match state.roster.member(id) {
        Some(info) if info.role == Role::Developer => Ok(info),
        _ => Err(ApiError::NotFound(format!("developer: {}", id))),
    }
}
