//! Team Routes
//!
//! Team-level views over the assembled developer records.
//!
//! - GET /api/v1/team - Per-developer overview rows
//! - GET /api/v1/team/stats - Aggregated team statistics
//! - GET /api/v1/team/insights - Statistics plus advisory insights

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{DeveloperSummary, InsightsResponse, TeamResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::scoring::{health_score, team_insights, team_stats, TeamStats};

/// GET /api/v1/team
///
/// One summary row per developer: repository scores plus the derived
/// wellness score.
pub async fn get_team(State(state): State<Arc<AppState>>) -> ApiResult<Json<TeamResponse>> {
    let records = state.roster.team_records(state.provider.as_ref()).await;

    let developers = records
        .iter()
        .map(|(id, record)| DeveloperSummary {
            id: id.clone(),
            name: record.user_info.name.clone(),
            title: record.user_info.title.clone(),
            team: record.user_info.team.clone(),
            productivity_score: record.gitlab.productivity_score,
            collaboration_score: record.gitlab.collaboration_score,
            health_score: health_score(&record.telemetry.health_data),
        })
        .collect();

    Ok(Json(TeamResponse { developers }))
}

/// GET /api/v1/team/stats
pub async fn get_team_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<TeamStats>> {
    let records = state.roster.team_records(state.provider.as_ref()).await;
    let stats = team_stats(&records)?;
    Ok(Json(stats))
}

/// GET /api/v1/team/insights
pub async fn get_team_insights(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<InsightsResponse>> {
    let records = state.roster.team_records(state.provider.as_ref()).await;
    let stats = team_stats(&records)?;
    let insights = team_insights(&stats);
    Ok(Json(InsightsResponse { stats, insights }))
}
