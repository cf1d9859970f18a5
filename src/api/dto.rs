//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::achievements::AchievementSummary;
use crate::model::{GitLabMetrics, Telemetry, UserInfo};
use crate::recommendations::Recommendation;
use crate::scoring::{Insight, TeamStats};

// ============================================
// TEAM DTOs
// ============================================

/// One row of the team overview
#[derive(Debug, Serialize)]
pub struct DeveloperSummary {
    /// Roster id, e.g. "dev1"
    pub id: String,
    pub name: String,
    pub title: String,
    pub team: String,
    pub productivity_score: f64,
    pub collaboration_score: f64,
    /// 0-100 wellness score derived from device health data
    pub health_score: i64,
}

/// Team overview response
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub developers: Vec<DeveloperSummary>,
}

/// Stats plus the insights derived from them
#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub stats: TeamStats,
    pub insights: Vec<Insight>,
}

// ============================================
// DEVELOPER DTOs
// ============================================

/// Roster listing entry
#[derive(Debug, Serialize)]
pub struct MemberDto {
    pub id: String,
    #[serde(flatten)]
    pub info: UserInfo,
}

/// Full per-developer detail
#[derive(Debug, Serialize)]
pub struct DeveloperDetail {
    pub id: String,
    pub user_info: UserInfo,
    pub gitlab: GitLabMetrics,
    pub health_score: i64,
}

/// Telemetry response with the derived wellness and focus scores
#[derive(Debug, Serialize)]
pub struct TelemetryResponse {
    pub telemetry: Telemetry,
    pub health_score: i64,
    /// Newest daily sample's focus score, defaulting to 85 when no
    /// sample exists.
    pub focus_score: f64,
}

/// Recommendations for one developer
#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub user_id: String,
    pub recommendations: Vec<Recommendation>,
}

/// Achievements for one developer
#[derive(Debug, Serialize)]
pub struct AchievementsResponse {
    pub user_id: String,
    #[serde(flatten)]
    pub summary: AchievementSummary,
}

// ============================================
// ANALYZE DTOs
// ============================================

/// Image analysis request
///
/// Both fields are required; they are optional here so the handler
/// can answer missing fields with the documented 400 body instead of
/// a generic deserialization failure.
#[derive(Debug, Deserialize)]
pub struct AnalyzeImageRequest {
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// Active metrics provider name
    pub provider: String,
    /// "ok", "unreachable" or "disabled"
    pub vision: String,
    pub uptime_seconds: u64,
    pub version: String,
}
