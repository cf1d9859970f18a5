//! # DevPulse
//!
//! Developer Productivity & Wellness Dashboard - aggregates repository
//! activity and device telemetry into per-developer and team-level
//! views, scores them, and serves everything over a REST API.
//!
//! ## Features
//!
//! - **Wellness scoring**: sleep, stress and activity folded into a
//!   single 0-100 health score per developer
//! - **Team statistics**: averages, totals and performer buckets over
//!   the whole roster
//! - **Insights**: rule-based advisory messages for the dashboard
//! - **Recommendations**: per-developer coaching suggestions
//! - **GitLab integration**: live metrics with graceful fallback to
//!   deterministic sample data
//! - **Image analysis**: thin proxy in front of a vision backend
//!
//! ## Modules
//!
//! - [`scoring`]: Health score, team statistics and insights
//! - [`roster`]: The team roster and sample telemetry
//! - [`gitlab`]: Repository metrics providers
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust
//! use devpulse::gitlab::SampleMetricsProvider;
//! use devpulse::roster::Roster;
//! use devpulse::scoring::{team_insights, team_stats};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let roster = Roster::builtin();
//!     let records = roster.team_records(&SampleMetricsProvider).await;
//!
//!     let stats = team_stats(&records)?;
//!     for insight in team_insights(&stats) {
//!         println!("{}", insight.message);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod achievements;
pub mod api;
pub mod config;
pub mod gitlab;
pub mod model;
pub mod recommendations;
pub mod roster;
pub mod scoring;
pub mod vision;

// Re-export top-level types for convenience
pub use model::{
    DeveloperRecord, GitLabMetrics, HealthData, TeamRecords, Telemetry, UserInfo,
};

pub use scoring::{
    health_score, team_insights, team_stats, Insight, InsightKind, ScoringError, TeamStats,
};

pub use gitlab::{GitLabClient, GitLabClientConfig, GitLabError, MetricsProvider};

pub use recommendations::{recommend, Recommendation, RecommendationKind};

pub use achievements::{achievement_summary, Achievement, AchievementSummary};

pub use roster::{sample_telemetry, Roster};

pub use vision::{VisionClient, VisionConfig, VisionError};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError};
