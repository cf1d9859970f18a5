//! Scoring Core
//!
//! Pure data transformations over [`crate::model`] records. Nothing in
//! this module touches the network, the clock, or shared state; every
//! function is deterministic over its inputs so the HTTP layer stays a
//! thin adapter.
//!
//! - [`health`]: per-developer wellness score (0-100)
//! - [`team`]: team-wide statistics aggregation
//! - [`insights`]: advisory messages derived from team statistics

pub mod health;
pub mod insights;
pub mod team;

pub use health::health_score;
pub use insights::{team_insights, Insight, InsightKind};
pub use team::{team_stats, ScoringError, TeamStats};
