//! Team Statistics
//!
//! Aggregates a set of [`DeveloperRecord`]s into one [`TeamStats`]
//! summary. Recomputed on every call; nothing is cached or persisted.
//!
//! [`DeveloperRecord`]: crate::model::DeveloperRecord

use crate::model::TeamRecords;
use crate::scoring::health::health_score;
use serde::Serialize;
use thiserror::Error;

/// Productivity at or above this marks a high performer (with health).
pub const HIGH_PERFORMER_PRODUCTIVITY: f64 = 8.0;
/// Health score at or above this marks a high performer (with productivity).
pub const HIGH_PERFORMER_HEALTH: i64 = 80;
/// Productivity below this flags a developer as needing support.
pub const NEEDS_SUPPORT_PRODUCTIVITY: f64 = 6.0;
/// Health score below this flags a developer as needing support.
pub const NEEDS_SUPPORT_HEALTH: i64 = 60;

/// Aggregated statistics for one team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStats {
    pub total_developers: usize,
    /// Mean productivity score, rounded to one decimal.
    pub average_productivity: f64,
    /// Mean collaboration score, rounded to one decimal.
    pub average_collaboration: f64,
    /// Mean health score, rounded to the nearest integer.
    pub average_health: i64,
    pub total_commits: u64,
    pub total_merge_requests: u64,
    /// Developers with productivity >= 8.0 and health >= 80.
    pub high_performers: usize,
    /// Developers with productivity < 6.0 or health < 60.
    ///
    /// Mutually exclusive with `high_performers`: the high-performer
    /// check is evaluated first and wins.
    pub needs_support: usize,
}

/// Errors from statistics aggregation.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// Averages are undefined for zero developers; the caller must
    /// supply at least one record.
    #[error("cannot aggregate an empty team")]
    EmptyTeam,
}

/// Aggregate team statistics over a non-empty set of records.
///
/// Returns [`ScoringError::EmptyTeam`] for an empty mapping rather
/// than producing NaN averages.
pub fn team_stats(team: &TeamRecords) -> Result<TeamStats, ScoringError> {
    if team.is_empty() {
        return Err(ScoringError::EmptyTeam);
    }

    let count = team.len();
    let mut productivity_sum = 0.0;
    let mut collaboration_sum = 0.0;
    let mut health_sum: i64 = 0;
    let mut total_commits: u64 = 0;
    let mut total_merge_requests: u64 = 0;
    let mut high_performers = 0;
    let mut needs_support = 0;

    for record in team.values() {
        let gitlab = &record.gitlab;
        productivity_sum += gitlab.productivity_score;
        collaboration_sum += gitlab.collaboration_score;
        total_commits += u64::from(gitlab.commits_this_week);
        total_merge_requests += u64::from(gitlab.merge_requests_merged);

        let health = health_score(&record.telemetry.health_data);
        health_sum += health;

        if gitlab.productivity_score >= HIGH_PERFORMER_PRODUCTIVITY
            && health >= HIGH_PERFORMER_HEALTH
        {
            high_performers += 1;
        } else if gitlab.productivity_score < NEEDS_SUPPORT_PRODUCTIVITY
            || health < NEEDS_SUPPORT_HEALTH
        {
            needs_support += 1;
        }
    }

    Ok(TeamStats {
        total_developers: count,
        average_productivity: round_to_tenth(productivity_sum / count as f64),
        average_collaboration: round_to_tenth(collaboration_sum / count as f64),
        average_health: (health_sum as f64 / count as f64).round() as i64,
        total_commits,
        total_merge_requests,
        high_performers,
        needs_support,
    })
}

/// Round half-up to one decimal place.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        DeveloperRecord, GitLabMetrics, HealthData, HeartRate, Role, Telemetry, UserInfo,
    };
    use chrono::{NaiveDate, Utc};
    use std::collections::BTreeMap;

    fn record(
        name: &str,
        productivity: f64,
        commits: u32,
        sleep: f64,
        stress: f64,
    ) -> DeveloperRecord {
        DeveloperRecord {
            user_info: UserInfo {
                name: name.to_string(),
                role: Role::Developer,
                title: "Developer".to_string(),
                team: "Platform Team".to_string(),
                email: format!("{}@company.com", name),
                join_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            },
            gitlab: GitLabMetrics {
                commits_this_week: commits,
                merge_requests_open: 1,
                merge_requests_merged: 4,
                issues_assigned: 3,
                issues_closed: 6,
                productivity_score: productivity,
                collaboration_score: 6.5,
                pipeline_success_rate: 0.9,
                weekly_contribution_trend: vec![0; 7],
                language_breakdown: BTreeMap::new(),
                lines_of_code: 1000,
                avg_merge_time_hours: 12.0,
                code_review_participation: 0.7,
                recent_activity: Vec::new(),
            },
            telemetry: Telemetry {
                daily_data: Vec::new(),
                app_usage: Vec::new(),
                health_data: HealthData {
                    heart_rate: HeartRate {
                        avg: 70,
                        max: 135,
                        min: 58,
                    },
                    stress_level: stress,
                    sleep_hours: sleep,
                    sleep_quality: 85,
                    steps: 8000,
                    calories: 2100,
                    active_minutes: 60,
                },
                last_sync: Utc::now(),
            },
        }
    }

    fn team_of(records: Vec<(&str, DeveloperRecord)>) -> TeamRecords {
        records
            .into_iter()
            .map(|(id, r)| (id.to_string(), r))
            .collect()
    }

    #[test]
    fn empty_team_is_rejected() {
        let team = TeamRecords::new();
        assert!(matches!(team_stats(&team), Err(ScoringError::EmptyTeam)));
    }

    #[test]
    fn average_productivity_is_mean_to_one_decimal() {
        // (7.0 + 8.5 + 6.2) / 3 = 7.2333... -> 7.2
        let team = team_of(vec![
            ("dev1", record("a", 7.0, 10, 8.0, 20.0)),
            ("dev2", record("b", 8.5, 10, 8.0, 20.0)),
            ("dev3", record("c", 6.2, 10, 8.0, 20.0)),
        ]);
        let stats = team_stats(&team).unwrap();
        assert_eq!(stats.average_productivity, 7.2);
        assert_eq!(stats.total_developers, 3);
    }

    #[test]
    fn one_decimal_rounding_is_half_up() {
        // (7.0 + 7.5) / 2 = 7.25 -> 7.3
        let team = team_of(vec![
            ("dev1", record("a", 7.0, 0, 8.0, 20.0)),
            ("dev2", record("b", 7.5, 0, 8.0, 20.0)),
        ]);
        let stats = team_stats(&team).unwrap();
        assert_eq!(stats.average_productivity, 7.3);
    }

    #[test]
    fn totals_sum_commits_and_merge_requests() {
        let team = team_of(vec![
            ("dev1", record("a", 7.0, 12, 8.0, 20.0)),
            ("dev2", record("b", 7.0, 9, 8.0, 20.0)),
        ]);
        let stats = team_stats(&team).unwrap();
        assert_eq!(stats.total_commits, 21);
        // 4 merged MRs each in the fixture
        assert_eq!(stats.total_merge_requests, 8);
    }

    #[test]
    fn high_performer_needs_both_productivity_and_health() {
        // sleep 8h, stress 20, 60 active minutes -> health 93
        let team = team_of(vec![("dev1", record("a", 8.5, 10, 8.0, 20.0))]);
        let stats = team_stats(&team).unwrap();
        assert_eq!(stats.high_performers, 1);
        assert_eq!(stats.needs_support, 0);

        // Same productivity but wrecked health (health = (25+5+100)/3 = 43)
        let team = team_of(vec![("dev1", record("a", 8.5, 10, 2.0, 95.0))]);
        let stats = team_stats(&team).unwrap();
        assert_eq!(stats.high_performers, 0);
        assert_eq!(stats.needs_support, 1);
    }

    #[test]
    fn low_productivity_needs_support_regardless_of_health() {
        let team = team_of(vec![("dev1", record("a", 5.0, 10, 8.0, 0.0))]);
        let stats = team_stats(&team).unwrap();
        assert_eq!(stats.needs_support, 1);
        assert_eq!(stats.high_performers, 0);
    }

    #[test]
    fn buckets_are_mutually_exclusive() {
        let team = team_of(vec![
            ("dev1", record("a", 8.5, 10, 2.0, 95.0)),
            ("dev2", record("b", 8.0, 10, 8.0, 20.0)),
        ]);
        let stats = team_stats(&team).unwrap();
        assert_eq!(stats.high_performers + stats.needs_support, 2);
        assert_eq!(stats.high_performers, 1);
        assert_eq!(stats.needs_support, 1);
    }

    #[test]
    fn average_health_rounds_the_mean_of_rounded_scores() {
        // dev1 health: (100+80+100)/3 = 93.33 -> 93
        // dev2 health: (75+50+100)/3 = 75
        // mean: 84 exactly
        let team = team_of(vec![
            ("dev1", record("a", 7.0, 0, 8.0, 20.0)),
            ("dev2", record("b", 7.0, 0, 6.0, 50.0)),
        ]);
        let stats = team_stats(&team).unwrap();
        assert_eq!(stats.average_health, 84);
    }
}
