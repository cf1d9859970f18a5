//! Core Data Model
//!
//! Typed representation of the records the scoring layer consumes.
//! A [`DeveloperRecord`] combines identity ([`UserInfo`]), repository
//! activity ([`GitLabMetrics`]) and device telemetry ([`Telemetry`]).
//!
//! These are read-only inputs: nothing here is mutated after assembly,
//! and all derived values (team statistics, health scores, insights)
//! are recomputed on demand by the [`crate::scoring`] module.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Focus score assumed when no daily telemetry sample exists.
///
/// The dashboard treats a missing first sample as "about average"
/// rather than failing the render.
pub const DEFAULT_FOCUS_SCORE: f64 = 85.0;

/// One developer's full dashboard record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeveloperRecord {
    pub user_info: UserInfo,
    pub gitlab: GitLabMetrics,
    pub telemetry: Telemetry,
}

/// A team keyed by developer id (e.g. "dev1").
///
/// BTreeMap keeps listing order stable across runs.
pub type TeamRecords = BTreeMap<String, DeveloperRecord>;

/// Identity and organizational info for a person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub role: Role,
    pub title: String,
    pub team: String,
    pub email: String,
    pub join_date: NaiveDate,
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Developer,
    Manager,
}

/// Repository-activity metrics for one developer.
///
/// Scores are 0-10 floats; rates are 0-1 floats; counts are
/// non-negative integers. Produced either by the live GitLab client
/// or by the sample provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitLabMetrics {
    pub commits_this_week: u32,
    pub merge_requests_open: u32,
    pub merge_requests_merged: u32,
    pub issues_assigned: u32,
    pub issues_closed: u32,
    /// Coding-activity throughput, 0-10.
    pub productivity_score: f64,
    /// Review/issue engagement, 0-10.
    pub collaboration_score: f64,
    /// Fraction of CI pipelines that succeeded, 0-1.
    pub pipeline_success_rate: f64,
    /// Contributions per day for the last 7 days, index 0 = today.
    pub weekly_contribution_trend: Vec<u32>,
    /// Language name -> percentage of code, normalized to sum to 100.
    pub language_breakdown: BTreeMap<String, u32>,
    pub lines_of_code: u64,
    pub avg_merge_time_hours: f64,
    /// Fraction of assigned merge requests this developer reviewed, 0-1.
    pub code_review_participation: f64,
    pub recent_activity: Vec<Activity>,
}

/// One recent-activity feed entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Commit,
    MergeRequest,
    Issue,
}

/// Device telemetry for one developer: desktop usage plus smartwatch
/// health data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Telemetry {
    /// Daily samples, newest first. May be empty.
    pub daily_data: Vec<DailySample>,
    pub app_usage: Vec<AppUsage>,
    pub health_data: HealthData,
    pub last_sync: DateTime<Utc>,
}

impl Telemetry {
    /// Focus score from the newest daily sample, or
    /// [`DEFAULT_FOCUS_SCORE`] when no sample exists.
    pub fn latest_focus_score(&self) -> f64 {
        self.daily_data
            .first()
            .map(|sample| sample.focus_score)
            .unwrap_or(DEFAULT_FOCUS_SCORE)
    }
}

/// One day of desktop telemetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySample {
    pub date: NaiveDate,
    pub screen_time_hours: f64,
    /// 0-100.
    pub focus_score: f64,
    pub break_count: u32,
    pub deep_work_hours: f64,
}

/// Time spent in one desktop application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppUsage {
    pub app: String,
    pub hours: f64,
    pub category: String,
}

/// Smartwatch health measurements.
///
/// `stress_level` is nominally 0-100 but is carried as reported:
/// out-of-range readings flow into the health score unclamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthData {
    pub heart_rate: HeartRate,
    pub stress_level: f64,
    pub sleep_hours: f64,
    /// 0-100.
    pub sleep_quality: u32,
    pub steps: u32,
    pub calories: u32,
    pub active_minutes: u32,
}

/// Heart-rate summary over the reporting window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartRate {
    pub avg: u32,
    pub max: u32,
    pub min: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn telemetry_with_samples(samples: Vec<DailySample>) -> Telemetry {
        Telemetry {
            daily_data: samples,
            app_usage: Vec::new(),
            health_data: HealthData {
                heart_rate: HeartRate {
                    avg: 70,
                    max: 130,
                    min: 60,
                },
                stress_level: 30.0,
                sleep_hours: 7.5,
                sleep_quality: 85,
                steps: 8000,
                calories: 2100,
                active_minutes: 60,
            },
            last_sync: Utc::now(),
        }
    }

    #[test]
    fn focus_score_defaults_when_no_samples() {
        let telemetry = telemetry_with_samples(Vec::new());
        assert_eq!(telemetry.latest_focus_score(), DEFAULT_FOCUS_SCORE);
    }

    #[test]
    fn focus_score_reads_newest_sample() {
        let telemetry = telemetry_with_samples(vec![DailySample {
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            screen_time_hours: 8.0,
            focus_score: 91.0,
            break_count: 10,
            deep_work_hours: 4.5,
        }]);
        assert_eq!(telemetry.latest_focus_score(), 91.0);
    }

    #[test]
    fn developer_record_round_trips_through_json() {
        let record = DeveloperRecord {
            user_info: UserInfo {
                name: "Alex Thompson".to_string(),
                role: Role::Developer,
                title: "Senior Full-Stack Developer".to_string(),
                team: "Platform Team".to_string(),
                email: "alex.thompson@company.com".to_string(),
                join_date: NaiveDate::from_ymd_opt(2022, 3, 15).unwrap(),
            },
            gitlab: GitLabMetrics {
                commits_this_week: 15,
                merge_requests_open: 2,
                merge_requests_merged: 8,
                issues_assigned: 5,
                issues_closed: 12,
                productivity_score: 7.5,
                collaboration_score: 6.0,
                pipeline_success_rate: 0.85,
                weekly_contribution_trend: vec![5, 8, 12, 7, 9, 11, 6],
                language_breakdown: BTreeMap::from([("Rust".to_string(), 100)]),
                lines_of_code: 15000,
                avg_merge_time_hours: 24.0,
                code_review_participation: 0.75,
                recent_activity: Vec::new(),
            },
            telemetry: telemetry_with_samples(Vec::new()),
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: DeveloperRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.user_info.name, "Alex Thompson");
        assert_eq!(back.gitlab.commits_this_week, 15);
        assert_eq!(back.user_info.role, Role::Developer);
    }
}
