//! Team Roster and Sample Telemetry
//!
//! The built-in roster mirrors a small engineering team: four
//! developers and one manager. Telemetry comes from a sample
//! generator with per-developer baselines until a live device feed
//! exists; repository metrics come from whichever
//! [`MetricsProvider`] the caller wires in.

use crate::gitlab::MetricsProvider;
use crate::model::{
    AppUsage, DailySample, DeveloperRecord, HealthData, HeartRate, Role, TeamRecords, Telemetry,
    UserInfo,
};
use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;
use std::collections::BTreeMap;

/// The team roster, keyed by user id.
#[derive(Debug, Clone)]
pub struct Roster {
    members: BTreeMap<String, UserInfo>,
}

impl Roster {
    /// The built-in team.
    pub fn builtin() -> Self {
        let mut members = BTreeMap::new();

        members.insert(
            "dev1".to_string(),
            member(
                "Alex Thompson",
                Role::Developer,
                "Senior Full-Stack Developer",
                "Platform Team",
                "alex.thompson@company.com",
                (2022, 3, 15),
            ),
        );
        members.insert(
            "dev2".to_string(),
            member(
                "Sarah Chen",
                Role::Developer,
                "Frontend Lead Developer",
                "UI/UX Team",
                "sarah.chen@company.com",
                (2021, 9, 1),
            ),
        );
        members.insert(
            "dev3".to_string(),
            member(
                "Marcus Rodriguez",
                Role::Developer,
                "Backend Developer",
                "API Team",
                "marcus.rodriguez@company.com",
                (2023, 1, 10),
            ),
        );
        members.insert(
            "dev4".to_string(),
            member(
                "Emily Zhang",
                Role::Developer,
                "DevOps Engineer",
                "Infrastructure Team",
                "emily.zhang@company.com",
                (2022, 11, 20),
            ),
        );
        members.insert(
            "admin".to_string(),
            member(
                "David Kim",
                Role::Manager,
                "Engineering Manager",
                "Leadership",
                "david.kim@company.com",
                (2020, 5, 1),
            ),
        );

        Self { members }
    }

    /// Look up one member.
    pub fn member(&self, user_id: &str) -> Option<&UserInfo> {
        self.members.get(user_id)
    }

    /// All members, managers included.
    pub fn members(&self) -> &BTreeMap<String, UserInfo> {
        &self.members
    }

    /// Ids of developers only (managers carry no metrics).
    pub fn developer_ids(&self) -> impl Iterator<Item = &str> {
        self.members
            .iter()
            .filter(|(_, info)| info.role == Role::Developer)
            .map(|(id, _)| id.as_str())
    }

    /// Assemble the full team mapping consumed by the scoring layer:
    /// one [`DeveloperRecord`] per developer, combining roster
    /// identity, provider metrics and telemetry.
    pub async fn team_records(&self, provider: &dyn MetricsProvider) -> TeamRecords {
        let mut records = TeamRecords::new();

        for (id, info) in &self.members {
            if info.role != Role::Developer {
                continue;
            }

            // Provider errors were already degraded to sample data by
            // the GitLab client; anything surfacing here is unexpected.
            let gitlab = match provider.developer_metrics(id).await {
                Ok(metrics) => metrics,
                Err(e) => {
                    tracing::error!(user_id = %id, error = %e, "skipping developer without metrics");
                    continue;
                }
            };

            records.insert(
                id.clone(),
                DeveloperRecord {
                    user_info: info.clone(),
                    gitlab,
                    telemetry: sample_telemetry(id),
                },
            );
        }

        records
    }
}

fn member(
    name: &str,
    role: Role,
    title: &str,
    team: &str,
    email: &str,
    joined: (i32, u32, u32),
) -> UserInfo {
    UserInfo {
        name: name.to_string(),
        role,
        title: title.to_string(),
        team: team.to_string(),
        email: email.to_string(),
        join_date: NaiveDate::from_ymd_opt(joined.0, joined.1, joined.2)
            .expect("valid built-in join date"),
    }
}

/// Per-developer telemetry baselines: (screen time hours, focus score).
fn baselines(user_id: &str) -> (f64, f64) {
    match user_id {
        "dev1" => (9.2, 85.0),
        "dev2" => (8.7, 92.0),
        "dev3" => (10.1, 78.0),
        _ => (8.5, 88.0),
    }
}

/// Generate a week of sample telemetry for one developer.
///
/// Values jitter around the per-developer baseline so repeated calls
/// look like fresh device syncs.
pub fn sample_telemetry(user_id: &str) -> Telemetry {
    let (screen_base, focus_base) = baselines(user_id);
    let mut rng = rand::thread_rng();
    let now = Utc::now();

    let daily_data = (0..7)
        .map(|days_ago| DailySample {
            date: (now - Duration::days(days_ago)).date_naive(),
            screen_time_hours: round1(screen_base + rng.gen_range(-1.5..2.0)),
            focus_score: (focus_base + f64::from(rng.gen_range(-15..=15))).clamp(0.0, 100.0),
            break_count: rng.gen_range(8..=15),
            deep_work_hours: round1(rng.gen_range(3.0..6.5)),
        })
        .collect();

    let app_usage = vec![
        usage("VS Code", rng.gen_range(4.5..7.2), "Development"),
        usage("GitLab", rng.gen_range(1.2..2.8), "Development"),
        usage("Terminal", rng.gen_range(2.0..4.5), "Development"),
        usage("Chrome", rng.gen_range(2.5..4.0), "Research"),
        usage("Slack", rng.gen_range(1.0..2.5), "Communication"),
        usage("Figma", rng.gen_range(0.5..2.0), "Design"),
        usage("Postman", rng.gen_range(0.8..1.5), "Testing"),
        usage("Docker Desktop", rng.gen_range(0.3..1.0), "DevOps"),
    ];

    let health_data = HealthData {
        heart_rate: HeartRate {
            avg: rng.gen_range(65..=85),
            max: rng.gen_range(120..=150),
            min: rng.gen_range(55..=70),
        },
        stress_level: f64::from(rng.gen_range(20..=80)),
        sleep_hours: round1(rng.gen_range(6.5..8.5)),
        sleep_quality: rng.gen_range(70..=95),
        steps: rng.gen_range(4000..=12000),
        calories: rng.gen_range(1800..=2500),
        active_minutes: rng.gen_range(45..=120),
    };

    Telemetry {
        daily_data,
        app_usage,
        health_data,
        last_sync: now,
    }
}

fn usage(app: &str, hours: f64, category: &str) -> AppUsage {
    AppUsage {
        app: app.to_string(),
        hours: round1(hours),
        category: category.to_string(),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gitlab::SampleMetricsProvider;

    #[test]
    fn builtin_roster_has_four_developers_and_a_manager() {
        let roster = Roster::builtin();
        assert_eq!(roster.members().len(), 5);
        assert_eq!(roster.developer_ids().count(), 4);
        assert_eq!(roster.member("admin").unwrap().role, Role::Manager);
        assert!(roster.member("dev9").is_none());
    }

    #[test]
    fn sample_telemetry_stays_in_range() {
        for id in ["dev1", "dev2", "dev3", "dev4"] {
            let telemetry = sample_telemetry(id);
            assert_eq!(telemetry.daily_data.len(), 7);
            for sample in &telemetry.daily_data {
                assert!((0.0..=100.0).contains(&sample.focus_score));
            }
            let health = &telemetry.health_data;
            assert!((20.0..=80.0).contains(&health.stress_level));
            assert!((6.5..=8.5).contains(&health.sleep_hours));
            assert!((45..=120).contains(&health.active_minutes));
        }
    }

    #[tokio::test]
    async fn team_records_cover_every_developer_and_skip_the_manager() {
        let roster = Roster::builtin();
        let records = roster.team_records(&SampleMetricsProvider).await;
        assert_eq!(records.len(), 4);
        assert!(records.contains_key("dev1"));
        assert!(!records.contains_key("admin"));
    }
}
