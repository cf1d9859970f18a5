//! Developer Achievements
//!
//! Gamification layer: a fixed catalog of achievements with points,
//! rolled per request into an earned set, a points total and a level.
//! Like the sample telemetry, values are randomized per call until a
//! real progress store exists.

use rand::Rng;
use serde::Serialize;

/// Points per level; level 10 is the cap.
const POINTS_PER_LEVEL: u32 = 500;
const MAX_LEVEL: u32 = 10;

/// Whether an achievement in the catalog is earned.
enum Earned {
    Always,
    Random,
    Never,
}

/// One achievement entry.
#[derive(Debug, Clone, Serialize)]
pub struct Achievement {
    pub name: String,
    pub description: String,
    pub points: u32,
    pub earned: bool,
}

/// A developer's achievement roll-up.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementSummary {
    pub achievements: Vec<Achievement>,
    /// Sum of points over earned achievements.
    pub total_points: u32,
    /// `total_points / 500 + 1`, capped at 10.
    pub level: u32,
    pub next_level_points: u32,
    pub weekly_points: u32,
}

/// The full achievement catalog: (name, description, points, earned).
fn catalog() -> Vec<(&'static str, &'static str, u32, Earned)> {
    vec![
        ("Code Warrior", "100+ commits this month", 500, Earned::Always),
        ("Review Master", "Reviewed 50+ merge requests", 300, Earned::Always),
        ("Bug Hunter", "Closed 25+ issues", 400, Earned::Always),
        ("Team Player", "High collaboration score", 200, Earned::Always),
        ("Pipeline Pro", "95%+ pipeline success rate", 350, Earned::Random),
        ("Speed Demon", "Fast merge times", 250, Earned::Random),
        ("Documentation Hero", "Excellent documentation", 150, Earned::Random),
        ("Quality Guardian", "Zero critical bugs", 600, Earned::Never),
    ]
}

/// Roll one developer's achievements.
///
/// Earned achievements always appear; unearned ones appear with 70%
/// probability so the list varies between rolls.
pub fn achievement_summary() -> AchievementSummary {
    let mut rng = rand::thread_rng();

    let mut achievements = Vec::new();
    for (name, description, points, earned) in catalog() {
        let earned = match earned {
            Earned::Always => true,
            Earned::Random => rng.gen_bool(0.5),
            Earned::Never => false,
        };

        if earned || rng.gen_bool(0.7) {
            achievements.push(Achievement {
                name: name.to_string(),
                description: description.to_string(),
                points,
                earned,
            });
        }
    }

    let total_points: u32 = achievements
        .iter()
        .filter(|a| a.earned)
        .map(|a| a.points)
        .sum();
    let level = (total_points / POINTS_PER_LEVEL + 1).min(MAX_LEVEL);
    let next_level_points = if level < MAX_LEVEL {
        level * POINTS_PER_LEVEL
    } else {
        MAX_LEVEL * POINTS_PER_LEVEL
    };

    AchievementSummary {
        achievements,
        total_points,
        level,
        next_level_points,
        weekly_points: rng.gen_range(50..=200),
    }
}
