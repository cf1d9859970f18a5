//! Health Score
//!
//! Collapses sleep, stress and activity measurements into a single
//! wellness indicator.

use crate::model::HealthData;

/// Hours of sleep that count as a full sleep score.
const SLEEP_TARGET_HOURS: f64 = 8.0;

/// Active minutes that count as a full activity score.
const ACTIVITY_TARGET_MINUTES: f64 = 60.0;

/// Compute a developer's health score.
///
/// Mean of three sub-scores, rounded to the nearest integer:
///
/// - sleep: `sleep_hours / 8 * 100`, capped at 100
/// - stress: `100 - stress_level`
/// - activity: `active_minutes / 60 * 100`, capped at 100
///
/// The stress sub-score is deliberately not clamped at zero: a stress
/// reading above 100 goes negative and drags the mean down. Nominal
/// inputs produce a value in 0-100.
pub fn health_score(health: &HealthData) -> i64 {
    let sleep = (health.sleep_hours / SLEEP_TARGET_HOURS * 100.0).min(100.0);
    let stress = 100.0 - health.stress_level;
    let activity = (f64::from(health.active_minutes) / ACTIVITY_TARGET_MINUTES * 100.0).min(100.0);

    ((sleep + stress + activity) / 3.0).round() as i64
}
