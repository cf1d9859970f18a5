//! Team Insights
//!
//! Advisory messages derived from [`TeamStats`]. Rules are evaluated
//! in a fixed order so the produced list is identical across runs for
//! the same statistics.

use crate::scoring::team::TeamStats;
use serde::Serialize;

/// Severity of an insight message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Success,
    Warning,
    Info,
}

/// One advisory message for the team dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub message: String,
}

impl Insight {
    fn new(kind: InsightKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Generate insights for a team.
///
/// Rule order, fixed:
/// 1. average productivity >= 8.0 (inclusive) -> success; else if
///    below 6.0 -> warning
/// 2. any developer needing support -> info
/// 3. high performers outnumber half the team -> success
pub fn team_insights(stats: &TeamStats) -> Vec<Insight> {
    let mut insights = Vec::new();

    if stats.average_productivity >= 8.0 {
        insights.push(Insight::new(
            InsightKind::Success,
            format!(
                "Team productivity is excellent! Average score: {:.1}",
                stats.average_productivity
            ),
        ));
    } else if stats.average_productivity < 6.0 {
        insights.push(Insight::new(
            InsightKind::Warning,
            "Team productivity needs attention. Consider workload review.",
        ));
    }

    if stats.needs_support > 0 {
        insights.push(Insight::new(
            InsightKind::Info,
            format!(
                "{} developer(s) may need additional support or reduced workload.",
                stats.needs_support
            ),
        ));
    }

    if stats.high_performers as f64 > stats.total_developers as f64 / 2.0 {
        insights.push(Insight::new(
            InsightKind::Success,
            "More than half the team are high performers! Great job!",
        ));
    }

    insights
}
