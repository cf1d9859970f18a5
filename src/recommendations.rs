//! Per-Developer Recommendations
//!
//! Rule-based coaching suggestions derived from one developer's
//! repository metrics. Threshold rules run in a fixed order; a single
//! wellness tip is appended so the list never reads as purely
//! critical. At most four recommendations are returned.

use crate::model::GitLabMetrics;
use rand::Rng;
use serde::Serialize;

/// Maximum recommendations returned per developer.
const MAX_RECOMMENDATIONS: usize = 4;

/// What aspect of work a recommendation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Productivity,
    Collaboration,
    Quality,
    Workflow,
    Wellness,
}

/// How urgently a recommendation should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One actionable suggestion for a developer.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub action: String,
}

impl Recommendation {
    fn new(
        kind: RecommendationKind,
        priority: Priority,
        title: &str,
        description: &str,
        action: &str,
    ) -> Self {
        Self {
            kind,
            priority,
            title: title.to_string(),
            description: description.to_string(),
            action: action.to_string(),
        }
    }
}

/// Build recommendations for one developer.
///
/// Threshold rules plus one randomly chosen wellness tip, capped at
/// four entries (threshold rules take precedence over the tip).
pub fn recommend(metrics: &GitLabMetrics) -> Vec<Recommendation> {
    let mut recommendations = threshold_recommendations(metrics);

    let tips = wellness_tips();
    let pick = rand::thread_rng().gen_range(0..tips.len());
    recommendations.push(tips.into_iter().nth(pick).expect("non-empty tip list"));

    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

/// Deterministic threshold rules, evaluated in a fixed order.
pub fn threshold_recommendations(metrics: &GitLabMetrics) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if metrics.productivity_score < 7.0 {
        recommendations.push(Recommendation::new(
            RecommendationKind::Productivity,
            Priority::High,
            "Boost Your Productivity",
            "Your productivity score is below average. Consider breaking down large tasks \
             into smaller chunks and using time-blocking techniques.",
            "Try the Pomodoro Technique for better focus",
        ));
    }

    if metrics.collaboration_score < 7.5 {
        recommendations.push(Recommendation::new(
            RecommendationKind::Collaboration,
            Priority::Medium,
            "Enhance Team Collaboration",
            "Increase your code review participation and engage more in team discussions.",
            "Review 2-3 more merge requests this week",
        ));
    }

    if metrics.pipeline_success_rate < 0.85 {
        recommendations.push(Recommendation::new(
            RecommendationKind::Quality,
            Priority::High,
            "Improve Code Quality",
            "Your pipeline success rate could be improved with better testing practices.",
            "Add more unit tests before committing",
        ));
    }

    if metrics.commits_this_week > 40 {
        recommendations.push(Recommendation::new(
            RecommendationKind::Workflow,
            Priority::Low,
            "Consider Larger Commits",
            "You have many small commits. Consider grouping related changes together.",
            "Use feature branches for related changes",
        ));
    }

    recommendations
}

fn wellness_tips() -> Vec<Recommendation> {
    vec![
        Recommendation::new(
            RecommendationKind::Wellness,
            Priority::Medium,
            "Take Regular Breaks",
            "Regular breaks improve focus and prevent burnout. Try the 20-20-20 rule.",
            "Set a break reminder every 90 minutes",
        ),
        Recommendation::new(
            RecommendationKind::Wellness,
            Priority::Low,
            "Stay Hydrated",
            "Proper hydration improves cognitive function and energy levels.",
            "Keep a water bottle at your desk",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn metrics(
        productivity: f64,
        collaboration: f64,
        pipeline_rate: f64,
        commits: u32,
    ) -> GitLabMetrics {
        GitLabMetrics {
            commits_this_week: commits,
            merge_requests_open: 2,
            merge_requests_merged: 5,
            issues_assigned: 4,
            issues_closed: 7,
            productivity_score: productivity,
            collaboration_score: collaboration,
            pipeline_success_rate: pipeline_rate,
            weekly_contribution_trend: vec![0; 7],
            language_breakdown: BTreeMap::new(),
            lines_of_code: 2000,
            avg_merge_time_hours: 18.0,
            code_review_participation: 0.8,
            recent_activity: Vec::new(),
        }
    }

    #[test]
    fn healthy_metrics_trigger_no_threshold_rules() {
        let recs = threshold_recommendations(&metrics(8.0, 8.0, 0.95, 20));
        assert!(recs.is_empty());
    }

    #[test]
    fn each_threshold_rule_fires_independently() {
        let recs = threshold_recommendations(&metrics(6.5, 8.0, 0.95, 20));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, RecommendationKind::Productivity);

        let recs = threshold_recommendations(&metrics(8.0, 7.0, 0.95, 20));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, RecommendationKind::Collaboration);

        let recs = threshold_recommendations(&metrics(8.0, 8.0, 0.80, 20));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, RecommendationKind::Quality);

        let recs = threshold_recommendations(&metrics(8.0, 8.0, 0.95, 45));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, RecommendationKind::Workflow);
    }

    #[test]
    fn rules_keep_a_fixed_order() {
        let recs = threshold_recommendations(&metrics(5.0, 5.0, 0.5, 50));
        let kinds: Vec<RecommendationKind> = recs.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RecommendationKind::Productivity,
                RecommendationKind::Collaboration,
                RecommendationKind::Quality,
                RecommendationKind::Workflow,
            ]
        );
    }

    #[test]
    fn recommend_appends_a_wellness_tip_and_caps_at_four() {
        // All four threshold rules fire, so the wellness tip is cut.
        let recs = recommend(&metrics(5.0, 5.0, 0.5, 50));
        assert_eq!(recs.len(), 4);
        assert!(recs.iter().all(|r| r.kind != RecommendationKind::Wellness));

        // With no threshold rules firing, only the tip remains.
        let recs = recommend(&metrics(8.0, 8.0, 0.95, 20));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, RecommendationKind::Wellness);
    }
}
