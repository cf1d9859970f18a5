//! GitLab REST API Client
//!
//! Fetches a developer's activity (push events, merge requests,
//! issues, pipelines) over the last 90 days and derives the dashboard
//! metrics from it. Any failure degrades to [`sample_metrics`] with a
//! warning instead of failing the caller.

use super::sample::sample_metrics;
use super::{GitLabError, MetricsProvider};
use crate::model::{Activity, ActivityKind, GitLabMetrics};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Days of history fetched per developer.
const HISTORY_DAYS: i64 = 90;

/// Items per page on paginated endpoints.
const PAGE_SIZE: u32 = 100;

/// Assumed lines of code contributed per commit.
const LINES_PER_COMMIT: u64 = 75;

/// Pipeline success rate assumed when no pipeline data exists.
const DEFAULT_PIPELINE_RATE: f64 = 0.85;

/// Configuration for the GitLab client.
#[derive(Debug, Clone)]
pub struct GitLabClientConfig {
    /// API base URL, e.g. "https://gitlab.com/api/v4".
    pub base_url: String,
    /// Personal access token sent as PRIVATE-TOKEN.
    pub token: String,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for GitLabClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://gitlab.com/api/v4".to_string(),
            token: String::new(),
            request_timeout_ms: 10_000,
        }
    }
}

/// Live GitLab metrics provider.
pub struct GitLabClient {
    client: Client,
    config: GitLabClientConfig,
}

#[async_trait]
impl MetricsProvider for GitLabClient {
    fn name(&self) -> &str {
        "gitlab"
    }

    /// Fetch live metrics, degrading to sample data on any failure.
    async fn developer_metrics(&self, username: &str) -> Result<GitLabMetrics, GitLabError> {
        match self.live_metrics(username).await {
            Ok(metrics) => Ok(metrics),
            Err(e) => {
                tracing::warn!(
                    username = %username,
                    error = %e,
                    "GitLab metrics unavailable, serving sample data"
                );
                Ok(sample_metrics(username))
            }
        }
    }
}

impl GitLabClient {
    /// Create a new client.
    pub fn new(config: GitLabClientConfig) -> Result<Self, GitLabError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch and derive metrics for one developer.
    pub async fn live_metrics(&self, username: &str) -> Result<GitLabMetrics, GitLabError> {
        let user_id = self.lookup_user(username).await?;

        let end = Utc::now();
        let start = end - Duration::days(HISTORY_DAYS);
        let window = (start.to_rfc3339(), end.to_rfc3339());

        let events: Vec<PushEvent> = self
            .fetch_paged(
                &format!("users/{}/events", user_id),
                &[
                    ("action", "pushed".to_string()),
                    ("after", window.0.clone()),
                    ("before", window.1.clone()),
                ],
            )
            .await?;

        let merge_requests: Vec<MergeRequestItem> = self
            .fetch_paged(
                "merge_requests",
                &[
                    ("author_id", user_id.to_string()),
                    ("created_after", window.0.clone()),
                    ("created_before", window.1.clone()),
                ],
            )
            .await?;

        let issues: Vec<IssueItem> = self
            .fetch_paged(
                "issues",
                &[
                    ("assignee_id", user_id.to_string()),
                    ("created_after", window.0),
                    ("created_before", window.1),
                ],
            )
            .await?;

        let pipelines: Vec<PipelineItem> = self
            .fetch_paged(&format!("users/{}/pipelines", user_id), &[])
            .await
            .unwrap_or_default();

        let commit_times: Vec<DateTime<Utc>> = events.iter().map(|e| e.created_at).collect();
        let mr_times: Vec<DateTime<Utc>> = merge_requests.iter().map(|m| m.created_at).collect();
        let issue_times: Vec<DateTime<Utc>> = issues.iter().map(|i| i.created_at).collect();

        let commits_this_week = commit_times
            .iter()
            .filter(|t| end.signed_duration_since(**t) <= Duration::days(7))
            .count() as u32;

        let merged: Vec<&MergeRequestItem> = merge_requests
            .iter()
            .filter(|m| m.state == "merged")
            .collect();

        Ok(GitLabMetrics {
            commits_this_week,
            merge_requests_open: merge_requests.iter().filter(|m| m.state == "opened").count()
                as u32,
            merge_requests_merged: merged.len() as u32,
            issues_assigned: issues.iter().filter(|i| i.state == "opened").count() as u32,
            issues_closed: issues.iter().filter(|i| i.state == "closed").count() as u32,
            productivity_score: productivity_score(
                events.len(),
                merge_requests.len(),
                issues.len(),
            ),
            collaboration_score: collaboration_score(merge_requests.len(), issues.len()),
            pipeline_success_rate: pipeline_success_rate(&pipelines),
            weekly_contribution_trend: weekly_trend(end, &commit_times, &mr_times, &issue_times),
            language_breakdown: self.language_breakdown(user_id).await.unwrap_or_default(),
            lines_of_code: events.len() as u64 * LINES_PER_COMMIT,
            avg_merge_time_hours: avg_merge_time_hours(&merged),
            code_review_participation: 0.75,
            recent_activity: recent_activity(&events, &merge_requests, &issues),
        })
    }

    /// Resolve a username to a GitLab user id.
    async fn lookup_user(&self, username: &str) -> Result<u64, GitLabError> {
        let url = format!("{}/users", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .header("PRIVATE-TOKEN", &self.config.token)
            .query(&[("username", username)])
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(GitLabError::Api(response.status().as_u16()));
        }

        let users: Vec<UserRef> = response.json().await?;
        users
            .first()
            .map(|u| u.id)
            .ok_or_else(|| GitLabError::UserNotFound(username.to_string()))
    }

    /// Fetch every page of a paginated endpoint.
    ///
    /// Stops at the first empty page or non-success status, matching
    /// the dashboard's degrade-not-fail posture for partial data.
    async fn fetch_paged<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, GitLabError> {
        let url = format!("{}/{}", self.config.base_url, path);
        let mut items = Vec::new();
        let mut page: u32 = 1;

        loop {
            let response = self
                .client
                .get(&url)
                .header("PRIVATE-TOKEN", &self.config.token)
                .query(params)
                .query(&[("per_page", PAGE_SIZE), ("page", page)])
                .send()
                .await
                .map_err(map_transport_error)?;

            if !response.status().is_success() {
                break;
            }

            let batch: Vec<T> = response.json().await?;
            if batch.is_empty() {
                break;
            }

            items.extend(batch);
            page += 1;
        }

        Ok(items)
    }

    /// Language percentages across the user's most recent projects.
    async fn language_breakdown(&self, user_id: u64) -> Result<BTreeMap<String, u32>, GitLabError> {
        let projects: Vec<ProjectRef> = self
            .fetch_paged(&format!("users/{}/projects", user_id), &[])
            .await?;

        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for project in projects.iter().take(5) {
            let url = format!("{}/projects/{}/languages", self.config.base_url, project.id);
            let response = self
                .client
                .get(&url)
                .header("PRIVATE-TOKEN", &self.config.token)
                .send()
                .await
                .map_err(map_transport_error)?;

            if !response.status().is_success() {
                continue;
            }

            let languages: BTreeMap<String, f64> = response.json().await?;
            for (language, percentage) in languages {
                *totals.entry(language).or_insert(0.0) += percentage;
            }
        }

        Ok(normalize_languages(&totals))
    }
}

fn map_transport_error(e: reqwest::Error) -> GitLabError {
    if e.is_timeout() {
        GitLabError::Timeout
    } else if e.is_connect() {
        GitLabError::Unavailable
    } else {
        GitLabError::Request(e)
    }
}

/// Productivity: commits weigh 0.5 (cap 5), MRs 0.3 (cap 3), issues
/// 0.2 (cap 2); total capped at 10.
fn productivity_score(commits: usize, merge_requests: usize, issues: usize) -> f64 {
    let commit_score = (commits as f64 * 0.5).min(5.0);
    let mr_score = (merge_requests as f64 * 0.3).min(3.0);
    let issue_score = (issues as f64 * 0.2).min(2.0);
    (commit_score + mr_score + issue_score).min(10.0)
}

/// Collaboration: MRs weigh 0.6 (cap 6), issues 0.4 (cap 4); capped at 10.
fn collaboration_score(merge_requests: usize, issues: usize) -> f64 {
    let mr_score = (merge_requests as f64 * 0.6).min(6.0);
    let issue_score = (issues as f64 * 0.4).min(4.0);
    (mr_score + issue_score).min(10.0)
}

fn pipeline_success_rate(pipelines: &[PipelineItem]) -> f64 {
    if pipelines.is_empty() {
        return DEFAULT_PIPELINE_RATE;
    }
    let successful = pipelines.iter().filter(|p| p.status == "success").count();
    successful as f64 / pipelines.len() as f64
}

/// Contributions per day over the last week, index 0 = today.
///
/// Commits and issues count 1, merge requests count 2.
fn weekly_trend(
    now: DateTime<Utc>,
    commits: &[DateTime<Utc>],
    merge_requests: &[DateTime<Utc>],
    issues: &[DateTime<Utc>],
) -> Vec<u32> {
    let mut trend = vec![0u32; 7];

    let mut bucket = |times: &[DateTime<Utc>], weight: u32| {
        for time in times {
            let days_ago = now.signed_duration_since(*time).num_days();
            if (0..7).contains(&days_ago) {
                trend[days_ago as usize] += weight;
            }
        }
    };

    bucket(commits, 1);
    bucket(merge_requests, 2);
    bucket(issues, 1);

    trend
}

fn avg_merge_time_hours(merged: &[&MergeRequestItem]) -> f64 {
    let durations: Vec<f64> = merged
        .iter()
        .filter_map(|m| {
            m.merged_at
                .map(|at| at.signed_duration_since(m.created_at).num_seconds() as f64 / 3600.0)
        })
        .collect();

    if durations.is_empty() {
        return 24.0;
    }

    let mean = durations.iter().sum::<f64>() / durations.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// Newest five activity entries across commits, MRs and issues.
fn recent_activity(
    events: &[PushEvent],
    merge_requests: &[MergeRequestItem],
    issues: &[IssueItem],
) -> Vec<Activity> {
    let mut activity: Vec<Activity> = Vec::new();

    for event in events.iter().take(3) {
        activity.push(Activity {
            kind: ActivityKind::Commit,
            action: format!("Committed: {}", event.title.as_deref().unwrap_or("push")),
            timestamp: event.created_at,
        });
    }

    for mr in merge_requests.iter().take(2) {
        activity.push(Activity {
            kind: ActivityKind::MergeRequest,
            action: format!("Merge Request: {}", mr.title.as_deref().unwrap_or("untitled")),
            timestamp: mr.created_at,
        });
    }

    for issue in issues.iter().take(2) {
        activity.push(Activity {
            kind: ActivityKind::Issue,
            action: format!("Issue: {}", issue.title.as_deref().unwrap_or("untitled")),
            timestamp: issue.created_at,
        });
    }

    activity.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    activity.truncate(5);
    activity
}

fn normalize_languages(totals: &BTreeMap<String, f64>) -> BTreeMap<String, u32> {
    let sum: f64 = totals.values().sum();
    if sum <= 0.0 {
        return BTreeMap::new();
    }
    totals
        .iter()
        .map(|(language, value)| (language.clone(), (value / sum * 100.0) as u32))
        .collect()
}

// Wire types: only the fields the metrics derivation reads.

#[derive(Debug, Deserialize)]
struct UserRef {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct ProjectRef {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct PushEvent {
    created_at: DateTime<Utc>,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MergeRequestItem {
    state: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    merged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IssueItem {
    state: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PipelineItem {
    status: String,
}
