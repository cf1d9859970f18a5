//! Repository Metrics Providers
//!
//! Sources of per-developer [`GitLabMetrics`]:
//! - [`GitLabClient`]: live GitLab REST API
//! - [`SampleMetricsProvider`]: deterministic sample data for demos
//!   and for degraded operation when the API is unreachable
//!
//! The dashboard never fails because a provider is down: the live
//! client falls back to sample metrics and logs a warning.

mod client;
mod sample;

pub use client::{GitLabClient, GitLabClientConfig};
pub use sample::{sample_metrics, SampleMetricsProvider};

use crate::model::GitLabMetrics;
use async_trait::async_trait;

/// Common trait for metrics sources.
#[async_trait]
pub trait MetricsProvider: Send + Sync {
    /// Unique name for this provider.
    fn name(&self) -> &str;

    /// Fetch metrics for one developer by username.
    async fn developer_metrics(&self, username: &str) -> Result<GitLabMetrics, GitLabError>;
}

/// Errors from the GitLab API layer.
#[derive(Debug, thiserror::Error)]
pub enum GitLabError {
    #[error("GitLab request timed out")]
    Timeout,

    #[error("GitLab is unreachable")]
    Unavailable,

    #[error("GitLab returned status {0}")]
    Api(u16),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}
