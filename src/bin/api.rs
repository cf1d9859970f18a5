//! DevPulse API Server
//!
//! Run with: cargo run --bin devpulse-api
//!
//! # Configuration
//!
//! Loaded from the first config.toml found in the standard locations,
//! with environment overrides:
//! - `DEVPULSE_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `DEVPULSE_API_PORT`: Port to listen on (default: 8086)
//! - `DEVPULSE_ASSETS_DIR`: Image assets directory (default: ./assets)
//! - `DEVPULSE_GITLAB_URL`: GitLab API URL (enables the live client)
//! - `DEVPULSE_GITLAB_TOKEN`: GitLab personal access token
//! - `DEVPULSE_VISION_URL`: Vision backend URL (default: http://localhost:8090)
//! - `DEVPULSE_LOG_LEVEL` / `DEVPULSE_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Overrides the configured log level

use anyhow::Result;
use devpulse::api::{serve, AppState};
use devpulse::config::Config;
use devpulse::gitlab::{GitLabClient, GitLabClientConfig, MetricsProvider, SampleMetricsProvider};
use devpulse::roster::Roster;
use devpulse::vision::{VisionClient, VisionConfig};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load_default();

    init_tracing(&config);

    tracing::info!("Starting DevPulse API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Assets directory: {:?}", config.api.assets_dir);

    let roster = Arc::new(Roster::builtin());

    // Metrics provider: live GitLab when configured, sample otherwise
    let provider: Arc<dyn MetricsProvider> = if config.gitlab.enabled
        && !config.gitlab.token.is_empty()
    {
        tracing::info!("GitLab integration enabled: {}", config.gitlab.base_url);
        Arc::new(GitLabClient::new(GitLabClientConfig {
            base_url: config.gitlab.base_url.clone(),
            token: config.gitlab.token.clone(),
            request_timeout_ms: config.gitlab.request_timeout_ms,
        })?)
    } else {
        tracing::info!("GitLab integration disabled, serving sample metrics");
        Arc::new(SampleMetricsProvider)
    };

    // Vision backend (optional)
    let state = if config.vision.enabled {
        let vision = Arc::new(VisionClient::new(VisionConfig {
            base_url: config.vision.base_url.clone(),
            request_timeout_ms: config.vision.request_timeout_ms,
        })?);

        match vision.health_check().await {
            Ok(()) => tracing::info!("Vision backend connection verified"),
            Err(e) => tracing::warn!(
                "Vision backend not available: {} (image analysis will fail until it is)",
                e
            ),
        }

        AppState::with_vision(roster, provider, config.api.clone(), vision)
    } else {
        tracing::info!("Vision backend disabled");
        AppState::new(roster, provider, config.api.clone())
    };

    tracing::info!("Starting server on {}:{}", config.api.host, config.api.port);
    serve(state, &config.api).await?;

    tracing::info!("DevPulse API server stopped");
    Ok(())
}

/// Initialize tracing from the logging config, RUST_LOG taking
/// precedence when set.
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "devpulse={},tower_http=debug",
            config.logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
