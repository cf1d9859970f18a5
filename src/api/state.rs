//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::config::ApiConfig;
use crate::gitlab::MetricsProvider;
use crate::roster::Roster;
use crate::vision::VisionClient;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Team roster
    pub roster: Arc<Roster>,
    /// Source of per-developer repository metrics
    pub provider: Arc<dyn MetricsProvider>,
    /// Vision backend client (optional)
    pub vision: Option<Arc<VisionClient>>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState without the vision backend
    pub fn new(roster: Arc<Roster>, provider: Arc<dyn MetricsProvider>, config: ApiConfig) -> Self {
        Self {
            roster,
            provider,
            vision: None,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Create AppState with a vision backend client
    pub fn with_vision(
        roster: Arc<Roster>,
        provider: Arc<dyn MetricsProvider>,
        config: ApiConfig,
        vision: Arc<VisionClient>,
    ) -> Self {
        Self {
            roster,
            provider,
            vision: Some(vision),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Check if the vision backend is configured
    pub fn has_vision(&self) -> bool {
        self.vision.is_some()
    }
}
