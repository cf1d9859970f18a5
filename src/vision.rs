//! Vision Backend Client
//!
//! HTTP client for the image-analysis backend. The dashboard sends an
//! image plus a prompt and relays the backend's JSON verbatim; there
//! is no retry, backoff or cancellation on this path.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Configuration for the vision client.
#[derive(Debug, Clone)]
pub struct VisionConfig {
    /// Backend base URL, e.g. "http://localhost:8090".
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

/// Client for the image-analysis backend.
pub struct VisionClient {
    client: Client,
    config: VisionConfig,
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    image_base64: String,
    prompt: &'a str,
}

impl VisionClient {
    /// Create a new client.
    pub fn new(config: VisionConfig) -> Result<Self, VisionError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(VisionError::Request)?;

        Ok(Self { client, config })
    }

    /// Check if the backend is reachable.
    pub async fn health_check(&self) -> Result<(), VisionError> {
        let url = format!("{}/health", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(VisionError::Unavailable)
        }
    }

    /// Analyze an image file with a prompt.
    ///
    /// On success the backend's JSON body is returned verbatim so the
    /// caller can relay it without reshaping.
    pub async fn analyze_image(
        &self,
        image_path: &Path,
        prompt: &str,
    ) -> Result<serde_json::Value, VisionError> {
        let bytes = tokio::fs::read(image_path)
            .await
            .map_err(|e| VisionError::ImageRead {
                path: image_path.display().to_string(),
                error: e.to_string(),
            })?;

        let url = format!("{}/v1/vision/analyze", self.config.base_url);
        let body = AnalyzeRequest {
            image_base64: BASE64.encode(&bytes),
            prompt,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let payload: serde_json::Value = response.json().await.map_err(map_transport_error)?;

        if status.is_success() {
            Ok(payload)
        } else {
            let message = payload
                .get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("Unknown error")
                .to_string();
            Err(VisionError::Backend {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn map_transport_error(e: reqwest::Error) -> VisionError {
    if e.is_timeout() {
        VisionError::Timeout
    } else if e.is_connect() {
        VisionError::Unavailable
    } else {
        VisionError::Request(e)
    }
}

/// Errors from the vision backend path.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("could not read image {path}: {error}")]
    ImageRead { path: String, error: String },

    #[error("vision backend request timed out")]
    Timeout,

    #[error("vision backend is unreachable")]
    Unavailable,

    #[error("vision backend returned status {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_image_is_reported_without_touching_the_network() {
        let client = VisionClient::new(VisionConfig::default()).unwrap();
        let result = client
            .analyze_image(Path::new("/nonexistent/image.jpg"), "Caption this image.")
            .await;
        assert!(matches!(result, Err(VisionError::ImageRead { .. })));
    }
}
