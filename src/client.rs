// WHY: request/response client for the upstream detection service
// The highlight engine runs only after the full response is available

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::highlight::Annotation;

/// Environment variable overriding the default service base URL
pub const API_BASE_ENV: &str = "TRUTHLENS_API_BASE";

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Errors from calling the detection service or loading a saved response
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("Analysis failed. Is the backend running at {url}? ({source})")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{}", status_message(.status, .body))]
    Status { status: u16, body: String },

    #[error("Malformed analysis response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to read analysis file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn status_message(status: &u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("Request failed: {status}")
    } else {
        body.to_string()
    }
}

/// Configuration for the detection service client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL; requests go to `{base_url}/analyze`
    pub base_url: String,
    /// Timeout applied to the whole request
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var(API_BASE_ENV)
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

/// Detection service response
///
/// Only `highlights` feeds the highlight engine; the other fields are displayed as-is.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub highlights: Vec<Annotation>,
    #[serde(default)]
    pub detected_techniques: Vec<String>,
    #[serde(default)]
    pub perception_explanation: String,
}

impl AnalysisResponse {
    /// Load a previously saved response (offline mode)
    pub async fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ClientError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let response = serde_json::from_str(&content)?;
        debug!("Loaded analysis response from {}", path.display());
        Ok(response)
    }
}

/// HTTP client for `POST /analyze`
pub struct DetectionClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl DetectionClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self { config, client })
    }

    pub fn with_default() -> Result<Self, ClientError> {
        Self::new(ClientConfig::default())
    }

    pub fn analyze_url(&self) -> String {
        format!("{}/analyze", self.config.base_url.trim_end_matches('/'))
    }

    /// Submit text for analysis and return the decoded response
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResponse, ClientError> {
        let url = self.analyze_url();
        info!(url = %url, chars = text.chars().count(), "Requesting analysis");

        let response = self
            .client
            .post(&url)
            .json(&AnalyzeRequest { text })
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Detection service returned an error");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let analysis: AnalysisResponse = serde_json::from_str(&body)?;
        info!(
            highlights = analysis.highlights.len(),
            techniques = analysis.detected_techniques.len(),
            "Analysis received"
        );
        Ok(analysis)
    }
}
