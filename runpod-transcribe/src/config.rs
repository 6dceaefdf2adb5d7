use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clients::{TranscriptionError, RUNPOD_API_URL};
use crate::jobs::{ExecutionPolicy, DEFAULT_EXECUTION_TIMEOUT_MS, DEFAULT_POLLING_INTERVAL};

/// Transcriber settings (stored as JSON, never contains the API key)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TranscriberConfig {
    /// Serverless endpoint identifier
    #[serde(alias = "endpoint_id")]
    pub endpoint_id: String,
    /// API root (default: https://api.runpod.ai/v2)
    #[serde(alias = "base_url")]
    pub base_url: String,
    /// Seconds between status queries (default: 20)
    #[serde(alias = "polling_interval_secs")]
    pub polling_interval_secs: u64,
    /// Remote execution timeout per job in milliseconds (default: 600000)
    #[serde(alias = "execution_timeout_ms")]
    pub execution_timeout_ms: u64,
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        Self {
            endpoint_id: String::new(),
            base_url: RUNPOD_API_URL.to_string(),
            polling_interval_secs: DEFAULT_POLLING_INTERVAL.as_secs(),
            execution_timeout_ms: DEFAULT_EXECUTION_TIMEOUT_MS,
        }
    }
}

impl TranscriberConfig {
    /// Load settings from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self, TranscriptionError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TranscriptionError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            TranscriptionError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    pub fn polling_interval(&self) -> Duration {
        Duration::from_secs(self.polling_interval_secs)
    }

    pub fn execution_policy(&self) -> ExecutionPolicy {
        ExecutionPolicy {
            execution_timeout_ms: self.execution_timeout_ms,
        }
    }
}
