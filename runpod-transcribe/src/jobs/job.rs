use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Opaque job identifier issued by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Lifecycle state reported by the status endpoint.
///
/// Values the client does not know are kept verbatim in `Other` and are
/// treated as terminal failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum::EnumString)]
#[serde(from = "String", into = "String")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    InQueue,
    InProgress,
    Completed,
    Failed,
    Cancelled,
    TimedOut,
    #[strum(default)]
    Other(String),
}

impl JobStatus {
    /// Wire representation, e.g. `IN_QUEUE`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::InQueue => "IN_QUEUE",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
            Self::TimedOut => "TIMED_OUT",
            Self::Other(raw) => raw,
        }
    }

    /// Everything except `IN_QUEUE` and `IN_PROGRESS` ends polling.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InQueue | Self::InProgress)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        raw.parse().unwrap_or(Self::Other(raw))
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Body of `GET /status/{job_id}`. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub status: JobStatus,
    /// Worker output, passed through untouched.
    #[serde(default)]
    pub output: Option<Value>,
    /// Milliseconds spent in the queue; dropped if not a number.
    #[serde(default, deserialize_with = "lenient_millis")]
    pub delay_time: Option<f64>,
    /// Milliseconds spent executing; dropped if not a number.
    #[serde(default, deserialize_with = "lenient_millis")]
    pub execution_time: Option<f64>,
    /// Worker error report, a string or a structured object.
    #[serde(default)]
    pub error: Option<Value>,
}

// Timing fields are informational and never fail the whole body
fn lenient_millis<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|value| value.as_f64()))
}

/// Outcome of a job that reached `COMPLETED`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobResult {
    pub status: JobStatus,
    pub output: Option<Value>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HealthResponse {
    pub jobs: JobStats,
    pub workers: WorkerStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobStats {
    pub completed: u64,
    pub failed: u64,
    pub in_progress: u64,
    pub in_queue: u64,
    pub retried: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkerStats {
    pub idle: u64,
    pub running: u64,
    pub initializing: u64,
    pub ready: u64,
    pub throttled: u64,
    pub unhealthy: u64,
}

/// Body of `POST /cancel/{job_id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CancelResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub status: JobStatus,
}
