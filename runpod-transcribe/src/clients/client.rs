use crate::jobs::{CancelResponse, HealthResponse, JobId, RunRequest, StatusResponse};

use super::error::TranscriptionError;

/// Trait for asynchronous job APIs (RunPod serverless, test doubles)
///
/// Each implementation knows how to:
/// - Submit a job and return its identifier
/// - Report a job's current status and output
/// - Report endpoint health and cancel a job
pub trait JobApi: Send + Sync {
    /// Submit a job, returning the identifier issued by the service
    fn run(&self, request: &RunRequest<'_>) -> Result<JobId, TranscriptionError>;

    /// Fetch the current status of a job
    fn status(&self, job_id: &JobId) -> Result<StatusResponse, TranscriptionError>;

    /// Fetch queue and worker statistics for the endpoint
    fn health(&self) -> Result<HealthResponse, TranscriptionError>;

    /// Ask the service to cancel a job
    fn cancel(&self, job_id: &JobId) -> Result<CancelResponse, TranscriptionError>;
}
