//! In-memory doubles for [`JobApi`] and [`Sleeper`] used by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;

use crate::jobs::{
    CancelResponse, HealthResponse, JobId, JobStatus, RunRequest, Sleeper, StatusResponse,
};

use super::client::JobApi;
use super::error::TranscriptionError;

pub const MOCK_JOB_ID: &str = "mock-job-1";

/// Replays a scripted list of status responses
#[derive(Default)]
pub struct MockJobApi {
    statuses: Mutex<VecDeque<Result<StatusResponse, TranscriptionError>>>,
    run_bodies: Mutex<Vec<Value>>,
    polled: Mutex<Vec<JobId>>,
    cancelled: Mutex<Vec<JobId>>,
}

impl MockJobApi {
    /// Script `statuses` in order; the last one carries `output`.
    pub fn with_statuses(statuses: &[&str], output: Option<Value>) -> Self {
        let api = Self::default();
        let last = statuses.len().saturating_sub(1);
        for (i, status) in statuses.iter().enumerate() {
            api.statuses.lock().unwrap().push_back(Ok(StatusResponse {
                id: Some(MOCK_JOB_ID.to_string()),
                status: JobStatus::from(status.to_string()),
                output: if i == last { output.clone() } else { None },
                delay_time: None,
                execution_time: None,
                error: None,
            }));
        }
        api
    }

    /// Script a raw status body, decoded the way `RunpodClient` decodes it.
    pub fn push_body(&self, body: Value) {
        let decoded = serde_json::from_value(body)
            .map_err(|e| TranscriptionError::MalformedResponse(e.to_string()));
        self.statuses.lock().unwrap().push_back(decoded);
    }

    pub fn push_error(&self, err: TranscriptionError) {
        self.statuses.lock().unwrap().push_back(Err(err));
    }

    pub fn status_calls(&self) -> usize {
        self.polled.lock().unwrap().len()
    }

    pub fn polled_ids(&self) -> Vec<JobId> {
        self.polled.lock().unwrap().clone()
    }

    /// JSON bodies of every submitted run request
    pub fn run_bodies(&self) -> Vec<Value> {
        self.run_bodies.lock().unwrap().clone()
    }

    pub fn cancelled_ids(&self) -> Vec<JobId> {
        self.cancelled.lock().unwrap().clone()
    }
}

impl JobApi for MockJobApi {
    fn run(&self, request: &RunRequest<'_>) -> Result<JobId, TranscriptionError> {
        let body = serde_json::to_value(request).unwrap();
        self.run_bodies.lock().unwrap().push(body);
        Ok(JobId::new(MOCK_JOB_ID))
    }

    fn status(&self, job_id: &JobId) -> Result<StatusResponse, TranscriptionError> {
        self.polled.lock().unwrap().push(job_id.clone());
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted status left")
    }

    fn health(&self) -> Result<HealthResponse, TranscriptionError> {
        Ok(HealthResponse::default())
    }

    fn cancel(&self, job_id: &JobId) -> Result<CancelResponse, TranscriptionError> {
        self.cancelled.lock().unwrap().push(job_id.clone());
        Ok(CancelResponse {
            id: Some(job_id.to_string()),
            status: JobStatus::Cancelled,
        })
    }
}

// Lets a test keep a handle while the transcriber owns a boxed copy
impl JobApi for Arc<MockJobApi> {
    fn run(&self, request: &RunRequest<'_>) -> Result<JobId, TranscriptionError> {
        self.as_ref().run(request)
    }

    fn status(&self, job_id: &JobId) -> Result<StatusResponse, TranscriptionError> {
        self.as_ref().status(job_id)
    }

    fn health(&self) -> Result<HealthResponse, TranscriptionError> {
        self.as_ref().health()
    }

    fn cancel(&self, job_id: &JobId) -> Result<CancelResponse, TranscriptionError> {
        self.as_ref().cancel(job_id)
    }
}

/// Records requested sleeps instead of blocking
#[derive(Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

impl Sleeper for Arc<RecordingSleeper> {
    fn sleep(&self, duration: Duration) {
        self.as_ref().sleep(duration);
    }
}
