//! Completion Waiter - polls a job until it reaches a terminal status
//!
//! State diagram:
//! ```text
//!            ┌──── sleep(interval) ────┐
//!            ↓                         │
//! ──> query status ──IN_QUEUE/IN_PROGRESS
//!            │
//!            ├──COMPLETED──> Ok(JobResult)
//!            └──anything else──> Err(JobFailed)
//! ```
//!
//! There is no backoff, no poll limit and no client-side deadline; the
//! remote execution timeout is the only bound on total wait time.

use std::time::Duration;

use log::{debug, info, warn};

use crate::clients::{JobApi, TranscriptionError};

use super::job::{JobId, JobResult, JobStatus};

/// Default delay between two status queries.
pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_secs(20);

/// Blocks the calling thread between polls.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] backed by `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// What the waiter does after observing a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStep {
    /// Sleep one interval and query again
    Continue,
    /// Return the output
    Complete,
    /// Fail with the observed status
    Fail,
}

impl PollStep {
    pub fn for_status(status: &JobStatus) -> Self {
        match status {
            JobStatus::InQueue | JobStatus::InProgress => Self::Continue,
            JobStatus::Completed => Self::Complete,
            _ => Self::Fail,
        }
    }
}

/// Polls one job at a fixed interval until it is terminal.
pub struct CompletionWaiter<'a> {
    api: &'a dyn JobApi,
    sleeper: &'a dyn Sleeper,
    interval: Duration,
}

impl<'a> CompletionWaiter<'a> {
    pub fn new(api: &'a dyn JobApi, sleeper: &'a dyn Sleeper, interval: Duration) -> Self {
        Self {
            api,
            sleeper,
            interval,
        }
    }

    /// Block until `job_id` completes.
    ///
    /// # Returns
    /// * `Ok(JobResult)` - The job reached `COMPLETED`; output is passed through
    /// * `Err(TranscriptionError::JobFailed)` - Any other terminal status
    /// * `Err(_)` - A status query failed; polling stops immediately
    pub fn wait(&self, job_id: &JobId) -> Result<JobResult, TranscriptionError> {
        let mut polls: u64 = 0;

        loop {
            let response = self.api.status(job_id)?;
            polls = polls.saturating_add(1);

            match PollStep::for_status(&response.status) {
                PollStep::Continue => {
                    debug!(
                        "Job {} is {} (poll #{}), sleeping {:?}",
                        job_id, response.status, polls, self.interval
                    );
                    self.sleeper.sleep(self.interval);
                }
                PollStep::Complete => {
                    info!("Job {} completed after {} polls", job_id, polls);
                    return Ok(JobResult {
                        status: response.status,
                        output: response.output,
                    });
                }
                PollStep::Fail => {
                    warn!(
                        "Job {} ended with status {} after {} polls",
                        job_id, response.status, polls
                    );
                    return Err(TranscriptionError::JobFailed {
                        status: response.status.to_string(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::mock_client::{MockJobApi, RecordingSleeper};
    use serde_json::json;

    const INTERVAL: Duration = Duration::from_millis(1500);

    #[test]
    fn test_default_interval_is_twenty_seconds() {
        assert_eq!(DEFAULT_POLLING_INTERVAL, Duration::from_secs(20));
    }

    #[test]
    fn test_poll_step_partition() {
        let test_cases = vec![
            (JobStatus::InQueue, PollStep::Continue),
            (JobStatus::InProgress, PollStep::Continue),
            (JobStatus::Completed, PollStep::Complete),
            (JobStatus::Failed, PollStep::Fail),
            (JobStatus::Cancelled, PollStep::Fail),
            (JobStatus::TimedOut, PollStep::Fail),
            (JobStatus::Other("PAUSED".to_string()), PollStep::Fail),
        ];

        for (status, expected) in test_cases {
            assert_eq!(PollStep::for_status(&status), expected, "{}", status);
        }
    }

    #[test]
    fn test_waits_through_queue_and_progress() {
        let output = json!({"transcription": "hello world"});
        let api = MockJobApi::with_statuses(
            &["IN_QUEUE", "IN_PROGRESS", "COMPLETED"],
            Some(output.clone()),
        );
        let sleeper = RecordingSleeper::default();

        let result = CompletionWaiter::new(&api, &sleeper, INTERVAL)
            .wait(&JobId::new("job-1"))
            .unwrap();

        assert_eq!(
            result,
            JobResult {
                status: JobStatus::Completed,
                output: Some(output),
            }
        );
        assert_eq!(api.status_calls(), 3);
        assert_eq!(sleeper.sleeps(), vec![INTERVAL, INTERVAL]);
    }

    #[test]
    fn test_completed_without_output() {
        let api = MockJobApi::with_statuses(&["COMPLETED"], None);
        let sleeper = RecordingSleeper::default();

        let result = CompletionWaiter::new(&api, &sleeper, INTERVAL)
            .wait(&JobId::new("job-1"))
            .unwrap();

        assert_eq!(result.status, JobStatus::Completed);
        assert_eq!(result.output, None);
        assert!(sleeper.sleeps().is_empty());
    }

    #[test]
    fn test_failed_job_fails_without_sleeping() {
        let api = MockJobApi::with_statuses(&["FAILED"], None);
        let sleeper = RecordingSleeper::default();

        let result = CompletionWaiter::new(&api, &sleeper, INTERVAL).wait(&JobId::new("job-1"));

        match result {
            Err(TranscriptionError::JobFailed { status }) => assert_eq!(status, "FAILED"),
            other => panic!("expected JobFailed, got {:?}", other),
        }
        assert_eq!(api.status_calls(), 1);
        assert!(sleeper.sleeps().is_empty());
    }

    #[test]
    fn test_failed_body_with_structured_error_is_job_failure() {
        let api = MockJobApi::with_statuses(&["IN_PROGRESS"], None);
        api.push_body(json!({
            "id": "job-1",
            "status": "FAILED",
            "delayTime": 310.5,
            "error": {"error_type": "RuntimeError", "error_traceback": "..."},
        }));
        let sleeper = RecordingSleeper::default();

        let result = CompletionWaiter::new(&api, &sleeper, INTERVAL).wait(&JobId::new("job-1"));

        match result {
            Err(TranscriptionError::JobFailed { status }) => assert_eq!(status, "FAILED"),
            other => panic!("expected JobFailed, got {:?}", other),
        }
        assert_eq!(api.status_calls(), 2);
    }

    #[test]
    fn test_unknown_status_is_terminal_failure() {
        let api = MockJobApi::with_statuses(&["IN_QUEUE", "SOMETHING_NEW"], None);
        let sleeper = RecordingSleeper::default();

        let err = CompletionWaiter::new(&api, &sleeper, INTERVAL)
            .wait(&JobId::new("job-1"))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Transcription job failed with status: SOMETHING_NEW"
        );
        assert_eq!(api.status_calls(), 2);
        assert_eq!(sleeper.sleeps().len(), 1);
    }

    #[test]
    fn test_query_error_stops_polling() {
        let api = MockJobApi::with_statuses(&["IN_PROGRESS"], None);
        api.push_error(TranscriptionError::MalformedResponse(
            "missing field `status`".to_string(),
        ));
        let sleeper = RecordingSleeper::default();

        let result = CompletionWaiter::new(&api, &sleeper, INTERVAL).wait(&JobId::new("job-1"));

        assert!(matches!(
            result,
            Err(TranscriptionError::MalformedResponse(_))
        ));
        assert_eq!(api.status_calls(), 2);
        assert_eq!(sleeper.sleeps().len(), 1);
    }

    #[test]
    fn test_polls_requested_job() {
        let api = MockJobApi::with_statuses(&["IN_QUEUE", "COMPLETED"], None);
        let sleeper = RecordingSleeper::default();

        CompletionWaiter::new(&api, &sleeper, INTERVAL)
            .wait(&JobId::new("job-42"))
            .unwrap();

        assert_eq!(
            api.polled_ids(),
            vec![JobId::new("job-42"), JobId::new("job-42")]
        );
    }
}
