mod job;
mod payload;
mod waiter;

pub use job::{
    CancelResponse, HealthResponse, JobId, JobResult, JobStats, JobStatus, StatusResponse,
    WorkerStats,
};
pub use payload::{AudioInput, ExecutionPolicy, RunRequest, DEFAULT_EXECUTION_TIMEOUT_MS};
pub use waiter::{CompletionWaiter, PollStep, Sleeper, ThreadSleeper, DEFAULT_POLLING_INTERVAL};
