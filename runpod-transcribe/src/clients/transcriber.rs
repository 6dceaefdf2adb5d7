use std::path::Path;
use std::time::Duration;

use log::info;
use runpod_transcribe_media::{encode_for_submission, MediaTool};
use secrecy::SecretString;

use crate::config::TranscriberConfig;
use crate::jobs::{
    AudioInput, CancelResponse, CompletionWaiter, ExecutionPolicy, HealthResponse, JobId,
    JobResult, RunRequest, Sleeper, StatusResponse, ThreadSleeper, DEFAULT_POLLING_INTERVAL,
};

use super::client::JobApi;
use super::config::ApiConfig;
use super::error::TranscriptionError;
use super::runpod_client::RunpodClient;

/// Transcription service that drives the submit/poll/complete cycle
///
/// Uses a `JobApi` implementation for transport and a `Sleeper` between polls.
pub struct Transcriber {
    client: Box<dyn JobApi>,
    sleeper: Box<dyn Sleeper>,
    polling_interval: Duration,
    policy: ExecutionPolicy,
}

impl Transcriber {
    /// Create a Transcriber talking to RunPod with the settings in `config`
    pub fn from_config(
        config: &TranscriberConfig,
        api_key: SecretString,
    ) -> Result<Self, TranscriptionError> {
        let api_config = ApiConfig {
            api_key,
            endpoint_id: config.endpoint_id.clone(),
            base_url: config.base_url.clone(),
        };
        let client = RunpodClient::new(api_config)?;

        Ok(Self::new(Box::new(client))
            .with_polling_interval(config.polling_interval())
            .with_execution_policy(config.execution_policy()))
    }

    /// Create a Transcriber over any job API with default interval and policy
    pub fn new(client: Box<dyn JobApi>) -> Self {
        Self {
            client,
            sleeper: Box::new(ThreadSleeper),
            polling_interval: DEFAULT_POLLING_INTERVAL,
            policy: ExecutionPolicy::default(),
        }
    }

    pub fn with_polling_interval(mut self, interval: Duration) -> Self {
        self.polling_interval = interval;
        self
    }

    pub fn with_execution_policy(mut self, policy: ExecutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Submit a job with the default execution policy
    pub fn submit(&self, audio: &AudioInput) -> Result<JobId, TranscriptionError> {
        self.submit_with_policy(audio, self.policy)
    }

    pub fn submit_with_policy(
        &self,
        audio: &AudioInput,
        policy: ExecutionPolicy,
    ) -> Result<JobId, TranscriptionError> {
        self.client.run(&RunRequest::new(audio, policy))
    }

    pub fn status(&self, job_id: &JobId) -> Result<StatusResponse, TranscriptionError> {
        self.client.status(job_id)
    }

    /// Block until the job is terminal, polling every configured interval
    pub fn wait_for_completion(&self, job_id: &JobId) -> Result<JobResult, TranscriptionError> {
        CompletionWaiter::new(self.client.as_ref(), self.sleeper.as_ref(), self.polling_interval)
            .wait(job_id)
    }

    /// Submit audio and wait for the result
    ///
    /// # Arguments
    /// * `audio` - Inline base64 audio or a URL the workers can download
    ///
    /// # Returns
    /// * `Ok(JobResult)` - Completed job with its output
    /// * `Err(TranscriptionError)` - Submission, polling or job failure
    pub fn transcribe(&self, audio: &AudioInput) -> Result<JobResult, TranscriptionError> {
        let job_id = self.submit(audio)?;
        info!("Waiting for job {} ({:?})", job_id, audio);
        self.wait_for_completion(&job_id)
    }

    /// Normalize a local media file, submit it inline and wait for the result
    pub fn transcribe_file(
        &self,
        tool: &dyn MediaTool,
        path: &Path,
    ) -> Result<JobResult, TranscriptionError> {
        let encoded = encode_for_submission(tool, path)?;
        info!("Submitting {:?} ({:.2} MB encoded)", path, encoded.size_mb);
        self.transcribe(&AudioInput::from(encoded))
    }

    pub fn health(&self) -> Result<HealthResponse, TranscriptionError> {
        self.client.health()
    }

    pub fn cancel(&self, job_id: &JobId) -> Result<CancelResponse, TranscriptionError> {
        self.client.cancel(job_id)
    }
}
