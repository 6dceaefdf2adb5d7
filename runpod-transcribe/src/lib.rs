//! Client helper for asynchronous transcription jobs on RunPod serverless
//! endpoints.
//!
//! A job is submitted with inline base64 audio or an audio URL, then polled
//! at a fixed interval until the service reports a terminal status.
//! Preprocessing (normalizing media, trimming to a size) lives in
//! [`runpod_transcribe_media`] and is re-exported as [`media`].
//!
//! # Example
//!
//! ```no_run
//! use runpod_transcribe::{AudioInput, Transcriber, TranscriberConfig};
//! use secrecy::SecretString;
//!
//! fn main() -> Result<(), runpod_transcribe::TranscriptionError> {
//!     let config = TranscriberConfig {
//!         endpoint_id: "my-whisper-endpoint".to_string(),
//!         ..Default::default()
//!     };
//!     let api_key = SecretString::from(std::env::var("RUNPOD_API_KEY").unwrap_or_default());
//!     let transcriber = Transcriber::from_config(&config, api_key)?;
//!
//!     let result = transcriber.transcribe(&AudioInput::from_input("https://example.com/talk.mp3"))?;
//!     println!("{:?}", result.output);
//!     Ok(())
//! }
//! ```

mod clients;
mod config;
mod jobs;

pub use clients::{ApiConfig, JobApi, RunpodClient, Transcriber, TranscriptionError, RUNPOD_API_URL};
pub use config::TranscriberConfig;
pub use jobs::{
    AudioInput, CancelResponse, CompletionWaiter, ExecutionPolicy, HealthResponse, JobId,
    JobResult, JobStats, JobStatus, PollStep, RunRequest, Sleeper, StatusResponse, ThreadSleeper,
    WorkerStats, DEFAULT_EXECUTION_TIMEOUT_MS, DEFAULT_POLLING_INTERVAL,
};

pub use runpod_transcribe_media as media;
