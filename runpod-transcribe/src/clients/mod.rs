mod client;
mod config;
mod error;
#[cfg(test)]
pub(crate) mod mock_client;
mod runpod_client;
mod transcriber;

// Re-export public types
pub use client::JobApi;
pub use config::ApiConfig;
pub use error::TranscriptionError;
pub use runpod_client::{RunpodClient, RUNPOD_API_URL};
pub use transcriber::Transcriber;
