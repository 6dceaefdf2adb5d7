use log::{debug, error, info};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::jobs::{CancelResponse, HealthResponse, JobId, RunRequest, StatusResponse};

use super::client::JobApi;
use super::config::ApiConfig;
use super::error::TranscriptionError;

pub const RUNPOD_API_URL: &str = "https://api.runpod.ai/v2";

#[derive(Deserialize)]
struct RunResponse {
    id: String,
}

/// RunPod serverless `v2` API client
pub struct RunpodClient {
    http: reqwest::blocking::Client,
    config: ApiConfig,
}

impl RunpodClient {
    pub fn new(config: ApiConfig) -> Result<Self, TranscriptionError> {
        if config.api_key.expose_secret().trim().is_empty() {
            return Err(TranscriptionError::ApiKeyMissing);
        }
        if config.endpoint_id.trim().is_empty() {
            return Err(TranscriptionError::Config(
                "endpoint ID is empty".to_string(),
            ));
        }

        Ok(Self {
            http: reqwest::blocking::Client::new(),
            config,
        })
    }

    pub fn run_url(&self) -> String {
        self.endpoint_url("run")
    }

    pub fn status_url(&self, job_id: &JobId) -> String {
        self.endpoint_url(&format!("status/{}", job_id))
    }

    pub fn health_url(&self) -> String {
        self.endpoint_url("health")
    }

    pub fn cancel_url(&self, job_id: &JobId) -> String {
        self.endpoint_url(&format!("cancel/{}", job_id))
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.endpoint_id,
            path
        )
    }

    /// Add authentication to the request builder
    fn add_auth(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        request.bearer_auth(self.config.api_key.expose_secret())
    }

    /// Send request and parse response
    fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<T, TranscriptionError> {
        let response = self.add_auth(request).send().map_err(|e| {
            error!("API request error: {}", e);
            e
        })?;

        // Keep the reqwest error for the caller, log the body for us
        let failure = response.error_for_status_ref().err();
        if let Some(err) = failure {
            let status = response.status();
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("API error response ({}): {}", status, error_text);
            return Err(err.into());
        }

        let json: serde_json::Value = response.json().map_err(|e| {
            error!("Failed to parse response: {}", e);
            e
        })?;

        serde_json::from_value(json).map_err(|e| {
            error!("Unexpected response shape: {}", e);
            TranscriptionError::MalformedResponse(e.to_string())
        })
    }
}

impl JobApi for RunpodClient {
    fn run(&self, request: &RunRequest<'_>) -> Result<JobId, TranscriptionError> {
        debug!(
            "Submitting {} job to {}",
            request.input.field_name(),
            self.config.endpoint_id
        );

        let response: RunResponse = self.send(self.http.post(self.run_url()).json(request))?;

        info!("Submitted job {}", response.id);
        Ok(JobId::new(response.id))
    }

    fn status(&self, job_id: &JobId) -> Result<StatusResponse, TranscriptionError> {
        self.send(self.http.get(self.status_url(job_id)))
    }

    fn health(&self) -> Result<HealthResponse, TranscriptionError> {
        self.send(self.http.get(self.health_url()))
    }

    fn cancel(&self, job_id: &JobId) -> Result<CancelResponse, TranscriptionError> {
        info!("Cancelling job {}", job_id);
        self.send(self.http.post(self.cancel_url(job_id)))
    }
}
