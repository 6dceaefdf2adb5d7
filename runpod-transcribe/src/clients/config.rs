use std::fmt;

use secrecy::SecretString;

use super::runpod_client::RUNPOD_API_URL;

/// Credentials and addressing for one serverless endpoint
pub struct ApiConfig {
    pub api_key: SecretString,
    /// Endpoint identifier, the `{endpoint}` path segment
    pub endpoint_id: String,
    /// API root without trailing slash, e.g. `https://api.runpod.ai/v2`
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>, endpoint_id: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            endpoint_id: endpoint_id.into(),
            base_url: RUNPOD_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"[REDACTED]")
            .field("endpoint_id", &self.endpoint_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}
