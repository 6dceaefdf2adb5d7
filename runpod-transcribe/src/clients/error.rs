use runpod_transcribe_media::MediaError;

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    /// Network or HTTP status failure, surfaced as-is.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// The response body lacked an expected field; carries the decoder message.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// The job reached a terminal status other than `COMPLETED`.
    #[error("Transcription job failed with status: {status}")]
    JobFailed { status: String },
    #[error("Media conversion failed: {0}")]
    Media(#[from] MediaError),
    #[error("API key not configured")]
    ApiKeyMissing,
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl TranscriptionError {
    /// Returns a short message suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self {
            TranscriptionError::Transport(err) => match err.status().map(|s| s.as_u16()) {
                Some(401) | Some(403) => "Invalid API key. Check your settings.".to_string(),
                Some(404) => "Endpoint not found. Check the endpoint ID.".to_string(),
                Some(429) => "Rate limit reached. Please wait and retry.".to_string(),
                Some(code) => format!("Transcription service returned HTTP {}.", code),
                None if err.is_timeout() => "Transcription service timed out.".to_string(),
                None => "Could not reach the transcription service.".to_string(),
            },
            TranscriptionError::MalformedResponse(_) => {
                "Unexpected response from the transcription service.".to_string()
            }
            TranscriptionError::JobFailed { status } => {
                format!("Transcription did not complete (status {}).", status)
            }
            TranscriptionError::Media(MediaError::Spawn { tool, .. }) => {
                format!("Failed to prepare the audio file. Is {} installed?", tool)
            }
            TranscriptionError::Media(MediaError::Io(_)) => {
                "Could not read or write the audio file.".to_string()
            }
            TranscriptionError::Media(MediaError::Decode(_)) => {
                "The audio payload is not valid base64.".to_string()
            }
            TranscriptionError::Media(_) => "Failed to prepare the audio file.".to_string(),
            TranscriptionError::ApiKeyMissing => {
                "API key not configured. Please add it to your settings.".to_string()
            }
            TranscriptionError::Config(msg) => format!("Invalid configuration: {}", msg),
        }
    }
}
