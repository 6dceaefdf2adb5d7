use std::fmt;

use runpod_transcribe_media::EncodedAudio;
use serde::Serialize;

/// Default remote execution timeout: 10 minutes.
pub const DEFAULT_EXECUTION_TIMEOUT_MS: u64 = 600_000;

const URL_PREFIX: &str = "http";

/// Audio sent with a job, either inline or by reference.
///
/// Serializes as exactly one of `{"audio_base_64": ...}` or `{"audio_url": ...}`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub enum AudioInput {
    #[serde(rename = "audio_base_64")]
    InlineAudio(String),
    #[serde(rename = "audio_url")]
    AudioUrl(String),
}

impl AudioInput {
    /// Classify a caller-supplied string: anything starting with `http` is a
    /// URL, everything else is base64 audio.
    pub fn from_input(input: impl Into<String>) -> Self {
        let input = input.into();
        if input.starts_with(URL_PREFIX) {
            Self::AudioUrl(input)
        } else {
            Self::InlineAudio(input)
        }
    }

    /// Field name used in the request body.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::InlineAudio(_) => "audio_base_64",
            Self::AudioUrl(_) => "audio_url",
        }
    }
}

// Inline payloads can be megabytes of base64; only their length is printed.
impl fmt::Debug for AudioInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InlineAudio(data) => f
                .debug_tuple("InlineAudio")
                .field(&format_args!("<{} base64 chars>", data.len()))
                .finish(),
            Self::AudioUrl(url) => f.debug_tuple("AudioUrl").field(url).finish(),
        }
    }
}

impl From<EncodedAudio> for AudioInput {
    fn from(encoded: EncodedAudio) -> Self {
        Self::InlineAudio(encoded.base64)
    }
}

/// Per-job limits enforced by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExecutionPolicy {
    #[serde(rename = "executionTimeout")]
    pub execution_timeout_ms: u64,
}

impl Default for ExecutionPolicy {
    fn default() -> Self {
        Self {
            execution_timeout_ms: DEFAULT_EXECUTION_TIMEOUT_MS,
        }
    }
}

/// Body of `POST /run`.
#[derive(Debug, Clone, Serialize)]
pub struct RunRequest<'a> {
    pub input: &'a AudioInput,
    pub policy: ExecutionPolicy,
}

impl<'a> RunRequest<'a> {
    pub fn new(input: &'a AudioInput, policy: ExecutionPolicy) -> Self {
        Self { input, policy }
    }
}
