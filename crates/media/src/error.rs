use std::process::ExitStatus;

/// Errors that can occur while converting, probing or encoding media.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MediaError {
    /// The external tool could not be started (usually not installed).
    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The external tool ran but exited unsuccessfully.
    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: &'static str,
        status: ExitStatus,
        stderr: String,
    },

    /// `ffprobe` output could not be read as a duration in seconds.
    #[error("Invalid media duration: {0:?}")]
    InvalidDuration(String),

    /// Size targets must be finite and greater than zero.
    #[error("Invalid target size: {0} MB")]
    InvalidTarget(f64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}
