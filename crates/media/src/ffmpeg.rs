use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use log::{debug, error};

use crate::encode::EncodeSettings;
use crate::error::MediaError;

const FFMPEG: &str = "ffmpeg";
const FFPROBE: &str = "ffprobe";

/// Decode/encode capability used by the preprocessing functions.
///
/// Implemented by [`Ffmpeg`] for real work; tests substitute recording mocks.
pub trait MediaTool: Send + Sync {
    /// Decode `input` (any audio or video container) and encode its audio
    /// track to `output` using `settings`.
    fn convert(
        &self,
        input: &Path,
        output: &Path,
        settings: &EncodeSettings,
    ) -> Result<(), MediaError>;

    /// Duration of `input` in seconds.
    fn probe_duration(&self, input: &Path) -> Result<f64, MediaError>;

    /// Re-encode the first `duration_secs` seconds of `input` to `output`.
    fn trim(&self, input: &Path, output: &Path, duration_secs: f64) -> Result<(), MediaError>;
}

/// [`MediaTool`] backed by the `ffmpeg` and `ffprobe` executables.
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    ffmpeg_path: PathBuf,
    ffprobe_path: PathBuf,
}

impl Default for Ffmpeg {
    /// Resolve both tools from `PATH`.
    fn default() -> Self {
        Self::new(FFMPEG, FFPROBE)
    }
}

impl Ffmpeg {
    pub fn new(ffmpeg_path: impl Into<PathBuf>, ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            ffprobe_path: ffprobe_path.into(),
        }
    }

    fn ffmpeg(&self) -> Command {
        let mut command = Command::new(&self.ffmpeg_path);
        command.args(["-y", "-hide_banner", "-loglevel", "error"]);
        command
    }
}

impl MediaTool for Ffmpeg {
    fn convert(
        &self,
        input: &Path,
        output: &Path,
        settings: &EncodeSettings,
    ) -> Result<(), MediaError> {
        let mut command = self.ffmpeg();
        command
            .arg("-i")
            .arg(input)
            .arg("-vn")
            .arg("-ac")
            .arg(settings.channels.to_string())
            .arg("-ar")
            .arg(settings.sample_rate.to_string())
            .arg("-b:a")
            .arg(format!("{}k", settings.bitrate_kbps))
            .args(["-f", settings.format])
            .arg(output);

        run(FFMPEG, command)?;
        Ok(())
    }

    fn probe_duration(&self, input: &Path) -> Result<f64, MediaError> {
        let mut command = Command::new(&self.ffprobe_path);
        command
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(input);

        let output = run(FFPROBE, command)?;
        parse_duration(&String::from_utf8_lossy(&output.stdout))
    }

    fn trim(&self, input: &Path, output: &Path, duration_secs: f64) -> Result<(), MediaError> {
        let mut command = self.ffmpeg();
        command
            .arg("-i")
            .arg(input)
            .arg("-t")
            .arg(format!("{:.3}", duration_secs))
            .arg(output);

        run(FFMPEG, command)?;
        Ok(())
    }
}

/// Check that `ffmpeg` can be started from `PATH`.
pub fn check_ffmpeg_binary() -> Result<(), MediaError> {
    let mut command = Command::new(FFMPEG);
    command.arg("-version");
    run(FFMPEG, command).map(|_| ())
}

fn run(tool: &'static str, mut command: Command) -> Result<Output, MediaError> {
    debug!("Running {}: {:?}", tool, command);

    let output = command.output().map_err(|source| {
        error!("Failed to start {}: {}", tool, source);
        MediaError::Spawn { tool, source }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        error!("{} failed ({}): {}", tool, output.status, stderr);
        return Err(MediaError::ToolFailed {
            tool,
            status: output.status,
            stderr,
        });
    }

    Ok(output)
}

fn parse_duration(stdout: &str) -> Result<f64, MediaError> {
    let raw = stdout.trim();
    match raw.parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > 0.0 => Ok(secs),
        _ => Err(MediaError::InvalidDuration(raw.to_string())),
    }
}
