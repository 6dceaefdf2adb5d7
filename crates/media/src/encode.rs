//! Normalizing media into a base64 payload and back.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::{debug, info};

use crate::error::MediaError;
use crate::ffmpeg::MediaTool;
use crate::BYTES_PER_MB;

/// Target encoding for submitted audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSettings {
    pub channels: u16,
    pub sample_rate: u32,
    pub bitrate_kbps: u32,
    /// Container/format name understood by ffmpeg's `-f`, also used as the
    /// temporary file extension.
    pub format: &'static str,
}

impl Default for EncodeSettings {
    /// Mono, 22.05 kHz, 32 kbit/s MP3.
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 22_050,
            bitrate_kbps: 32,
            format: "mp3",
        }
    }
}

/// Base64 audio ready to be sent inline.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedAudio {
    pub base64: String,
    /// Size of the base64 string in megabytes, unrounded.
    pub size_mb: f64,
}

/// Convert `input` with the default [`EncodeSettings`] and base64-encode the result.
pub fn encode_for_submission(
    tool: &dyn MediaTool,
    input: &Path,
) -> Result<EncodedAudio, MediaError> {
    encode_with_settings(tool, input, &EncodeSettings::default())
}

/// Convert `input` with `settings` and base64-encode the result.
///
/// The intermediate file lives in a uniquely named temporary file that is
/// removed whether or not conversion succeeds.
pub fn encode_with_settings(
    tool: &dyn MediaTool,
    input: &Path,
    settings: &EncodeSettings,
) -> Result<EncodedAudio, MediaError> {
    let temp = tempfile::Builder::new()
        .prefix("runpod-audio-")
        .suffix(&format!(".{}", settings.format))
        .tempfile()?;

    debug!("Converting {:?} -> {:?}", input, temp.path());
    tool.convert(input, temp.path(), settings)?;

    let bytes = std::fs::read(temp.path())?;
    temp.close()?;

    let base64 = BASE64.encode(&bytes);
    let size_mb = base64.len() as f64 / BYTES_PER_MB;

    info!(
        "Encoded {:?}: {} bytes of audio, {:.2} MB as base64",
        input,
        bytes.len(),
        size_mb
    );

    Ok(EncodedAudio { base64, size_mb })
}

/// Base64-encode a file's raw bytes without converting it.
pub fn encode_file(path: &Path) -> Result<String, MediaError> {
    let bytes = std::fs::read(path)?;
    Ok(BASE64.encode(bytes))
}

/// Decode a base64 string and write the raw bytes to `output`.
pub fn decode_to_file(base64: &str, output: &Path) -> Result<(), MediaError> {
    let bytes = BASE64.decode(base64.trim())?;
    std::fs::write(output, &bytes)?;
    debug!("Decoded {} bytes to {:?}", bytes.len(), output);
    Ok(())
}
