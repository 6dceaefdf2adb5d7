//! Audio preprocessing for transcription job submission.
//!
//! This crate turns arbitrary audio or video files into a compact,
//! base64-encoded audio payload and can shrink oversized files to a target
//! size. All decoding and encoding is delegated to the external `ffmpeg`
//! and `ffprobe` tools through the [`MediaTool`] trait.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use runpod_transcribe_media::{encode_for_submission, trim_to_size, Ffmpeg};
//!
//! fn main() -> Result<(), runpod_transcribe_media::MediaError> {
//!     let ffmpeg = Ffmpeg::default();
//!     let path = trim_to_size(&ffmpeg, Path::new("interview.mp3"), 10.0)?;
//!     let encoded = encode_for_submission(&ffmpeg, &path)?;
//!     println!("payload is {:.2} MB", encoded.size_mb);
//!     Ok(())
//! }
//! ```

mod encode;
mod error;
mod ffmpeg;
mod size;

pub use encode::{
    decode_to_file, encode_file, encode_for_submission, encode_with_settings, EncodeSettings,
    EncodedAudio,
};
pub use error::MediaError;
pub use ffmpeg::{check_ffmpeg_binary, Ffmpeg, MediaTool};
pub use size::{file_size_mb, trim_to_size};

/// Bytes per megabyte used for every size computation in this crate.
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
