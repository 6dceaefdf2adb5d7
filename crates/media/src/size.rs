use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::MediaError;
use crate::ffmpeg::MediaTool;
use crate::BYTES_PER_MB;

/// File size in megabytes, rounded to two decimal places.
pub fn file_size_mb(path: &Path) -> Result<f64, MediaError> {
    let bytes = std::fs::metadata(path)?.len();
    Ok((bytes as f64 / BYTES_PER_MB * 100.0).round() / 100.0)
}

/// Shrink `path` in place so it is roughly `target_mb` megabytes.
///
/// Files already at or below the target are returned untouched. Otherwise
/// the file is cut to `target_mb / current_mb * duration` seconds. This
/// assumes a constant bitrate and the result is not measured again, so
/// variable-bitrate sources may land above or below the target.
///
/// A target that is not a positive finite number is rejected before the
/// file is touched.
pub fn trim_to_size(
    tool: &dyn MediaTool,
    path: &Path,
    target_mb: f64,
) -> Result<PathBuf, MediaError> {
    if !target_mb.is_finite() || target_mb <= 0.0 {
        return Err(MediaError::InvalidTarget(target_mb));
    }

    let current_mb = file_size_mb(path)?;
    if current_mb <= target_mb {
        debug!(
            "{:?} is {:.2} MB, within {:.2} MB target",
            path, current_mb, target_mb
        );
        return Ok(path.to_path_buf());
    }

    let duration = tool.probe_duration(path)?;
    let target_duration = target_mb / current_mb * duration;

    info!(
        "Trimming {:?} from {:.2} MB / {:.1}s to {:.1}s for {:.2} MB target",
        path, current_mb, duration, target_duration, target_mb
    );

    // Sibling temp file keeps the extension so ffmpeg picks the same format,
    // and lives on the same filesystem so the final rename is atomic.
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let suffix = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let temp = tempfile::Builder::new()
        .prefix(".trim-")
        .suffix(&suffix)
        .tempfile_in(parent)?;

    tool.trim(path, temp.path(), target_duration)?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(path.to_path_buf())
}
