//! FrameStore - lossless PNG files in a flat directory
//!
//! Files are named by local wall-clock time at microsecond resolution, so a
//! plain directory listing sorts them chronologically. Nothing is ever
//! overwritten on purpose or deleted.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use contracts::{CapturedFrame, StorageConfig};
use tracing::{debug, info};

use crate::error::{CaptureError, Result};

/// `<prefix>_<YYYYMMDD_HHMMSS_ffffff>.png`
pub fn capture_filename(prefix: &str, captured_at: &DateTime<Local>) -> String {
    format!("{}_{}.png", prefix, captured_at.format("%Y%m%d_%H%M%S_%6f"))
}

/// Writes captured frames to durable storage
#[derive(Debug, Clone)]
pub struct FrameStore {
    dir: PathBuf,
    prefix: String,
}

impl FrameStore {
    /// Create the store, creating the directory if absent
    pub fn new(config: &StorageConfig) -> Result<Self> {
        fs::create_dir_all(&config.save_dir)
            .map_err(|e| CaptureError::persist(&config.save_dir, e.to_string()))?;

        info!(dir = %config.save_dir.display(), "Frame store ready");
        Ok(Self {
            dir: config.save_dir.clone(),
            prefix: config.file_prefix.clone(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path a capture taken at `captured_at` is written to
    pub fn path_for(&self, captured_at: &DateTime<Local>) -> PathBuf {
        self.dir.join(capture_filename(&self.prefix, captured_at))
    }

    /// Write `frame` as RGB PNG
    pub fn persist(&self, frame: &CapturedFrame, captured_at: &DateTime<Local>) -> Result<PathBuf> {
        let path = self.path_for(captured_at);
        frame
            .validate()
            .map_err(|e| CaptureError::persist(&path, e.to_string()))?;

        let rgb = frame.to_rgb();
        image::save_buffer(
            &path,
            &rgb,
            frame.width,
            frame.height,
            image::ColorType::Rgb8,
        )
        .map_err(|e| CaptureError::persist(&path, e.to_string()))?;

        debug!(path = %path.display(), "Frame persisted");
        Ok(path)
    }
}
