//! Capture error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors from one capture run
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Camera could not deliver a frame
    #[error("camera '{camera}' failed: {message}")]
    Camera { camera: String, message: String },

    /// Lossless file could not be written
    #[error("failed to persist '{path}': {message}")]
    Persist { path: PathBuf, message: String },

    /// Compressed copy could not be produced
    #[error("encode failed: {message}")]
    Encode { message: String },
}

impl CaptureError {
    /// Create a camera error
    pub fn camera(camera: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Camera {
            camera: camera.into(),
            message: message.into(),
        }
    }

    /// Create a persistence error
    pub fn persist(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Persist {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an encode error
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }
}

/// Result type alias for capture operations
pub type Result<T> = std::result::Result<T, CaptureError>;
