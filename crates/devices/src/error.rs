//! Device error types

use contracts::ContractError;
use std::path::PathBuf;
use thiserror::Error;

/// Device-specific error
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Replay recording could not be loaded
    #[error("failed to load replay '{path}': {message}")]
    ReplayLoad { path: PathBuf, message: String },

    /// Replay recording has no usable records
    #[error("replay '{path}' contains no readings")]
    EmptyReplay { path: PathBuf },

    /// Wrapped ContractError
    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl DeviceError {
    /// Create replay load error
    pub fn replay_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ReplayLoad {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, DeviceError>;
