//! Error types for CLI operations.

use thiserror::Error;

/// Errors surfaced while bringing up or running the station
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Configuration parse / validation error
    #[error("Configuration error: {0}")]
    Config(#[from] contracts::ContractError),

    /// Sensor or camera bring-up failed
    #[error("Device error: {0}")]
    Device(#[from] devices::DeviceError),

    /// Capture directory or capture pipeline error
    #[error("Capture error: {0}")]
    Capture(#[from] capture::CaptureError),

    /// HTTP endpoint error
    #[error("Publisher error: {0}")]
    Publisher(#[from] publisher::PublisherError),

    /// Polling loop gave up
    #[error("Trigger error: {0}")]
    Trigger(#[from] trigger::TriggerError),

    /// Generic error wrapper
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
