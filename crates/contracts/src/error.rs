//! Layered error definitions
//!
//! Categorized by source: config / sensor / camera / capture

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Collaborator Errors =====
    /// Distance sensor read failed
    #[error("sensor '{sensor}' read error: {message}")]
    SensorRead { sensor: String, message: String },

    /// Camera lifecycle or acquisition failed
    #[error("camera '{camera}' error: {message}")]
    Camera { camera: String, message: String },

    /// Frame buffer does not match its declared geometry
    #[error("invalid frame: {message}")]
    InvalidFrame { message: String },

    // ===== Action Errors =====
    /// Trigger action failed (camera, persistence)
    #[error("action '{action}' failed: {message}")]
    Capture { action: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create sensor read error
    pub fn sensor_read(sensor: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SensorRead {
            sensor: sensor.into(),
            message: message.into(),
        }
    }

    /// Create camera error
    pub fn camera(camera: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Camera {
            camera: camera.into(),
            message: message.into(),
        }
    }

    /// Create trigger action error
    pub fn capture(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Capture {
            action: action.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from the distance sensor
    pub fn is_sensor_read(&self) -> bool {
        matches!(self, Self::SensorRead { .. })
    }
}
