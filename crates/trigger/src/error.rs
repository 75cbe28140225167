//! Trigger error types

use thiserror::Error;

/// Errors that stop the polling loop
#[derive(Debug, Error)]
pub enum TriggerError {
    /// The sensor kept failing past the configured limit
    #[error("sensor '{sensor}' failed {count} consecutive reads, giving up")]
    SensorFailuresExceeded { sensor: String, count: u32 },
}

impl TriggerError {
    /// Create a sensor-failure-limit error
    pub fn sensor_failures_exceeded(sensor: impl Into<String>, count: u32) -> Self {
        Self::SensorFailuresExceeded {
            sensor: sensor.into(),
            count,
        }
    }
}

/// Result type alias for trigger operations
pub type Result<T> = std::result::Result<T, TriggerError>;
