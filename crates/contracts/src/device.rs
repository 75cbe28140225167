//! Collaborator traits - the hardware edge of the station
//!
//! Sensor and camera drivers are external. The core only relies on these
//! contracts, so mock, scripted and real drivers are interchangeable.

use crate::{CameraConfig, CapturedFrame, ContractError};

/// Distance sensor contract
///
/// A read is treated as an opaque blocking call bounded by hardware response
/// time. No timeout is applied by callers.
#[trait_variant::make(DistanceSensor: Send)]
pub trait LocalDistanceSensor {
    /// Sensor name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Read one distance in the sensor's native unit (meters)
    ///
    /// # Errors
    /// Returns `ContractError::SensorRead` when the device cannot be read
    async fn read_distance(&mut self) -> Result<f64, ContractError>;
}

/// Camera contract
///
/// Lifecycle is `configure` -> `start` -> `capture_frame`* -> `stop`.
#[trait_variant::make(Camera: Send)]
pub trait LocalCamera {
    /// Camera name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Apply resolution / pixel layout. Must be called before `start`.
    fn configure(&mut self, config: &CameraConfig) -> Result<(), ContractError>;

    /// Start streaming
    async fn start(&mut self) -> Result<(), ContractError>;

    /// Acquire one frame in the native channel order
    async fn capture_frame(&mut self) -> Result<CapturedFrame, ContractError>;

    /// Stop streaming
    async fn stop(&mut self) -> Result<(), ContractError>;
}
