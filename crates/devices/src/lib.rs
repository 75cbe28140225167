//! # Devices
//!
//! Collaborator implementations for the station.
//!
//! Responsibilities:
//! - Distance sensors: synthetic sweep, scripted readings, JSONL replay
//! - Camera: lifecycle-checked synthetic test pattern
//! - Build the sensor/camera pair from a `StationBlueprint`
//!
//! Hardware drivers plug in by implementing `contracts::DistanceSensor` and
//! `contracts::Camera`; the enum wrappers keep the scheduler statically typed.

pub mod error;
pub mod factory;
pub mod mock_camera;
pub mod mock_sensor;
pub mod scripted_sensor;

pub use contracts::{Camera, DistanceSensor};
pub use error::{DeviceError, Result};
pub use factory::{AnyCamera, AnyDistanceSensor, DeviceFactory};
pub use mock_camera::MockCamera;
pub use mock_sensor::{MockDistanceSensor, MockSensorConfig};
pub use scripted_sensor::ScriptedDistanceSensor;
