//! # Contracts
//!
//! Frozen interface contracts shared by every station crate: data types,
//! collaborator traits and the unified error type.
//! Business crates depend on this crate only, reverse dependencies are prohibited.
//!
//! ## Units
//! - Sensors report meters; everything past the sampler works in centimeters
//! - Frames are 8 bits per channel, three channels, tightly packed

mod action;
mod blueprint;
mod device;
mod error;
mod frame;
mod sample;

pub use action::{CaptureReport, LocalTriggerAction, TriggerAction};
pub use blueprint::*;
pub use device::{Camera, DistanceSensor, LocalCamera, LocalDistanceSensor};
pub use error::*;
pub use frame::{CapturedFrame, PixelLayout};
pub use sample::{DistanceSample, EdgeEvent, EdgeState};
