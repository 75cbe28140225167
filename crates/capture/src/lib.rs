//! # Capture
//!
//! What happens on a rising edge: one frame from the camera, a lossless PNG
//! on disk and a JPEG copy in the shared publication slot.
//!
//! ## Example
//!
//! ```ignore
//! use capture::{CaptureAction, FrameStore, JpegEncoder, LatestArtifactStore};
//!
//! let artifacts = LatestArtifactStore::new();
//! let frames = FrameStore::new(&blueprint.storage)?;
//! let action = CaptureAction::new(camera, frames, JpegEncoder::new(95), artifacts.clone());
//! ```

mod action;
mod encoder;
mod error;
mod frame_store;
mod store;

pub use action::CaptureAction;
pub use encoder::{ArtifactEncoder, JpegEncoder};
pub use error::{CaptureError, Result};
pub use frame_store::{capture_filename, FrameStore};
pub use store::{LatestArtifactStore, PublishedArtifact};
