//! TriggerAction trait - what the scheduler runs on a rising edge

use std::path::PathBuf;

use crate::{ContractError, DistanceSample};

/// Outcome of one successful action run
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureReport {
    /// Lossless file written for this capture
    pub persisted: PathBuf,

    /// Whether the compressed copy reached the publication slot
    pub published: bool,
}

/// One-shot action fired on every rising edge
///
/// The scheduler awaits `fire` inline, so an implementation is never entered
/// re-entrantly.
#[trait_variant::make(TriggerAction: Send)]
pub trait LocalTriggerAction {
    /// Action name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Run the action for the sample that produced the edge
    ///
    /// # Errors
    /// Returns `ContractError::Capture` with context on failure
    async fn fire(&mut self, sample: DistanceSample) -> Result<CaptureReport, ContractError>;
}
