//! EdgeDetector - boolean stream to rising-edge events

use contracts::{EdgeEvent, EdgeState};

/// Two-field LOW/HIGH latch
///
/// Only LOW -> HIGH is reported. Holding HIGH never re-fires; the condition
/// has to drop back to LOW first.
#[derive(Debug, Default)]
pub struct EdgeDetector {
    state: EdgeState,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one sample. `current` always becomes `previous` afterwards.
    pub fn classify(&mut self, triggered: bool) -> EdgeEvent {
        self.state.current = triggered;
        let event = if self.state.current && !self.state.previous {
            EdgeEvent::Rising
        } else {
            EdgeEvent::None
        };
        self.state.previous = self.state.current;
        event
    }

    /// Snapshot of the latch for diagnostics
    pub fn state(&self) -> EdgeState {
        self.state
    }
}
