//! Scheduler counters

use std::path::PathBuf;

use observability::RunningStats;

/// What happened over one scheduler run
#[derive(Debug, Clone, Default)]
pub struct SchedulerStats {
    pub ticks: u64,
    pub rising_edges: u64,
    pub captures: u64,
    /// Captures whose compressed copy reached the publication slot
    pub publications: u64,
    pub sensor_failures: u64,
    pub capture_failures: u64,
    /// Distance distribution over successful reads (cm)
    pub distance: RunningStats,
    pub last_capture: Option<PathBuf>,
}

impl SchedulerStats {
    /// Captures that were persisted but not published
    pub fn encode_failures(&self) -> u64 {
        self.captures - self.publications
    }
}
