//! Mock distance sensor
//!
//! Implements `DistanceSensor`, sweeping back and forth between two distances
//! so an obstacle repeatedly enters and leaves the trigger zone.
//! Used for development without the robot.

use contracts::{ContractError, DistanceSensor, SensorConfig};
use tracing::trace;

/// Mock sensor configuration
#[derive(Debug, Clone)]
pub struct MockSensorConfig {
    /// Closest distance (m)
    pub min_m: f64,
    /// Farthest distance (m)
    pub max_m: f64,
    /// Change per read (m)
    pub step_m: f64,
}

impl Default for MockSensorConfig {
    fn default() -> Self {
        Self {
            min_m: 0.10,
            max_m: 0.40,
            step_m: 0.01,
        }
    }
}

impl From<&SensorConfig> for MockSensorConfig {
    fn from(config: &SensorConfig) -> Self {
        Self {
            min_m: config.sweep_min_m,
            max_m: config.sweep_max_m,
            step_m: config.sweep_step_m,
        }
    }
}

/// Mock distance sensor
///
/// Starts at `max_m`, walks toward `min_m`, then back out. Deterministic.
pub struct MockDistanceSensor {
    name: String,
    config: MockSensorConfig,
    position_m: f64,
    approaching: bool,
    reads: u64,
}

impl MockDistanceSensor {
    /// Create new mock sensor
    pub fn new(name: impl Into<String>, config: MockSensorConfig) -> Self {
        Self {
            name: name.into(),
            position_m: config.max_m,
            approaching: true,
            config,
            reads: 0,
        }
    }

    /// Create mock sensor with default sweep
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self::new(name, MockSensorConfig::default())
    }

    /// Number of reads served
    pub fn reads(&self) -> u64 {
        self.reads
    }

    fn advance(&mut self) {
        let step = self.config.step_m;
        // Absorbs float drift so the turnaround lands exactly on the bounds.
        let slack = step * 1e-6;
        if self.approaching {
            self.position_m -= step;
            if self.position_m <= self.config.min_m + slack {
                self.position_m = self.config.min_m;
                self.approaching = false;
            }
        } else {
            self.position_m += step;
            if self.position_m >= self.config.max_m - slack {
                self.position_m = self.config.max_m;
                self.approaching = true;
            }
        }
    }
}

impl DistanceSensor for MockDistanceSensor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_distance(&mut self) -> Result<f64, ContractError> {
        let distance = self.position_m;
        self.reads += 1;
        self.advance();

        trace!(sensor = %self.name, distance_m = distance, "mock distance read");
        Ok(distance)
    }
}
