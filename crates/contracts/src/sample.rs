//! Per-tick sensing types: the distance sample and the rising-edge latch state.

use serde::{Deserialize, Serialize};

/// One distance measurement, normalized to centimeters.
///
/// Lives for a single scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DistanceSample {
    /// Distance to the nearest obstacle (cm)
    pub distance_cm: f64,
}

impl DistanceSample {
    /// Build a sample from a centimeter value
    pub fn from_cm(distance_cm: f64) -> Self {
        Self { distance_cm }
    }

    /// Build a sample from a sensor-native value and its scale to centimeters
    pub fn from_native(value: f64, scale_to_cm: f64) -> Self {
        Self {
            distance_cm: value * scale_to_cm,
        }
    }

    /// Strict "closer than" test
    pub fn is_within(&self, threshold_cm: f64) -> bool {
        self.distance_cm < threshold_cm
    }
}

/// Result of classifying one boolean sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeEvent {
    /// No transition worth acting on
    None,
    /// LOW -> HIGH
    Rising,
}

impl EdgeEvent {
    pub fn is_rising(self) -> bool {
        matches!(self, Self::Rising)
    }
}

/// Two-field latch: last classified value and the value being classified.
///
/// Starts LOW/LOW.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeState {
    pub previous: bool,
    pub current: bool,
}
