//! Scripted / replayed distance sensor
//!
//! Plays back a fixed list of readings, one per read. Readings come either
//! straight from configuration or from a JSONL recording with one
//! `{"distance_m": <f64>}` object per line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use contracts::{ContractError, DistanceSensor};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{DeviceError, Result};

/// One line of a replay recording
#[derive(Debug, Deserialize)]
struct DistanceRecord {
    distance_m: f64,
}

/// Scripted distance sensor
///
/// A non-looping script that runs out fails every further read, which the
/// scheduler treats like any other sensor read failure.
pub struct ScriptedDistanceSensor {
    name: String,
    readings: Vec<f64>,
    cursor: usize,
    loop_playback: bool,
}

impl ScriptedDistanceSensor {
    /// Create from readings in meters
    pub fn new(name: impl Into<String>, readings: Vec<f64>, loop_playback: bool) -> Self {
        Self {
            name: name.into(),
            readings,
            cursor: 0,
            loop_playback,
        }
    }

    /// Create from centimeter readings (convenient for tests and demos)
    pub fn from_cm(name: impl Into<String>, readings_cm: &[f64]) -> Self {
        let readings = readings_cm.iter().map(|cm| cm / 100.0).collect();
        Self::new(name, readings, false)
    }

    /// Load readings from a JSONL recording
    pub fn load_replay(
        path: &Path,
        name: impl Into<String>,
        loop_playback: bool,
    ) -> Result<Self> {
        let file = File::open(path).map_err(|e| DeviceError::replay_load(path, e.to_string()))?;
        let reader = BufReader::new(file);

        let mut readings = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| DeviceError::replay_load(path, e.to_string()))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let record: DistanceRecord = serde_json::from_str(line).map_err(|e| {
                DeviceError::replay_load(path, format!("line {}: {}", line_no + 1, e))
            })?;
            readings.push(record.distance_m);
        }

        if readings.is_empty() {
            return Err(DeviceError::EmptyReplay {
                path: path.to_path_buf(),
            });
        }

        let name = name.into();
        info!(
            sensor = %name,
            path = %path.display(),
            readings = readings.len(),
            "Loaded replay sensor"
        );

        Ok(Self::new(name, readings, loop_playback))
    }

    /// Readings not yet served in the current pass
    pub fn remaining(&self) -> usize {
        self.readings.len().saturating_sub(self.cursor)
    }
}

impl DistanceSensor for ScriptedDistanceSensor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_distance(&mut self) -> std::result::Result<f64, ContractError> {
        if self.cursor >= self.readings.len() {
            if self.loop_playback && !self.readings.is_empty() {
                debug!(sensor = %self.name, "Looping scripted readings");
                self.cursor = 0;
            } else {
                return Err(ContractError::sensor_read(
                    &self.name,
                    format!("script exhausted after {} readings", self.readings.len()),
                ));
            }
        }

        let distance = self.readings[self.cursor];
        self.cursor += 1;
        Ok(distance)
    }
}
