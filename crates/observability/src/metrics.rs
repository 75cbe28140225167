//! Station metrics
//!
//! Recorders for the polling chain and the publication endpoint, plus an
//! online statistics helper for end-of-run summaries.

use metrics::{counter, gauge, histogram};

/// Record one completed sensor read
pub fn record_tick(sensor: &str, distance_cm: f64) {
    counter!("obstacle_cam_ticks_total", "sensor" => sensor.to_string()).increment(1);
    gauge!("obstacle_cam_distance_cm", "sensor" => sensor.to_string()).set(distance_cm);
    histogram!("obstacle_cam_distance_cm_hist").record(distance_cm);
}

/// Record a LOW -> HIGH transition
pub fn record_rising_edge() {
    counter!("obstacle_cam_rising_edges_total").increment(1);
}

/// Record a finished capture
///
/// `published = false` means the lossless file was written but the compressed
/// copy could not be produced.
pub fn record_capture(published: bool, duration_ms: f64) {
    counter!("obstacle_cam_captures_total").increment(1);
    if published {
        counter!("obstacle_cam_publications_total").increment(1);
    } else {
        counter!("obstacle_cam_encode_failures_total").increment(1);
    }
    histogram!("obstacle_cam_capture_duration_ms").record(duration_ms);
}

/// Record a capture that did not produce a persisted file
pub fn record_capture_failure() {
    counter!("obstacle_cam_capture_failures_total").increment(1);
}

/// Record a failed sensor read and the current failure streak
pub fn record_sensor_failure(sensor: &str, consecutive: u32) {
    counter!("obstacle_cam_sensor_failures_total", "sensor" => sensor.to_string()).increment(1);
    gauge!("obstacle_cam_sensor_consecutive_failures").set(consecutive as f64);
}

/// Record an artifact read from the endpoint
pub fn record_artifact_request(available: bool) {
    let status = if available { "served" } else { "not_ready" };
    counter!("obstacle_cam_artifact_requests_total", "status" => status).increment(1);
}

/// Statistics summary
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Add a value
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary::from(self)
    }
}
