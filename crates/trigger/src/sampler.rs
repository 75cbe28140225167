//! ConditionSampler - sensor read reduced to a trigger condition

use contracts::{ContractError, DistanceSample, DistanceSensor};
use tracing::trace;

/// Reads the distance sensor and decides whether an obstacle is close
pub struct ConditionSampler<S> {
    sensor: S,
    scale_to_cm: f64,
    threshold_cm: f64,
}

impl<S: DistanceSensor> ConditionSampler<S> {
    /// `scale_to_cm` converts the sensor's native unit to centimeters
    pub fn new(sensor: S, scale_to_cm: f64, threshold_cm: f64) -> Self {
        Self {
            sensor,
            scale_to_cm,
            threshold_cm,
        }
    }

    /// Take one sample. Errors propagate untouched, there is no retry here.
    pub async fn sample(&mut self) -> Result<DistanceSample, ContractError> {
        let native = self.sensor.read_distance().await?;
        let sample = DistanceSample::from_native(native, self.scale_to_cm);
        trace!(
            sensor = %self.sensor.name(),
            distance_cm = sample.distance_cm,
            "distance sampled"
        );
        Ok(sample)
    }

    /// `distance < threshold` (strict)
    pub fn is_triggered(&self, sample: &DistanceSample) -> bool {
        sample.is_within(self.threshold_cm)
    }

    pub fn threshold_cm(&self) -> f64 {
        self.threshold_cm
    }

    pub fn sensor_name(&self) -> &str {
        self.sensor.name()
    }
}
