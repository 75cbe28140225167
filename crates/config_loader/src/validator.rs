//! Configuration validation
//!
//! Rules:
//! - sensor scale is positive; scripted sensors have readings; replay has a path
//! - mock sweep bounds and step are finite, the range is ordered and steps forward
//! - threshold and poll period are positive
//! - camera resolution is non-zero and at most `MAX_DIMENSION` per side
//! - storage directory and prefix are usable
//! - JPEG quality is within 1..=100, refresh interval is positive

use contracts::{ContractError, SensorKind, StationBlueprint};

/// Largest accepted camera width or height (px)
const MAX_DIMENSION: u32 = 8192;

/// Validate a StationBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &StationBlueprint) -> Result<(), ContractError> {
    validate_sensor(blueprint)?;
    validate_trigger(blueprint)?;
    validate_camera(blueprint)?;
    validate_storage(blueprint)?;
    validate_publish(blueprint)?;
    Ok(())
}

fn validate_sensor(blueprint: &StationBlueprint) -> Result<(), ContractError> {
    let sensor = &blueprint.sensor;

    if !(sensor.scale_to_cm.is_finite() && sensor.scale_to_cm > 0.0) {
        return Err(ContractError::config_validation(
            "sensor.scale_to_cm",
            format!("scale_to_cm must be > 0, got {}", sensor.scale_to_cm),
        ));
    }

    match sensor.kind {
        SensorKind::Mock => {
            let bounds = [
                ("sensor.sweep_min_m", sensor.sweep_min_m),
                ("sensor.sweep_max_m", sensor.sweep_max_m),
                ("sensor.sweep_step_m", sensor.sweep_step_m),
            ];
            if let Some((field, value)) = bounds.into_iter().find(|(_, v)| !v.is_finite()) {
                return Err(ContractError::config_validation(
                    field,
                    format!("must be a finite number, got {}", value),
                ));
            }
            if sensor.sweep_min_m >= sensor.sweep_max_m {
                return Err(ContractError::config_validation(
                    "sensor.sweep_min_m / sensor.sweep_max_m",
                    format!(
                        "sweep_min_m ({}) must be < sweep_max_m ({})",
                        sensor.sweep_min_m, sensor.sweep_max_m
                    ),
                ));
            }
            if sensor.sweep_step_m <= 0.0 {
                return Err(ContractError::config_validation(
                    "sensor.sweep_step_m",
                    format!("sweep_step_m must be > 0, got {}", sensor.sweep_step_m),
                ));
            }
        }
        SensorKind::Scripted => {
            if sensor.distances_m.is_empty() {
                return Err(ContractError::config_validation(
                    "sensor.distances_m",
                    "scripted sensor needs at least one reading",
                ));
            }
            if let Some((idx, d)) = sensor
                .distances_m
                .iter()
                .enumerate()
                .find(|(_, d)| !d.is_finite() || **d < 0.0)
            {
                return Err(ContractError::config_validation(
                    format!("sensor.distances_m[{}]", idx),
                    format!("reading must be a non-negative number, got {}", d),
                ));
            }
        }
        SensorKind::Replay => {
            if sensor.replay_path.is_none() {
                return Err(ContractError::config_validation(
                    "sensor.replay_path",
                    "replay sensor needs a replay_path",
                ));
            }
        }
    }
    Ok(())
}

fn validate_trigger(blueprint: &StationBlueprint) -> Result<(), ContractError> {
    let trigger = &blueprint.trigger;

    if !(trigger.threshold_cm.is_finite() && trigger.threshold_cm > 0.0) {
        return Err(ContractError::config_validation(
            "trigger.threshold_cm",
            format!("threshold_cm must be > 0, got {}", trigger.threshold_cm),
        ));
    }
    if trigger.poll_period_ms == 0 {
        return Err(ContractError::config_validation(
            "trigger.poll_period_ms",
            "poll_period_ms must be > 0",
        ));
    }
    Ok(())
}

fn validate_camera(blueprint: &StationBlueprint) -> Result<(), ContractError> {
    let camera = &blueprint.camera;
    if camera.width == 0 || camera.height == 0 {
        return Err(ContractError::config_validation(
            "camera.width / camera.height",
            format!(
                "resolution must be non-zero, got {}x{}",
                camera.width, camera.height
            ),
        ));
    }
    if camera.width > MAX_DIMENSION || camera.height > MAX_DIMENSION {
        return Err(ContractError::config_validation(
            "camera.width / camera.height",
            format!(
                "resolution must be at most {MAX_DIMENSION}x{MAX_DIMENSION}, got {}x{}",
                camera.width, camera.height
            ),
        ));
    }
    Ok(())
}

fn validate_storage(blueprint: &StationBlueprint) -> Result<(), ContractError> {
    let storage = &blueprint.storage;
    if storage.save_dir.as_os_str().is_empty() {
        return Err(ContractError::config_validation(
            "storage.save_dir",
            "save_dir cannot be empty",
        ));
    }
    if storage.file_prefix.is_empty() || storage.file_prefix.contains(['/', '\\']) {
        return Err(ContractError::config_validation(
            "storage.file_prefix",
            format!(
                "file_prefix must be a plain non-empty name, got '{}'",
                storage.file_prefix
            ),
        ));
    }
    Ok(())
}

fn validate_publish(blueprint: &StationBlueprint) -> Result<(), ContractError> {
    let publish = &blueprint.publish;
    if !(1..=100).contains(&publish.jpeg_quality) {
        return Err(ContractError::config_validation(
            "publish.jpeg_quality",
            format!("jpeg_quality must be in 1..=100, got {}", publish.jpeg_quality),
        ));
    }
    if publish.refresh_interval_ms == 0 {
        return Err(ContractError::config_validation(
            "publish.refresh_interval_ms",
            "refresh_interval_ms must be > 0",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn assert_rejected(bp: &StationBlueprint, needle: &str) {
        let result = validate(bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains(needle), "got: {err}");
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&StationBlueprint::default()).is_ok());
    }

    #[test]
    fn test_non_positive_threshold() {
        let mut bp = StationBlueprint::default();
        bp.trigger.threshold_cm = 0.0;
        assert_rejected(&bp, "threshold_cm must be > 0");
    }

    #[test]
    fn test_zero_poll_period() {
        let mut bp = StationBlueprint::default();
        bp.trigger.poll_period_ms = 0;
        assert_rejected(&bp, "poll_period_ms");
    }

    #[test]
    fn test_scripted_without_readings() {
        let mut bp = StationBlueprint::default();
        bp.sensor.kind = SensorKind::Scripted;
        assert_rejected(&bp, "at least one reading");
    }

    #[test]
    fn test_scripted_negative_reading() {
        let mut bp = StationBlueprint::default();
        bp.sensor.kind = SensorKind::Scripted;
        bp.sensor.distances_m = vec![0.3, -0.1];
        assert_rejected(&bp, "distances_m[1]");
    }

    #[test]
    fn test_replay_without_path() {
        let mut bp = StationBlueprint::default();
        bp.sensor.kind = SensorKind::Replay;
        assert_rejected(&bp, "replay_path");

        bp.sensor.replay_path = Some(PathBuf::from("distances.jsonl"));
        assert!(validate(&bp).is_ok());
    }

    #[test]
    fn test_inverted_sweep_range() {
        let mut bp = StationBlueprint::default();
        bp.sensor.sweep_min_m = 0.5;
        bp.sensor.sweep_max_m = 0.1;
        assert_rejected(&bp, "sweep_min_m");
    }

    #[test]
    fn test_non_finite_sweep() {
        let mut bp = StationBlueprint::default();
        bp.sensor.sweep_step_m = f64::NAN;
        assert_rejected(&bp, "sensor.sweep_step_m");

        let mut bp = StationBlueprint::default();
        bp.sensor.sweep_max_m = f64::INFINITY;
        assert_rejected(&bp, "sensor.sweep_max_m");
    }

    #[test]
    fn test_oversized_resolution() {
        let mut bp = StationBlueprint::default();
        bp.camera.width = MAX_DIMENSION + 1;
        assert_rejected(&bp, "resolution must be at most");

        bp.camera.width = MAX_DIMENSION;
        bp.camera.height = MAX_DIMENSION;
        assert!(validate(&bp).is_ok());
    }

    #[test]
    fn test_zero_resolution() {
        let mut bp = StationBlueprint::default();
        bp.camera.height = 0;
        assert_rejected(&bp, "resolution must be non-zero");
    }

    #[test]
    fn test_prefix_with_separator() {
        let mut bp = StationBlueprint::default();
        bp.storage.file_prefix = "../capture".into();
        assert_rejected(&bp, "file_prefix");
    }

    #[test]
    fn test_jpeg_quality_range() {
        let mut bp = StationBlueprint::default();
        bp.publish.jpeg_quality = 0;
        assert_rejected(&bp, "jpeg_quality");

        bp.publish.jpeg_quality = 101;
        assert_rejected(&bp, "jpeg_quality");

        bp.publish.jpeg_quality = 100;
        assert!(validate(&bp).is_ok());
    }
}
