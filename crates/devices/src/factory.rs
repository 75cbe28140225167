//! DeviceFactory - builds collaborators from the blueprint
//!
//! Async trait methods are not object safe, so drivers are wrapped in enums
//! instead of boxed; the scheduler stays generic over a concrete type.

use std::time::Duration;

use contracts::{
    Camera, CameraConfig, CameraKind, CapturedFrame, ContractError, DistanceSensor, SensorConfig,
    SensorKind,
};
use tracing::{info, instrument};

use crate::error::{DeviceError, Result};
use crate::mock_camera::MockCamera;
use crate::mock_sensor::{MockDistanceSensor, MockSensorConfig};
use crate::scripted_sensor::ScriptedDistanceSensor;

/// Any supported distance sensor
pub enum AnyDistanceSensor {
    Mock(MockDistanceSensor),
    Scripted(ScriptedDistanceSensor),
}

impl DistanceSensor for AnyDistanceSensor {
    fn name(&self) -> &str {
        match self {
            Self::Mock(s) => s.name(),
            Self::Scripted(s) => s.name(),
        }
    }

    async fn read_distance(&mut self) -> std::result::Result<f64, ContractError> {
        match self {
            Self::Mock(s) => s.read_distance().await,
            Self::Scripted(s) => s.read_distance().await,
        }
    }
}

/// Any supported camera
pub enum AnyCamera {
    Mock(MockCamera),
}

impl Camera for AnyCamera {
    fn name(&self) -> &str {
        match self {
            Self::Mock(c) => c.name(),
        }
    }

    fn configure(&mut self, config: &CameraConfig) -> std::result::Result<(), ContractError> {
        match self {
            Self::Mock(c) => c.configure(config),
        }
    }

    async fn start(&mut self) -> std::result::Result<(), ContractError> {
        match self {
            Self::Mock(c) => c.start().await,
        }
    }

    async fn capture_frame(&mut self) -> std::result::Result<CapturedFrame, ContractError> {
        match self {
            Self::Mock(c) => c.capture_frame().await,
        }
    }

    async fn stop(&mut self) -> std::result::Result<(), ContractError> {
        match self {
            Self::Mock(c) => c.stop().await,
        }
    }
}

/// Device Factory
pub struct DeviceFactory;

impl DeviceFactory {
    /// Build the distance sensor described by `config`
    ///
    /// Replay recordings are read eagerly so a bad file fails at startup.
    #[instrument(name = "device_factory_sensor", skip(config), fields(kind = ?config.kind))]
    pub fn sensor_from_config(config: &SensorConfig) -> Result<AnyDistanceSensor> {
        let sensor = match config.kind {
            SensorKind::Mock => AnyDistanceSensor::Mock(MockDistanceSensor::new(
                &config.name,
                MockSensorConfig::from(config),
            )),
            SensorKind::Scripted => AnyDistanceSensor::Scripted(ScriptedDistanceSensor::new(
                &config.name,
                config.distances_m.clone(),
                config.loop_playback,
            )),
            SensorKind::Replay => {
                let path = config.replay_path.as_deref().ok_or_else(|| {
                    DeviceError::Contract(ContractError::config_validation(
                        "sensor.replay_path",
                        "replay sensor needs a replay_path",
                    ))
                })?;
                AnyDistanceSensor::Scripted(ScriptedDistanceSensor::load_replay(
                    path,
                    &config.name,
                    config.loop_playback,
                )?)
            }
        };

        info!(sensor = %sensor.name(), kind = ?config.kind, "Distance sensor ready");
        Ok(sensor)
    }

    /// Build the camera described by `config` (not yet configured)
    pub fn camera_from_config(config: &CameraConfig) -> AnyCamera {
        match config.kind {
            CameraKind::Mock => AnyCamera::Mock(MockCamera::new(&config.name)),
        }
    }

    /// Configure, start and let the camera settle for `warmup_ms`
    #[instrument(name = "device_factory_bring_up_camera", skip(camera, config))]
    pub async fn bring_up_camera<C: Camera>(camera: &mut C, config: &CameraConfig) -> Result<()> {
        camera.configure(config)?;
        camera.start().await?;

        if config.warmup_ms > 0 {
            tokio::time::sleep(Duration::from_millis(config.warmup_ms)).await;
        }

        info!(
            camera = %camera.name(),
            width = config.width,
            height = config.height,
            layout = ?config.layout,
            "Camera started"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_scripted_from_config() {
        let config = SensorConfig {
            kind: SensorKind::Scripted,
            distances_m: vec![0.5],
            ..Default::default()
        };
        let mut sensor = DeviceFactory::sensor_from_config(&config).unwrap();
        assert!(matches!(sensor, AnyDistanceSensor::Scripted(_)));
        assert_eq!(sensor.name(), "ultrasonic");
        assert_eq!(sensor.read_distance().await.unwrap(), 0.5);
    }

    #[test]
    fn test_mock_is_default() {
        let sensor = DeviceFactory::sensor_from_config(&SensorConfig::default()).unwrap();
        assert!(matches!(sensor, AnyDistanceSensor::Mock(_)));
    }

    #[test]
    fn test_replay_missing_file() {
        let config = SensorConfig {
            kind: SensorKind::Replay,
            replay_path: Some(PathBuf::from("/nonexistent/distances.jsonl")),
            ..Default::default()
        };
        let err = DeviceFactory::sensor_from_config(&config).err().unwrap();
        assert!(matches!(err, DeviceError::ReplayLoad { .. }));
    }

    #[tokio::test]
    async fn test_bring_up_camera() {
        let config = CameraConfig {
            warmup_ms: 0,
            ..Default::default()
        };
        let mut camera = DeviceFactory::camera_from_config(&config);
        DeviceFactory::bring_up_camera(&mut camera, &config)
            .await
            .unwrap();

        let frame = camera.capture_frame().await.unwrap();
        assert_eq!(frame.expected_len(), frame.data.len());
        camera.stop().await.unwrap();
    }
}
