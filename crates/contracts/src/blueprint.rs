//! StationBlueprint - Config Loader output
//!
//! Describes the full station: sensor, trigger policy, camera, storage and
//! publication. Every section is defaulted, so an empty file is a valid
//! configuration for the reference robot.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::PixelLayout;

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete station configuration blueprint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Distance sensor
    #[serde(default)]
    pub sensor: SensorConfig,

    /// Polling / edge policy
    #[serde(default)]
    pub trigger: TriggerConfig,

    /// Camera
    #[serde(default)]
    pub camera: CameraConfig,

    /// Durable storage for lossless captures
    #[serde(default)]
    pub storage: StorageConfig,

    /// HTTP publication
    #[serde(default)]
    pub publish: PublishConfig,
}

// ===== Sensor =====

/// Which distance sensor driver to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    /// Synthetic sweep toward and away from an obstacle
    #[default]
    Mock,
    /// Fixed list of readings from `distances_m`
    Scripted,
    /// Readings loaded from a JSONL recording at `replay_path`
    Replay,
}

/// Distance sensor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Name used in logs and metrics
    #[serde(default = "default_sensor_name")]
    pub name: String,

    /// Driver kind
    #[serde(default)]
    pub kind: SensorKind,

    /// Factor from the native unit to centimeters (meters -> cm)
    #[serde(default = "default_scale_to_cm")]
    pub scale_to_cm: f64,

    /// Scripted readings (meters)
    #[serde(default)]
    pub distances_m: Vec<f64>,

    /// Replay recording (JSONL, one `{"distance_m": ..}` per line)
    #[serde(default)]
    pub replay_path: Option<PathBuf>,

    /// Restart scripted / replayed readings when exhausted
    #[serde(default)]
    pub loop_playback: bool,

    /// Mock sweep: closest distance (meters)
    #[serde(default = "default_sweep_min_m")]
    pub sweep_min_m: f64,

    /// Mock sweep: farthest distance (meters)
    #[serde(default = "default_sweep_max_m")]
    pub sweep_max_m: f64,

    /// Mock sweep: change per read (meters)
    #[serde(default = "default_sweep_step_m")]
    pub sweep_step_m: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            name: default_sensor_name(),
            kind: SensorKind::default(),
            scale_to_cm: default_scale_to_cm(),
            distances_m: Vec::new(),
            replay_path: None,
            loop_playback: false,
            sweep_min_m: default_sweep_min_m(),
            sweep_max_m: default_sweep_max_m(),
            sweep_step_m: default_sweep_step_m(),
        }
    }
}

fn default_sensor_name() -> String {
    "ultrasonic".to_string()
}

fn default_scale_to_cm() -> f64 {
    100.0
}

fn default_sweep_min_m() -> f64 {
    0.10
}

fn default_sweep_max_m() -> f64 {
    0.40
}

fn default_sweep_step_m() -> f64 {
    0.01
}

// ===== Trigger =====

/// Polling and edge policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Obstacle threshold (cm). Triggered when `distance < threshold_cm`.
    #[serde(default = "default_threshold_cm")]
    pub threshold_cm: f64,

    /// Poll period (ms)
    #[serde(default = "default_poll_period_ms")]
    pub poll_period_ms: u64,

    /// Give up after this many consecutive sensor failures (0 = never)
    #[serde(default)]
    pub max_consecutive_sensor_failures: u32,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            threshold_cm: default_threshold_cm(),
            poll_period_ms: default_poll_period_ms(),
            max_consecutive_sensor_failures: 0,
        }
    }
}

fn default_threshold_cm() -> f64 {
    20.0
}

fn default_poll_period_ms() -> u64 {
    100
}

// ===== Camera =====

/// Which camera driver to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraKind {
    /// Synthetic test pattern
    #[default]
    Mock,
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Name used in logs and metrics
    #[serde(default = "default_camera_name")]
    pub name: String,

    /// Driver kind
    #[serde(default)]
    pub kind: CameraKind,

    /// Frame width
    #[serde(default = "default_width")]
    pub width: u32,

    /// Frame height
    #[serde(default = "default_height")]
    pub height: u32,

    /// Native channel order delivered by the driver
    #[serde(default)]
    pub layout: PixelLayout,

    /// Settling delay after `start` (ms)
    #[serde(default = "default_warmup_ms")]
    pub warmup_ms: u64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            name: default_camera_name(),
            kind: CameraKind::default(),
            width: default_width(),
            height: default_height(),
            layout: PixelLayout::default(),
            warmup_ms: default_warmup_ms(),
        }
    }
}

fn default_camera_name() -> String {
    "picam".to_string()
}

fn default_width() -> u32 {
    320
}

fn default_height() -> u32 {
    240
}

fn default_warmup_ms() -> u64 {
    1000
}

// ===== Storage =====

/// Lossless capture storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Flat output directory, created at startup if absent
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,

    /// File name prefix, followed by `_<timestamp>.png`
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_dir: default_save_dir(),
            file_prefix: default_file_prefix(),
        }
    }
}

fn default_save_dir() -> PathBuf {
    PathBuf::from("/tmp/ros2_oneshot_images")
}

fn default_file_prefix() -> String {
    "capture".to_string()
}

// ===== Publish =====

/// HTTP publication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Listen address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: IpAddr,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JPEG quality for the published copy (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Viewer page image refresh interval (ms)
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
}

impl PublishConfig {
    /// Socket address to bind
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            jpeg_quality: default_jpeg_quality(),
            refresh_interval_ms: default_refresh_interval_ms(),
        }
    }
}

fn default_bind_addr() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    5000
}

fn default_jpeg_quality() -> u8 {
    95
}

fn default_refresh_interval_ms() -> u64 {
    500
}
