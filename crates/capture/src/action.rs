//! CaptureAction - one frame in, one PNG and (maybe) one published JPEG out

use chrono::Local;
use contracts::{Camera, CaptureReport, ContractError, DistanceSample, TriggerAction};
use tracing::{instrument, warn};

use crate::encoder::ArtifactEncoder;
use crate::error::{CaptureError, Result};
use crate::frame_store::FrameStore;
use crate::store::LatestArtifactStore;

/// One-shot capture fired on every rising edge
///
/// The camera is expected to be started already. Encode failures only skip
/// publication; the PNG written for the same capture stays.
pub struct CaptureAction<C, E> {
    camera: C,
    frames: FrameStore,
    encoder: E,
    artifacts: LatestArtifactStore,
}

impl<C: Camera + Send, E: ArtifactEncoder> CaptureAction<C, E> {
    pub fn new(camera: C, frames: FrameStore, encoder: E, artifacts: LatestArtifactStore) -> Self {
        Self {
            camera,
            frames,
            encoder,
            artifacts,
        }
    }

    /// Acquire, persist, encode, publish
    #[instrument(name = "capture_action_run", skip(self), fields(camera = %self.camera.name()))]
    pub async fn run(&mut self) -> Result<CaptureReport> {
        let frame = self
            .camera
            .capture_frame()
            .await
            .map_err(|e| CaptureError::camera(self.camera.name(), e.to_string()))?;
        let captured_at = Local::now();

        let persisted = self.frames.persist(&frame, &captured_at)?;

        let published = match self.encoder.encode(&frame) {
            Ok(bytes) => {
                let content_type = self.encoder.content_type();
                self.artifacts.publish(bytes, content_type, captured_at, persisted.clone());
                true
            }
            Err(e) => {
                warn!(
                    path = %persisted.display(),
                    error = %e,
                    "Encode failed, capture kept on disk but not published"
                );
                false
            }
        };

        Ok(CaptureReport {
            persisted,
            published,
        })
    }

    /// Stop the camera
    pub async fn shutdown(&mut self) -> Result<()> {
        self.camera
            .stop()
            .await
            .map_err(|e| CaptureError::camera(self.camera.name(), e.to_string()))
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn artifacts(&self) -> &LatestArtifactStore {
        &self.artifacts
    }
}

impl<C: Camera + Send, E: ArtifactEncoder> TriggerAction for CaptureAction<C, E> {
    fn name(&self) -> &str {
        "capture"
    }

    async fn fire(
        &mut self,
        _sample: DistanceSample,
    ) -> std::result::Result<CaptureReport, ContractError> {
        self.run()
            .await
            .map_err(|e| ContractError::capture("capture", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::JpegEncoder;
    use bytes::Bytes;
    use contracts::{CameraConfig, CapturedFrame, StorageConfig};
    use devices::MockCamera;
    use std::path::Path;

    struct FailingEncoder;

    impl ArtifactEncoder for FailingEncoder {
        fn content_type(&self) -> &'static str {
            "image/jpeg"
        }

        fn encode(&self, _frame: &CapturedFrame) -> Result<Bytes> {
            Err(CaptureError::encode("forced failure"))
        }
    }

    /// Publishes the raw RGB bytes
    struct RawEncoder;

    impl ArtifactEncoder for RawEncoder {
        fn content_type(&self) -> &'static str {
            "application/octet-stream"
        }

        fn encode(&self, frame: &CapturedFrame) -> Result<Bytes> {
            Ok(Bytes::copy_from_slice(&frame.to_rgb()))
        }
    }

    async fn started_camera() -> MockCamera {
        let mut camera = MockCamera::new("cam");
        camera
            .configure(&CameraConfig {
                width: 32,
                height: 24,
                warmup_ms: 0,
                ..Default::default()
            })
            .unwrap();
        camera.start().await.unwrap();
        camera
    }

    fn frame_store(dir: &Path) -> FrameStore {
        FrameStore::new(&StorageConfig {
            save_dir: dir.to_path_buf(),
            ..Default::default()
        })
        .unwrap()
    }

    fn png_count(dir: &Path) -> usize {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|x| x == "png"))
            .count()
    }

    #[tokio::test]
    async fn test_capture_persists_and_publishes() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LatestArtifactStore::new();
        let mut action = CaptureAction::new(
            started_camera().await,
            frame_store(tmp.path()),
            JpegEncoder::default(),
            store.clone(),
        );

        let report = action.run().await.unwrap();
        assert!(report.published);
        assert!(report.persisted.exists());
        assert_eq!(report.persisted.parent(), Some(tmp.path()));

        let name = report.persisted.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("capture_") && name.ends_with(".png"));
        // capture_YYYYMMDD_HHMMSS_ffffff.png
        assert_eq!(name.len(), "capture_".len() + 22 + ".png".len());

        let artifact = store.get().unwrap();
        assert_eq!(artifact.sequence, 1);
        assert_eq!(artifact.source, report.persisted);
        assert_eq!(artifact.content_type, "image/jpeg");
        assert_eq!(&artifact.body[..2], &[0xFF, 0xD8]);
    }

    #[tokio::test]
    async fn test_published_artifact_carries_encoder_content_type() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LatestArtifactStore::new();
        let mut action = CaptureAction::new(
            started_camera().await,
            frame_store(tmp.path()),
            RawEncoder,
            store.clone(),
        );

        action.run().await.unwrap();
        let artifact = store.get().unwrap();
        assert_eq!(artifact.content_type, "application/octet-stream");
        assert_eq!(artifact.body.len(), 32 * 24 * 3);
    }

    #[tokio::test]
    async fn test_encode_failure_keeps_file_and_store() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LatestArtifactStore::new();
        let mut action = CaptureAction::new(
            started_camera().await,
            frame_store(tmp.path()),
            FailingEncoder,
            store.clone(),
        );

        let report = action.run().await.unwrap();
        assert!(!report.published);
        assert!(report.persisted.exists());
        assert_eq!(png_count(tmp.path()), 1);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_encode_failure_leaves_previous_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LatestArtifactStore::new();
        let first = store.publish(
            Bytes::from_static(b"old"),
            "image/jpeg",
            Local::now(),
            "old.png".into(),
        );

        let mut action = CaptureAction::new(
            started_camera().await,
            frame_store(tmp.path()),
            FailingEncoder,
            store.clone(),
        );
        action.run().await.unwrap();

        let latest = store.get().unwrap();
        assert_eq!(latest.sequence, first);
        assert_eq!(&latest.body[..], b"old");
    }

    #[tokio::test]
    async fn test_camera_failure_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LatestArtifactStore::new();
        // Never started
        let camera = MockCamera::new("cam");
        let mut action = CaptureAction::new(
            camera,
            frame_store(tmp.path()),
            JpegEncoder::default(),
            store.clone(),
        );

        let err = action.run().await.unwrap_err();
        assert!(matches!(err, CaptureError::Camera { .. }));
        assert_eq!(png_count(tmp.path()), 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_fire_maps_error() {
        let tmp = tempfile::tempdir().unwrap();
        let mut action = CaptureAction::new(
            MockCamera::new("cam"),
            frame_store(tmp.path()),
            JpegEncoder::default(),
            LatestArtifactStore::new(),
        );

        let err = action.fire(DistanceSample::from_cm(10.0)).await.unwrap_err();
        assert!(matches!(err, ContractError::Capture { .. }));
    }

    #[tokio::test]
    async fn test_shutdown_stops_camera() {
        let tmp = tempfile::tempdir().unwrap();
        let mut action = CaptureAction::new(
            started_camera().await,
            frame_store(tmp.path()),
            JpegEncoder::default(),
            LatestArtifactStore::new(),
        );
        assert!(action.camera().is_streaming());
        action.shutdown().await.unwrap();
        assert!(!action.camera().is_streaming());
    }
}
