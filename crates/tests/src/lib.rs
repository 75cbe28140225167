//! # Integration Tests
//!
//! Cross-crate and end-to-end tests.
//!
//! Covers:
//! - Config file -> devices wiring
//! - Sensor -> trigger -> capture -> publication, with mock hardware
//! - HTTP view of the publication slot while the station runs

#[cfg(test)]
mod contract_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{PixelLayout, SensorKind};
    use devices::{AnyDistanceSensor, DeviceFactory};

    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
    }

    #[test]
    fn test_config_drives_device_factory() {
        let toml = r#"
[sensor]
kind = "scripted"
distances_m = [0.30, 0.12]

[camera]
width = 64
height = 48
layout = "rgb8"
"#;
        let blueprint = ConfigLoader::load_from_str(toml, ConfigFormat::Toml).unwrap();
        assert_eq!(blueprint.sensor.kind, SensorKind::Scripted);
        assert_eq!(blueprint.camera.layout, PixelLayout::Rgb8);

        let sensor = DeviceFactory::sensor_from_config(&blueprint.sensor).unwrap();
        assert!(matches!(sensor, AnyDistanceSensor::Scripted(_)));
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::net::{IpAddr, Ipv4Addr};
    use std::path::Path;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use capture::{CaptureAction, FrameStore, JpegEncoder, LatestArtifactStore};
    use contracts::{CameraConfig, PublishConfig, StorageConfig};
    use devices::{AnyCamera, DeviceFactory, ScriptedDistanceSensor};
    use publisher::{router, PublicationEndpoint, NOT_READY_BODY};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::watch;
    use tower::ServiceExt;
    use trigger::{ConditionSampler, PollScheduler, SchedulerConfig, TickOutcome, TriggerError};

    type Station = PollScheduler<ScriptedDistanceSensor, CaptureAction<AnyCamera, JpegEncoder>>;

    async fn build_station(
        sensor: ScriptedDistanceSensor,
        dir: &Path,
        artifacts: LatestArtifactStore,
        config: SchedulerConfig,
    ) -> Station {
        let camera_config = CameraConfig {
            warmup_ms: 0,
            ..Default::default()
        };
        let mut camera = DeviceFactory::camera_from_config(&camera_config);
        DeviceFactory::bring_up_camera(&mut camera, &camera_config)
            .await
            .unwrap();

        let frames = FrameStore::new(&StorageConfig {
            save_dir: dir.to_path_buf(),
            ..Default::default()
        })
        .unwrap();

        let action = CaptureAction::new(camera, frames, JpegEncoder::default(), artifacts);
        PollScheduler::new(ConditionSampler::new(sensor, 100.0, 20.0), action, config)
    }

    fn png_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|n| n.ends_with(".png"))
            .collect();
        names.sort();
        names
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    /// Scripted approach -> exactly one capture, visible over HTTP
    #[tokio::test]
    async fn test_e2e_approach_captures_once_and_publishes() {
        let tmp = tempfile::tempdir().unwrap();
        let artifacts = LatestArtifactStore::new();
        let app = router(artifacts.clone(), &PublishConfig::default());

        // Before any capture
        let resp = app.clone().oneshot(get("/image.jpg")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], NOT_READY_BODY.as_bytes());

        let sensor = ScriptedDistanceSensor::from_cm("ultrasonic", &[25.0, 22.0, 18.0, 15.0, 21.0]);
        let mut station = build_station(
            sensor,
            tmp.path(),
            artifacts.clone(),
            SchedulerConfig::default(),
        )
        .await;

        let mut captures = Vec::new();
        for i in 0..5 {
            if let TickOutcome::Captured(report) = station.tick().await.unwrap() {
                captures.push((i, report));
            }
        }

        assert_eq!(captures.len(), 1);
        let (index, report) = &captures[0];
        assert_eq!(*index, 2);
        assert!(report.published);

        let files = png_files(tmp.path());
        assert_eq!(files.len(), 1);
        assert_eq!(tmp.path().join(&files[0]), report.persisted);

        // Lossless copy keeps the configured geometry
        let png = image::open(&report.persisted).unwrap();
        assert_eq!((png.width(), png.height()), (320, 240));

        // After one capture
        let resp = app.oneshot(get("/image.jpg")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "image/jpeg");
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(!body.is_empty());
        let jpeg = image::load_from_memory(&body).unwrap();
        assert_eq!((jpeg.width(), jpeg.height()), (320, 240));

        station.into_action().shutdown().await.unwrap();
    }

    /// Published artifact always points at a file that already exists
    #[tokio::test]
    async fn test_e2e_published_artifact_has_persisted_source() {
        let tmp = tempfile::tempdir().unwrap();
        let artifacts = LatestArtifactStore::new();
        let sensor = ScriptedDistanceSensor::from_cm("ultrasonic", &[30.0, 10.0, 30.0, 12.0]);
        let mut station = build_station(
            sensor,
            tmp.path(),
            artifacts.clone(),
            SchedulerConfig::default(),
        )
        .await;

        for _ in 0..4 {
            station.tick().await.unwrap();
            if let Some(artifact) = artifacts.get() {
                assert!(artifact.source.exists());
            }
        }

        assert_eq!(artifacts.sequence(), 2);
        assert_eq!(png_files(tmp.path()).len(), 2);
    }

    /// Full run: scheduler + real HTTP server, stopped by the capture limit
    #[tokio::test]
    async fn test_e2e_run_with_live_endpoint() {
        let tmp = tempfile::tempdir().unwrap();
        let artifacts = LatestArtifactStore::new();

        let publish = PublishConfig {
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            ..Default::default()
        };
        let endpoint = PublicationEndpoint::bind(&publish, artifacts.clone())
            .await
            .unwrap();
        let addr = endpoint.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let server = endpoint.spawn(shutdown_rx.clone());

        let sensor = ScriptedDistanceSensor::new("ultrasonic", vec![0.50, 0.10], true);
        let config = SchedulerConfig {
            period: Duration::from_millis(5),
            max_consecutive_sensor_failures: 0,
            max_captures: 2,
        };
        let mut station = build_station(sensor, tmp.path(), artifacts.clone(), config).await;

        let stats = station.run(shutdown_rx).await.unwrap();
        assert_eq!(stats.captures, 2);
        assert_eq!(stats.publications, 2);
        assert_eq!(png_files(tmp.path()).len(), 2);

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /image.jpg HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        let head = String::from_utf8_lossy(&response[..response.len().min(512)]).to_string();
        assert!(head.starts_with("HTTP/1.1 200"), "got: {head}");
        assert!(head.to_ascii_lowercase().contains("x-capture-sequence: 2"));

        shutdown_tx.send(true).unwrap();
        server.await.unwrap().unwrap();
        station.into_action().shutdown().await.unwrap();
    }

    /// Replayed recording that ends -> failure limit stops the station
    #[tokio::test]
    async fn test_e2e_replay_exhaustion_hits_failure_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let replay = tmp.path().join("distances.jsonl");
        std::fs::write(
            &replay,
            "{\"distance_m\": 0.40}\n{\"distance_m\": 0.15}\n{\"distance_m\": 0.40}\n",
        )
        .unwrap();
        let shots = tmp.path().join("shots");

        let sensor = ScriptedDistanceSensor::load_replay(&replay, "replay", false).unwrap();
        let config = SchedulerConfig {
            period: Duration::from_millis(1),
            max_consecutive_sensor_failures: 2,
            max_captures: 0,
        };
        let mut station = build_station(sensor, &shots, LatestArtifactStore::new(), config).await;
        let (_tx, rx) = watch::channel(false);

        let err = station.run(rx).await.unwrap_err();
        assert!(matches!(
            err,
            TriggerError::SensorFailuresExceeded { count: 2, .. }
        ));
        assert_eq!(station.stats().captures, 1);
        assert_eq!(station.stats().ticks, 5);
        assert_eq!(png_files(&shots).len(), 1);
    }
}
