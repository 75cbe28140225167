//! Pipeline orchestrator - wires devices, trigger, capture and publisher.
//!
//! Two long-lived tasks: the polling loop (awaited here) and the HTTP server
//! (spawned). They share nothing but the artifact slot and the shutdown flag.

use std::future::Future;
use std::time::Instant;

use capture::{CaptureAction, FrameStore, JpegEncoder, LatestArtifactStore};
use contracts::StationBlueprint;
use devices::DeviceFactory;
use publisher::PublicationEndpoint;
use tokio::sync::watch;
use tracing::{info, warn};
use trigger::{ConditionSampler, PollScheduler, SchedulerConfig};

use super::PipelineStats;
use crate::error::Result;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Effective station configuration (CLI overrides applied)
    pub blueprint: StationBlueprint,

    /// Stop after this many captures (None = unlimited)
    pub max_captures: Option<u64>,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run until `shutdown` resolves, the capture limit is hit, or the
    /// sensor failure policy gives up
    pub async fn run<F>(self, shutdown: F) -> Result<PipelineStats>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let start_time = Instant::now();
        let blueprint = &self.config.blueprint;

        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        // Storage first: an unwritable directory should fail before any device starts
        let frames = FrameStore::new(&blueprint.storage)?;
        let artifacts = LatestArtifactStore::new();

        let endpoint = PublicationEndpoint::bind(&blueprint.publish, artifacts.clone()).await?;
        let endpoint_addr = endpoint.local_addr()?;

        let sensor = DeviceFactory::sensor_from_config(&blueprint.sensor)?;
        let mut camera = DeviceFactory::camera_from_config(&blueprint.camera);
        DeviceFactory::bring_up_camera(&mut camera, &blueprint.camera).await?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let signal_task = {
            let tx = shutdown_tx.clone();
            tokio::spawn(async move {
                shutdown.await;
                warn!("Received shutdown signal, stopping station...");
                let _ = tx.send(true);
            })
        };

        let server = endpoint.spawn(shutdown_rx.clone());
        info!(addr = %endpoint_addr, "Viewer available at http://{}/", endpoint_addr);

        let action = CaptureAction::new(
            camera,
            frames,
            JpegEncoder::new(blueprint.publish.jpeg_quality),
            artifacts.clone(),
        );
        let sampler = ConditionSampler::new(
            sensor,
            blueprint.sensor.scale_to_cm,
            blueprint.trigger.threshold_cm,
        );
        let scheduler_config = SchedulerConfig {
            max_captures: self.config.max_captures.unwrap_or(0),
            ..SchedulerConfig::from(&blueprint.trigger)
        };
        let mut scheduler = PollScheduler::new(sampler, action, scheduler_config);

        info!(
            threshold_cm = blueprint.trigger.threshold_cm,
            period_ms = blueprint.trigger.poll_period_ms,
            save_dir = %blueprint.storage.save_dir.display(),
            "Station running"
        );

        let outcome = scheduler.run(shutdown_rx).await;

        // The loop may have ended on its own; make sure the server follows
        let _ = shutdown_tx.send(true);
        signal_task.abort();

        info!("Shutting down station...");
        match server.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "Publication endpoint ended with error"),
            Err(e) => warn!(error = %e, "Publication endpoint task panicked"),
        }

        let mut action = scheduler.into_action();
        if let Err(e) = action.shutdown().await {
            warn!(error = %e, "Error while stopping camera");
        }

        let scheduler_stats = outcome?;
        let stats = PipelineStats {
            scheduler: scheduler_stats,
            duration: start_time.elapsed(),
            last_sequence: artifacts.sequence(),
            endpoint: Some(endpoint_addr),
            save_dir: blueprint.storage.save_dir.clone(),
        };

        info!(
            duration_secs = stats.duration.as_secs_f64(),
            captures = stats.scheduler.captures,
            "Station shutdown complete"
        );

        Ok(stats)
    }
}
