//! `run` command implementation.

use anyhow::{Context, Result};
use contracts::StationBlueprint;
use tracing::info;

use super::load_blueprint;
use crate::cli::RunArgs;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute the `run` command
pub async fn run_pipeline(args: &RunArgs) -> Result<()> {
    let mut blueprint = load_blueprint(args.config.as_deref())?;

    apply_overrides(&mut blueprint, args);
    config_loader::ConfigLoader::validate(&blueprint)
        .context("Configuration invalid after CLI overrides")?;

    info!(
        sensor = ?blueprint.sensor.kind,
        threshold_cm = blueprint.trigger.threshold_cm,
        poll_period_ms = blueprint.trigger.poll_period_ms,
        save_dir = %blueprint.storage.save_dir.display(),
        endpoint = %blueprint.publish.socket_addr(),
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&blueprint);
        return Ok(());
    }

    let pipeline = Pipeline::new(PipelineConfig {
        blueprint,
        max_captures: if args.max_captures == 0 {
            None
        } else {
            Some(args.max_captures)
        },
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
    });

    info!("Starting station...");
    let stats = pipeline
        .run(setup_shutdown_signal())
        .await
        .context("Station run failed")?;

    info!(
        ticks = stats.scheduler.ticks,
        captures = stats.scheduler.captures,
        duration_secs = stats.duration.as_secs_f64(),
        "Station stopped"
    );
    stats.print_summary();

    Ok(())
}

fn apply_overrides(blueprint: &mut StationBlueprint, args: &RunArgs) {
    if let Some(port) = args.port {
        info!(port, "Overriding HTTP port from CLI");
        blueprint.publish.port = port;
    }
    if let Some(ref dir) = args.save_dir {
        info!(save_dir = %dir.display(), "Overriding save directory from CLI");
        blueprint.storage.save_dir = dir.clone();
    }
    if let Some(threshold) = args.threshold_cm {
        info!(threshold_cm = threshold, "Overriding trigger threshold from CLI");
        blueprint.trigger.threshold_cm = threshold;
    }
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print configuration summary for dry-run mode
fn print_config_summary(blueprint: &StationBlueprint) {
    println!("\n=== Configuration Summary ===\n");
    println!("Sensor:");
    println!("  Name: {} ({:?})", blueprint.sensor.name, blueprint.sensor.kind);
    println!("  Scale to cm: {}", blueprint.sensor.scale_to_cm);
    println!("\nTrigger:");
    println!("  Threshold: < {} cm", blueprint.trigger.threshold_cm);
    println!("  Poll period: {} ms", blueprint.trigger.poll_period_ms);
    println!("\nCamera:");
    println!(
        "  {} ({:?}) {}x{} {:?}, warm-up {} ms",
        blueprint.camera.name,
        blueprint.camera.kind,
        blueprint.camera.width,
        blueprint.camera.height,
        blueprint.camera.layout,
        blueprint.camera.warmup_ms
    );
    println!("\nStorage:");
    println!("  Directory: {}", blueprint.storage.save_dir.display());
    println!("\nPublish:");
    println!("  Endpoint: http://{}/", blueprint.publish.socket_addr());
    println!("  JPEG quality: {}", blueprint.publish.jpeg_quality);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_apply_overrides() {
        let args = RunArgs {
            config: None,
            port: Some(8081),
            save_dir: Some(PathBuf::from("/data/shots")),
            threshold_cm: Some(30.0),
            max_captures: 0,
            dry_run: true,
            metrics_port: 0,
        };
        let mut blueprint = StationBlueprint::default();
        apply_overrides(&mut blueprint, &args);

        assert_eq!(blueprint.publish.port, 8081);
        assert_eq!(blueprint.storage.save_dir, PathBuf::from("/data/shots"));
        assert_eq!(blueprint.trigger.threshold_cm, 30.0);
    }

    #[tokio::test]
    async fn test_dry_run_with_defaults() {
        let args = RunArgs {
            config: None,
            port: None,
            save_dir: None,
            threshold_cm: None,
            max_captures: 0,
            dry_run: true,
            metrics_port: 0,
        };
        run_pipeline(&args).await.unwrap();
    }

    #[tokio::test]
    async fn test_bad_override_rejected() {
        let args = RunArgs {
            config: None,
            port: None,
            save_dir: None,
            threshold_cm: Some(-1.0),
            max_captures: 0,
            dry_run: true,
            metrics_port: 0,
        };
        assert!(run_pipeline(&args).await.is_err());
    }
}
