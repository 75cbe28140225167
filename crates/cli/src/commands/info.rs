//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::{SensorKind, StationBlueprint};
use tracing::info;

use super::load_blueprint;
use crate::cli::InfoArgs;

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!("Loading configuration info");

    let blueprint = load_blueprint(args.config.as_deref())?;

    if args.json {
        let json = config_loader::ConfigLoader::to_json(&blueprint)
            .context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&blueprint);
    }

    Ok(())
}

fn sensor_source(blueprint: &StationBlueprint) -> String {
    let sensor = &blueprint.sensor;
    match sensor.kind {
        SensorKind::Mock => format!(
            "sweep {:.2}..{:.2} m, step {:.3} m",
            sensor.sweep_min_m, sensor.sweep_max_m, sensor.sweep_step_m
        ),
        SensorKind::Scripted => format!(
            "{} scripted readings{}",
            sensor.distances_m.len(),
            if sensor.loop_playback { ", looping" } else { "" }
        ),
        SensorKind::Replay => format!(
            "replay {}{}",
            sensor
                .replay_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unset>".to_string()),
            if sensor.loop_playback { ", looping" } else { "" }
        ),
    }
}

fn print_config_info(blueprint: &StationBlueprint) {
    println!("\n╔══════════════════════════════════════════════════════════╗");
    println!("║                 Station Configuration                    ║");
    println!("╚══════════════════════════════════════════════════════════╝\n");

    println!("Version: {:?}", blueprint.version);

    println!("\nSensor");
    println!("   ├─ Name: {}", blueprint.sensor.name);
    println!("   ├─ Kind: {:?}", blueprint.sensor.kind);
    println!("   ├─ Source: {}", sensor_source(blueprint));
    println!("   └─ Scale to cm: {}", blueprint.sensor.scale_to_cm);

    println!("\nTrigger");
    println!("   ├─ Threshold: < {} cm", blueprint.trigger.threshold_cm);
    println!("   ├─ Poll period: {} ms", blueprint.trigger.poll_period_ms);
    let limit = blueprint.trigger.max_consecutive_sensor_failures;
    if limit == 0 {
        println!("   └─ Sensor failure limit: none");
    } else {
        println!("   └─ Sensor failure limit: {} consecutive", limit);
    }

    println!("\nCamera");
    println!("   ├─ Name: {} ({:?})", blueprint.camera.name, blueprint.camera.kind);
    println!(
        "   ├─ Resolution: {}x{}",
        blueprint.camera.width, blueprint.camera.height
    );
    println!("   ├─ Native layout: {:?}", blueprint.camera.layout);
    println!("   └─ Warm-up: {} ms", blueprint.camera.warmup_ms);

    println!("\nStorage");
    println!("   ├─ Directory: {}", blueprint.storage.save_dir.display());
    println!(
        "   └─ File names: {}_YYYYMMDD_HHMMSS_ffffff.png",
        blueprint.storage.file_prefix
    );

    println!("\nPublish");
    println!("   ├─ Endpoint: http://{}/", blueprint.publish.socket_addr());
    println!("   ├─ JPEG quality: {}", blueprint.publish.jpeg_quality);
    println!(
        "   └─ Viewer refresh: {} ms",
        blueprint.publish.refresh_interval_ms
    );

    println!();
}
