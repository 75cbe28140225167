//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::{SensorKind, StationBlueprint};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    sensor: String,
    threshold_cm: f64,
    poll_period_ms: u64,
    save_dir: String,
    endpoint: String,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", blueprint.version),
                    sensor: format!("{} ({:?})", blueprint.sensor.name, blueprint.sensor.kind),
                    threshold_cm: blueprint.trigger.threshold_cm,
                    poll_period_ms: blueprint.trigger.poll_period_ms,
                    save_dir: blueprint.storage.save_dir.display().to_string(),
                    endpoint: blueprint.publish.socket_addr().to_string(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &StationBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.sensor.kind == SensorKind::Mock {
        warnings.push("sensor.kind is mock - distances are a synthetic sweep".to_string());
    }

    if blueprint.sensor.kind != SensorKind::Mock
        && !blueprint.sensor.loop_playback
        && blueprint.trigger.max_consecutive_sensor_failures == 0
    {
        warnings.push(
            "non-looping sensor script with no failure limit - the station keeps polling a dead sensor once the script ends"
                .to_string(),
        );
    }

    if blueprint.camera.warmup_ms == 0 {
        warnings.push("camera.warmup_ms is 0 - first captures may be under-exposed".to_string());
    }

    if blueprint.publish.jpeg_quality < 50 {
        warnings.push(format!(
            "publish.jpeg_quality is {} - published images will be heavily compressed",
            blueprint.publish.jpeg_quality
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Sensor: {}", summary.sensor);
            println!("  Threshold: < {} cm", summary.threshold_cm);
            println!("  Poll period: {} ms", summary.poll_period_ms);
            println!("  Save dir: {}", summary.save_dir);
            println!("  Endpoint: {}", summary.endpoint);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
