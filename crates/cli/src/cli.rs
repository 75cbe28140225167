//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Obstacle Cam - capture a still whenever something gets close, serve the latest over HTTP
#[derive(Parser, Debug)]
#[command(
    name = "obstacle-cam",
    author,
    version,
    about = "Obstacle-triggered snapshot station",
    long_about = "Polls a distance sensor, captures one frame each time an obstacle comes\n\
                  closer than the threshold, stores it as PNG and serves the latest\n\
                  capture as JPEG over HTTP."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "OBSTACLE_CAM_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "OBSTACLE_CAM_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default filter level when RUST_LOG is unset
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the station (sensor polling + HTTP endpoint)
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display the effective configuration
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON); built-in defaults when omitted
    #[arg(short, long, env = "OBSTACLE_CAM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override HTTP port from configuration
    #[arg(long, env = "OBSTACLE_CAM_PORT")]
    pub port: Option<u16>,

    /// Override capture directory from configuration
    #[arg(long, env = "OBSTACLE_CAM_SAVE_DIR")]
    pub save_dir: Option<PathBuf>,

    /// Override trigger threshold (cm) from configuration
    #[arg(long, env = "OBSTACLE_CAM_THRESHOLD_CM")]
    pub threshold_cm: Option<f64>,

    /// Stop after this many captures (0 = unlimited)
    #[arg(long, default_value = "0", env = "OBSTACLE_CAM_MAX_CAPTURES")]
    pub max_captures: u64,

    /// Validate configuration and exit without running
    #[arg(long)]
    pub dry_run: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "9000", env = "OBSTACLE_CAM_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "station.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file; built-in defaults when omitted
    #[arg(short, long, env = "OBSTACLE_CAM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
