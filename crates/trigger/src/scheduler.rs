//! PollScheduler - fixed-period sample -> edge -> capture chain
//!
//! The capture runs inline in the polling task and the period timer is reset
//! once it returns, so a slow capture can never overlap another tick and the
//! action is never entered re-entrantly.

use std::time::{Duration, Instant};

use contracts::{CaptureReport, DistanceSensor, TriggerAction, TriggerConfig};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument, warn};

use crate::edge::EdgeDetector;
use crate::error::{Result, TriggerError};
use crate::sampler::ConditionSampler;
use crate::stats::SchedulerStats;

/// Scheduler configuration
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Tick period
    pub period: Duration,
    /// Give up after this many consecutive sensor failures (0 = never)
    pub max_consecutive_sensor_failures: u32,
    /// Stop after this many captures (0 = unlimited)
    pub max_captures: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::from(&TriggerConfig::default())
    }
}

impl From<&TriggerConfig> for SchedulerConfig {
    fn from(config: &TriggerConfig) -> Self {
        Self {
            period: Duration::from_millis(config.poll_period_ms),
            max_consecutive_sensor_failures: config.max_consecutive_sensor_failures,
            max_captures: 0,
        }
    }
}

/// Result of one tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Sample taken, no rising edge
    Idle { distance_cm: f64 },
    /// Rising edge, action succeeded
    Captured(CaptureReport),
    /// Rising edge, action failed (logged, polling continues)
    CaptureFailed,
    /// Sensor read failed, tick aborted before classification
    SensorFailed,
}

/// Polling scheduler
pub struct PollScheduler<S, A> {
    sampler: ConditionSampler<S>,
    detector: EdgeDetector,
    action: A,
    config: SchedulerConfig,
    stats: SchedulerStats,
    consecutive_failures: u32,
}

impl<S: DistanceSensor, A: TriggerAction> PollScheduler<S, A> {
    pub fn new(sampler: ConditionSampler<S>, action: A, config: SchedulerConfig) -> Self {
        Self {
            sampler,
            detector: EdgeDetector::new(),
            action,
            config,
            stats: SchedulerStats::default(),
            consecutive_failures: 0,
        }
    }

    /// Run exactly one chain
    ///
    /// # Errors
    /// Only `SensorFailuresExceeded`; every other failure is reported through
    /// the outcome.
    pub async fn tick(&mut self) -> Result<TickOutcome> {
        self.stats.ticks += 1;

        let sample = match self.sampler.sample().await {
            Ok(sample) => {
                self.consecutive_failures = 0;
                sample
            }
            Err(e) => return self.on_sensor_failure(e),
        };

        observability::record_tick(self.sampler.sensor_name(), sample.distance_cm);
        self.stats.distance.push(sample.distance_cm);

        let triggered = self.sampler.is_triggered(&sample);
        if !self.detector.classify(triggered).is_rising() {
            return Ok(TickOutcome::Idle {
                distance_cm: sample.distance_cm,
            });
        }

        self.stats.rising_edges += 1;
        observability::record_rising_edge();
        info!(
            distance_cm = sample.distance_cm,
            threshold_cm = self.sampler.threshold_cm(),
            "Obstacle detected, capturing"
        );

        let started = Instant::now();
        match self.action.fire(sample).await {
            Ok(report) => {
                let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                self.stats.captures += 1;
                if report.published {
                    self.stats.publications += 1;
                }
                self.stats.last_capture = Some(report.persisted.clone());
                observability::record_capture(report.published, elapsed_ms);
                info!(
                    path = %report.persisted.display(),
                    published = report.published,
                    elapsed_ms,
                    "Capture complete"
                );
                Ok(TickOutcome::Captured(report))
            }
            Err(e) => {
                self.stats.capture_failures += 1;
                observability::record_capture_failure();
                error!(action = %self.action.name(), error = %e, "Capture failed");
                Ok(TickOutcome::CaptureFailed)
            }
        }
    }

    fn on_sensor_failure(&mut self, e: contracts::ContractError) -> Result<TickOutcome> {
        self.consecutive_failures += 1;
        self.stats.sensor_failures += 1;

        let sensor = self.sampler.sensor_name().to_string();
        observability::record_sensor_failure(&sensor, self.consecutive_failures);
        warn!(
            sensor = %sensor,
            consecutive = self.consecutive_failures,
            error = %e,
            "Sensor read failed, skipping tick"
        );

        let limit = self.config.max_consecutive_sensor_failures;
        if limit > 0 && self.consecutive_failures >= limit {
            return Err(TriggerError::sensor_failures_exceeded(
                sensor,
                self.consecutive_failures,
            ));
        }
        Ok(TickOutcome::SensorFailed)
    }

    /// Poll until `shutdown` flips to `true` (or its sender is dropped)
    ///
    /// Shutdown is observed between ticks only; a capture in flight always
    /// completes.
    #[instrument(
        name = "poll_scheduler_run",
        skip_all,
        fields(sensor = %self.sampler.sensor_name(), action = %self.action.name())
    )]
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<SchedulerStats> {
        info!(
            period_ms = self.config.period.as_millis() as u64,
            threshold_cm = self.sampler.threshold_cm(),
            max_captures = self.config.max_captures,
            "Poll scheduler started"
        );

        let mut interval = tokio::time::interval(self.config.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = stopped(&mut shutdown) => {
                    info!("Shutdown requested, poll scheduler stopping");
                    break;
                }
                _ = interval.tick() => {}
            }

            match self.tick().await? {
                TickOutcome::Captured(_) | TickOutcome::CaptureFailed => {
                    // Restart the period from the end of the capture
                    interval.reset();
                }
                TickOutcome::Idle { .. } | TickOutcome::SensorFailed => {}
            }

            if self.config.max_captures > 0 && self.stats.captures >= self.config.max_captures {
                info!(captures = self.stats.captures, "Capture limit reached");
                break;
            }

            if self.stats.ticks % 100 == 0 {
                debug!(ticks = self.stats.ticks, "Poll scheduler progress");
            }
        }

        info!(
            ticks = self.stats.ticks,
            captures = self.stats.captures,
            sensor_failures = self.stats.sensor_failures,
            "Poll scheduler stopped"
        );
        Ok(self.stats.clone())
    }

    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    pub fn detector(&self) -> &EdgeDetector {
        &self.detector
    }

    pub fn action(&self) -> &A {
        &self.action
    }

    /// Hand the action back (e.g. to stop its camera)
    pub fn into_action(self) -> A {
        self.action
    }
}

async fn stopped(rx: &mut watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}
