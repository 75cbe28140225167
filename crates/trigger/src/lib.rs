//! # Trigger
//!
//! The polling half of the station: reads the distance sensor on a fixed
//! period, turns "obstacle closer than threshold" into rising-edge events
//! and fires the capture action on each one.
//!
//! ## Example
//!
//! ```ignore
//! use trigger::{ConditionSampler, PollScheduler, SchedulerConfig};
//!
//! let sampler = ConditionSampler::new(sensor, 100.0, 20.0);
//! let mut scheduler = PollScheduler::new(sampler, action, SchedulerConfig::default());
//! let stats = scheduler.run(shutdown_rx).await?;
//! ```

mod edge;
mod error;
mod sampler;
mod scheduler;
mod stats;

pub use edge::EdgeDetector;
pub use error::{Result, TriggerError};
pub use sampler::ConditionSampler;
pub use scheduler::{PollScheduler, SchedulerConfig, TickOutcome};
pub use stats::SchedulerStats;
