//! Pipeline statistics.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use trigger::SchedulerStats;

/// Statistics from one station run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Polling loop counters
    pub scheduler: SchedulerStats,

    /// Total duration of the run
    pub duration: Duration,

    /// Sequence number of the last published artifact (0 = none)
    pub last_sequence: u64,

    /// Address the viewer was served on
    pub endpoint: Option<SocketAddr>,

    /// Where captures were written
    pub save_dir: PathBuf,
}

impl PipelineStats {
    /// Ticks per second actually achieved
    pub fn tick_rate(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.scheduler.ticks as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        let s = &self.scheduler;

        println!("\n+--------------------------------------------------------------+");
        println!("|                      Station Statistics                      |");
        println!("+--------------------------------------------------------------+\n");

        println!("Overview");
        println!("   |- Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   |- Ticks: {} ({:.1}/s)", s.ticks, self.tick_rate());
        if let Some(addr) = self.endpoint {
            println!("   |- Endpoint: http://{}/", addr);
        }
        println!("   `- Save dir: {}", self.save_dir.display());

        println!("\nTrigger");
        println!("   |- Rising edges: {}", s.rising_edges);
        println!("   |- Sensor failures: {}", s.sensor_failures);
        println!("   `- Distance (cm): {}", s.distance.summary());

        println!("\nCapture");
        println!("   |- Captures: {}", s.captures);
        println!("   |- Published: {}", s.publications);
        println!("   |- Encode failures: {}", s.encode_failures());
        println!("   |- Capture failures: {}", s.capture_failures);
        println!("   |- Last sequence: {}", self.last_sequence);
        match &s.last_capture {
            Some(path) => println!("   `- Last file: {}", path.display()),
            None => println!("   `- Last file: none"),
        }

        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_rate() {
        let stats = PipelineStats {
            scheduler: SchedulerStats {
                ticks: 50,
                ..Default::default()
            },
            duration: Duration::from_secs(5),
            ..Default::default()
        };
        assert!((stats.tick_rate() - 10.0).abs() < 1e-9);
        assert_eq!(PipelineStats::default().tick_rate(), 0.0);
    }
}
