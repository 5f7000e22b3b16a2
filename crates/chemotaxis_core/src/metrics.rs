//! Run metrics and structured logging.

use crate::diagnostics::FieldStats;
use std::time::{Duration, Instant};

/// Counts steps of a run and logs progress through `tracing`.
pub struct RunMetrics {
    steps: u64,
    snapshots: u64,
    log_every: u64,
    start_time: Instant,
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl RunMetrics {
    /// Logs a progress line every `log_every` steps (never when zero).
    #[must_use]
    pub fn new(log_every: u64) -> Self {
        Self {
            steps: 0,
            snapshots: 0,
            log_every,
            start_time: Instant::now(),
        }
    }

    /// Records `count` completed steps ending in the state described by
    /// `stats`.
    pub fn record_steps(&mut self, count: u64, stats: &FieldStats) {
        let before = self.steps;
        self.steps += count;

        if self.log_every > 0 && before / self.log_every != self.steps / self.log_every {
            tracing::info!(
                step = stats.step,
                time = stats.time,
                total_population = stats.total_population,
                total_resource = stats.total_resource,
                elapsed_ms = self.elapsed().as_millis() as u64,
                "Simulation progress"
            );
        }
        if !stats.finite {
            tracing::warn!(step = stats.step, "Non-finite values in field state");
        }
    }

    pub fn record_snapshot(&mut self, stats: &FieldStats) {
        self.snapshots += 1;
        tracing::info!(
            step = stats.step,
            time = stats.time,
            total_population = stats.total_population,
            total_resource = stats.total_resource,
            "Snapshot"
        );
    }

    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    #[must_use]
    pub fn snapshots(&self) -> u64 {
        self.snapshots
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs the global `tracing` subscriber. `RUST_LOG` overrides the default
/// `info` level. Calling it twice is harmless.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}
