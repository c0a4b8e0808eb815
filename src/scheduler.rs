//! Periodic background refresh.
//!
//! Runs the refresh pipeline once at startup and then on a fixed interval
//! until stopped. Cycles run inside the scheduler task one after another,
//! so a slow cycle delays the next one instead of overlapping with it;
//! ticks missed while a cycle runs are dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::cache::SnapshotCache;
use crate::pipeline::RefreshPipeline;

pub const DEFAULT_INTERVAL_SECS: u64 = 3600;

/// Scheduler configuration
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Refresh interval in seconds (default: 3600 = 1 hour)
    pub interval_secs: u64,
    /// Whether to refresh immediately on start
    pub refresh_on_start: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            refresh_on_start: true,
        }
    }
}

impl ScheduleConfig {
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }

    /// Seconds for an interval written as `"90"`, `"90s"`, `"15m"` or `"2h"`.
    pub fn parse_interval(input: &str) -> Result<u64, String> {
        let input = input.trim();
        let split = input
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(input.len());
        let (digits, unit) = input.split_at(split);

        let scale = match unit.to_ascii_lowercase().as_str() {
            "" | "s" => 1,
            "m" => 60,
            "h" => 3600,
            other => {
                return Err(format!(
                    "unknown unit {:?} in interval {:?} (use s, m or h)",
                    other, input
                ))
            }
        };
        let count: u64 = digits
            .parse()
            .map_err(|_| format!("interval {:?} has no number", input))?;

        count
            .checked_mul(scale)
            .ok_or_else(|| format!("interval {:?} is too large", input))
    }

    /// Largest unit that divides `secs` evenly, e.g. `"2h"` or `"90s"`.
    pub fn format_interval(secs: u64) -> String {
        [(3600_u64, "h"), (60_u64, "m")]
            .iter()
            .find(|(scale, _)| secs > 0 && secs % scale == 0)
            .map(|(scale, unit)| format!("{}{}", secs / scale, unit))
            .unwrap_or_else(|| format!("{}s", secs))
    }
}

pub struct Scheduler {
    pipeline: Arc<RefreshPipeline>,
    cache: Arc<SnapshotCache>,
    config: ScheduleConfig,
    token: CancellationToken,
}

impl Scheduler {
    pub fn new(
        pipeline: Arc<RefreshPipeline>,
        cache: Arc<SnapshotCache>,
        config: ScheduleConfig,
    ) -> Self {
        Self {
            pipeline,
            cache,
            config,
            token: CancellationToken::new(),
        }
    }

    /// Start the refresh loop on its own task and return immediately.
    pub fn spawn(self) -> SchedulerHandle {
        let token = self.token.clone();
        let task = tokio::spawn(self.run());
        SchedulerHandle { token, task }
    }

    async fn run(self) {
        let period = self.config.period();
        tracing::info!(
            "Scheduler started (refresh interval: {})",
            ScheduleConfig::format_interval(period.as_secs())
        );

        let mut timer = if self.config.refresh_on_start {
            interval(period)
        } else {
            interval_at(Instant::now() + period, period)
        };
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = self.token.cancelled() => break,
                _ = timer.tick() => {}
            }

            tracing::info!("Running scheduled refresh...");
            // Failures are logged by the pipeline; the cache keeps the last good snapshot.
            let _ = self.pipeline.refresh(&self.cache).await;
        }

        tracing::info!("Scheduler stopped");
    }
}

/// Handle to a running [`Scheduler`].
pub struct SchedulerHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Token that stops the scheduler when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Stop scheduling new refreshes and wait for an in-flight one to finish.
    pub async fn stop(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            tracing::error!("Scheduler task failed: {}", e);
        }
    }
}
