//! Retry timing for bounded startup loops.
//!
//! # Responsibilities
//! - Track a fixed retry interval and an overall time budget
//! - Tell callers whether budget remains
//! - Sleep between attempts, waking early on shutdown
//!
//! # Design Decisions
//! - Fixed interval, no backoff: startup wants a predictable cadence
//! - Built on `tokio::time::Instant` so paused-clock tests are deterministic
//! - Copy type: every handler gets its own cursor over the same deadline

use std::time::Duration;

use tokio::time::Instant;

use crate::config::StartupConfig;
use crate::lifecycle::Shutdown;

/// Outcome of waiting for the next attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The interval elapsed; go ahead with the next attempt.
    Ready,
    /// Shutdown was requested before or during the wait.
    Cancelled,
}

/// Interval plus total-budget tracker for retry loops.
#[derive(Debug, Clone, Copy)]
pub struct RetryTimer {
    started: Instant,
    interval: Duration,
    budget: Duration,
}

impl RetryTimer {
    /// Start a timer with `budget` of total time, attempting every `interval`.
    pub fn new(budget: Duration, interval: Duration) -> Self {
        Self {
            started: Instant::now(),
            interval,
            budget,
        }
    }

    /// Start a timer from whole seconds.
    pub fn from_secs(budget_secs: u64, interval_secs: u64) -> Self {
        Self::new(Duration::from_secs(budget_secs), Duration::from_secs(interval_secs))
    }

    /// Start a timer from the startup section of the configuration.
    pub fn from_config(config: &StartupConfig) -> Self {
        Self::new(config.duration(), config.interval())
    }

    /// True while elapsed time is below the total budget.
    pub fn remaining_budget(&self) -> bool {
        self.elapsed() < self.budget
    }

    /// Time left before the budget runs out.
    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.elapsed())
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Wait one interval, or return immediately once `shutdown` is triggered.
    pub async fn await_next_attempt(&self, shutdown: &Shutdown) -> Tick {
        if shutdown.is_triggered() {
            return Tick::Cancelled;
        }

        tokio::select! {
            _ = tokio::time::sleep(self.interval) => Tick::Ready,
            _ = shutdown.cancelled() => Tick::Cancelled,
        }
    }
}
