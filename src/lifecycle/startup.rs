//! Startup orchestration.
//!
//! # Responsibilities
//! - Launch every bootstrap handler as its own task
//! - Share one shutdown signal, one retry deadline and the registry
//! - Block until every handler has reported, then return the aggregate result
//!
//! # Design Decisions
//! - Handlers run concurrently; none can block another
//! - Each handler holds a `CompletionToken` that reports exactly once,
//!   even if the handler panics
//! - Any handler failure fails startup

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinSet;

use crate::config::StartupConfig;
use crate::lifecycle::Shutdown;
use crate::registry::Registry;
use crate::resilience::RetryTimer;

/// One bounded initialization step run at startup.
#[async_trait]
pub trait BootstrapHandler: Send + Sync {
    /// Name used in logs and metrics.
    fn name(&self) -> &str;

    /// Bring the resource online and publish it into `registry`.
    ///
    /// Must report through `done` and return `true` only if the resource was
    /// published.
    async fn run(&self, shutdown: &Shutdown, done: CompletionToken, timer: RetryTimer, registry: &Registry) -> bool;
}

struct BarrierState {
    pending: watch::Sender<usize>,
    failures: AtomicUsize,
}

/// Completion barrier for a set of concurrently running handlers.
#[derive(Clone)]
pub struct StartupBarrier {
    state: Arc<BarrierState>,
}

impl StartupBarrier {
    pub fn new() -> Self {
        let (pending, _) = watch::channel(0);
        Self {
            state: Arc::new(BarrierState {
                pending,
                failures: AtomicUsize::new(0),
            }),
        }
    }

    /// Add one participant and hand back its token.
    pub fn register(&self, handler: impl Into<String>) -> CompletionToken {
        self.state.pending.send_modify(|pending| *pending += 1);
        CompletionToken {
            handler: handler.into(),
            state: Arc::clone(&self.state),
            reported: false,
        }
    }

    /// Participants that have not reported yet.
    pub fn pending(&self) -> usize {
        *self.state.pending.borrow()
    }

    /// Participants that reported failure so far.
    pub fn failures(&self) -> usize {
        self.state.failures.load(Ordering::SeqCst)
    }

    /// Wait until every participant has reported. True if none failed.
    pub async fn wait(&self) -> bool {
        let mut rx = self.state.pending.subscribe();
        // The sender lives in `self.state`, so the channel cannot close under us.
        let _ = rx.wait_for(|pending| *pending == 0).await;
        self.failures() == 0
    }
}

impl Default for StartupBarrier {
    fn default() -> Self {
        Self::new()
    }
}

/// A handler's single report to the `StartupBarrier`.
///
/// Dropping the token without calling `complete` reports failure.
pub struct CompletionToken {
    handler: String,
    state: Arc<BarrierState>,
    reported: bool,
}

impl CompletionToken {
    /// Report the outcome, consuming the token.
    pub fn complete(mut self, success: bool) {
        self.report(success);
    }

    fn report(&mut self, success: bool) {
        if self.reported {
            return;
        }
        self.reported = true;
        if !success {
            self.state.failures.fetch_add(1, Ordering::SeqCst);
        }
        self.state.pending.send_modify(|pending| *pending -= 1);
        tracing::debug!(handler = %self.handler, success, "Bootstrap handler reported");
    }
}

impl Drop for CompletionToken {
    fn drop(&mut self) {
        if !self.reported {
            tracing::warn!(handler = %self.handler, "Bootstrap handler finished without reporting, counting as failure");
            self.report(false);
        }
    }
}

/// Runs a set of bootstrap handlers to a single pass/fail decision.
pub struct StartupSequence {
    registry: Registry,
    shutdown: Shutdown,
    startup: StartupConfig,
    handlers: Vec<Arc<dyn BootstrapHandler>>,
}

impl StartupSequence {
    pub fn new(registry: Registry, shutdown: Shutdown, startup: StartupConfig) -> Self {
        Self {
            registry,
            shutdown,
            startup,
            handlers: Vec::new(),
        }
    }

    pub fn with_handler(mut self, handler: Arc<dyn BootstrapHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Launch all handlers and wait for them. True only if every one succeeded.
    pub async fn run(self) -> bool {
        let barrier = StartupBarrier::new();
        let timer = RetryTimer::from_config(&self.startup);

        tracing::info!(
            handlers = self.handlers.len(),
            budget_secs = self.startup.duration_secs,
            interval_secs = self.startup.interval_secs,
            "Starting bootstrap handlers"
        );

        let mut tasks = JoinSet::new();
        for handler in self.handlers {
            let done = barrier.register(handler.name());
            let shutdown = self.shutdown.clone();
            let registry = self.registry.clone();
            tasks.spawn(async move { handler.run(&shutdown, done, timer, &registry).await });
        }

        let all_succeeded = barrier.wait().await;

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "Bootstrap handler task aborted");
            }
        }

        if all_succeeded {
            tracing::info!(elapsed_ms = timer.elapsed().as_millis() as u64, "All bootstrap handlers succeeded");
        } else {
            tracing::error!(failures = barrier.failures(), "Bootstrap failed");
        }
        all_succeeded
    }
}
