//! Messaging bootstrap handler.
//!
//! # State Machine
//! ```text
//! Init → ResolvingSecret (auth mode ≠ none) → BuildingConfig → Connecting ⟲ → Published
//!   │            │                                  │               │
//!   └────────────┴──────────────────────────────────┴───────────────┴──→ Failed
//! ```
//!
//! Every step before `Connecting` fails immediately. Connection errors are
//! retried until the timer's budget runs out or shutdown is requested. Each
//! attempt is capped at the budget that remains, and no wait starts once the
//! budget is spent.
//! Nothing is written to the registry unless a client connects.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::config::ResourceConfig;
use crate::lifecycle::{BootstrapHandler, CompletionToken, Shutdown};
use crate::messaging::client::ClientConfig;
use crate::messaging::error::{BootstrapError, ConnectionError};
use crate::messaging::factory::ClientFactory;
use crate::observability::metrics;
use crate::registry::{keys, Registry};
use crate::resilience::{with_timeout, RetryTimer, Tick, TimedOut};
use crate::secrets::{CredentialBundle, SecretError};

/// Brings the service's messaging client online.
pub struct MessagingBootstrap {
    factory: Arc<dyn ClientFactory>,
}

impl MessagingBootstrap {
    pub const NAME: &'static str = "messaging";

    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }

    /// Run one bounded initialization attempt.
    ///
    /// On success the client has been published under
    /// [`keys::MESSAGING_CLIENT`]. The registry's message bus configuration has
    /// its optional settings drained whatever the outcome.
    pub async fn bootstrap(
        &self,
        shutdown: &Shutdown,
        timer: &RetryTimer,
        registry: &Registry,
    ) -> Result<(), BootstrapError> {
        let shared = keys::message_bus_config(registry).ok_or(BootstrapError::ConfigMissing("message bus"))?;
        let resource = keys::take_resource_config(&shared);

        tracing::debug!(
            kind = %resource.kind,
            host = %resource.host,
            port = resource.port,
            auth_mode = %resource.auth_mode,
            "Bootstrapping messaging client"
        );

        let credentials = if resource.auth_mode.requires_secret() {
            Some(resolve_credentials(registry, &resource)?)
        } else {
            None
        };

        let config = self.factory.build_config(resource, credentials.as_ref())?;
        drop(credentials);

        self.connect_with_retry(&config, shutdown, timer, registry).await
    }

    async fn connect_with_retry(
        &self,
        config: &ClientConfig,
        shutdown: &Shutdown,
        timer: &RetryTimer,
        registry: &Registry,
    ) -> Result<(), BootstrapError> {
        let broker = config.broker_url();
        let mut attempts = 0;
        let mut last_error = None;

        while timer.remaining_budget() {
            if shutdown.is_triggered() {
                return Err(BootstrapError::Cancelled { attempts });
            }

            attempts += 1;
            // An attempt may not outlive the budget.
            let outcome = with_timeout(timer.remaining(), self.factory.connect(config))
                .await
                .unwrap_or_else(|TimedOut(limit)| Err(ConnectionError::Timeout(limit)));
            match outcome {
                Ok(client) => {
                    metrics::record_connect_attempt(&config.kind, true);
                    keys::set_messaging_client(registry, client);
                    tracing::info!(
                        broker = %broker,
                        attempts,
                        elapsed_ms = timer.elapsed().as_millis() as u64,
                        "Messaging client connected"
                    );
                    return Ok(());
                }
                Err(e) => {
                    metrics::record_connect_attempt(&config.kind, false);
                    tracing::warn!(
                        broker = %broker,
                        attempt = attempts,
                        error = %e,
                        remaining_ms = timer.remaining().as_millis() as u64,
                        "Messaging connection attempt failed"
                    );
                    last_error = Some(e);
                }
            }

            if !timer.remaining_budget() {
                break;
            }
            if timer.await_next_attempt(shutdown).await == Tick::Cancelled {
                return Err(BootstrapError::Cancelled { attempts });
            }
        }

        Err(BootstrapError::Exhausted {
            attempts,
            elapsed: timer.elapsed(),
            last_error,
        })
    }
}

fn resolve_credentials(registry: &Registry, resource: &ResourceConfig) -> Result<CredentialBundle, BootstrapError> {
    let name = &resource.secret_name;
    let provider = keys::secret_provider(registry).ok_or_else(|| BootstrapError::SecretRetrieval {
        name: name.clone(),
        source: SecretError::unavailable("no secret provider registered"),
    })?;

    let bundle = provider
        .get_secret(name)
        .map_err(|source| BootstrapError::SecretRetrieval {
            name: name.clone(),
            source,
        })?;
    tracing::debug!(secret = %name, keys = ?bundle.keys(), "Resolved messaging credentials");
    Ok(bundle)
}

#[async_trait]
impl BootstrapHandler for MessagingBootstrap {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn run(&self, shutdown: &Shutdown, done: CompletionToken, timer: RetryTimer, registry: &Registry) -> bool {
        let started = Instant::now();
        let failure = match self.bootstrap(shutdown, &timer, registry).await {
            Ok(()) => None,
            Err(e) => {
                tracing::error!(
                    handler = Self::NAME,
                    kind = e.kind(),
                    attempts = e.attempts(),
                    error = %e,
                    "Messaging bootstrap failed"
                );
                Some(e.kind())
            }
        };

        metrics::record_handler_outcome(Self::NAME, failure, started.elapsed());
        let success = failure.is_none();
        done.complete(success);
        success
    }
}
