//! Client construction.
//!
//! # Responsibilities
//! - Turn a resource config plus credentials into a validated `ClientConfig`
//! - Open transport connections from a `ClientConfig`
//!
//! # Design Decisions
//! - Validation is synchronous and fatal; connecting is async and retryable
//! - Every connect runs under the configured deadline

use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::TcpStream;

use crate::config::ResourceConfig;
use crate::messaging::client::{ClientConfig, MessagingClient, TcpMessagingClient};
use crate::messaging::error::{ConfigValidationError, ConnectionError};
use crate::resilience::timeouts::{with_timeout, TimedOut};
use crate::secrets::CredentialBundle;

/// Builds messaging clients.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    /// Validate `resource` against `credentials`.
    fn build_config(
        &self,
        resource: ResourceConfig,
        credentials: Option<&CredentialBundle>,
    ) -> Result<ClientConfig, ConfigValidationError> {
        ClientConfig::from_resource(resource, credentials)
    }

    /// Make one connection attempt.
    async fn connect(&self, config: &ClientConfig) -> Result<Arc<dyn MessagingClient>, ConnectionError>;
}

/// Connects to the broker over TCP.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpClientFactory;

impl TcpClientFactory {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClientFactory for TcpClientFactory {
    async fn connect(&self, config: &ClientConfig) -> Result<Arc<dyn MessagingClient>, ConnectionError> {
        let address = (config.broker.host.as_str(), config.broker.port);
        let stream = with_timeout(config.connect_timeout, TcpStream::connect(address))
            .await
            .map_err(|TimedOut(limit)| ConnectionError::Timeout(limit))??;

        let client = TcpMessagingClient::new(config.clone(), stream)?;
        tracing::debug!(
            broker = %config.broker_url(),
            peer = %client.peer_addr(),
            "Transport connection established"
        );
        Ok(Arc::new(client))
    }
}
