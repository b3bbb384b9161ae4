//! Client configuration and the published client contract.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

use crate::config::{AuthMode, ResourceConfig};
use crate::messaging::auth::{self, AuthOptions};
use crate::messaging::error::{ConfigValidationError, ConnectionError};
use crate::secrets::CredentialBundle;

/// Optional setting holding the connect deadline in whole seconds.
pub const OPTION_CONNECT_TIMEOUT: &str = "ConnectTimeout";

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the broker lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerAddress {
    pub protocol: String,
    pub host: String,
    pub port: u16,
}

impl BrokerAddress {
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

/// Validated settings a transport client is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Implementation type (e.g., "redis", "mqtt").
    pub kind: String,
    pub broker: BrokerAddress,
    pub auth_mode: AuthMode,
    pub auth: AuthOptions,
    pub connect_timeout: Duration,
    /// Optional settings not consumed by this crate, passed through to the client.
    pub options: HashMap<String, String>,
}

impl ClientConfig {
    /// Validate `resource` against `credentials` and take ownership of its
    /// optional settings.
    pub fn from_resource(
        resource: ResourceConfig,
        credentials: Option<&CredentialBundle>,
    ) -> Result<Self, ConfigValidationError> {
        let ResourceConfig {
            kind,
            protocol,
            host,
            port,
            auth_mode,
            secret_name: _,
            mut optional,
        } = resource;

        for (field, value) in [("type", &kind), ("protocol", &protocol), ("host", &host)] {
            if value.trim().is_empty() {
                return Err(ConfigValidationError::EmptyField(field));
            }
        }
        if port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }
        if let Some(reserved) = optional.keys().filter(|key| auth::is_reserved_option(key)).min() {
            return Err(ConfigValidationError::ReservedOption(reserved.clone()));
        }

        let auth = auth::validate_credentials(auth_mode, credentials)?;

        let connect_timeout = match optional.remove(OPTION_CONNECT_TIMEOUT) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_CONNECT_TIMEOUT,
        };

        Ok(Self {
            kind,
            broker: BrokerAddress { protocol, host, port },
            auth_mode,
            auth,
            connect_timeout,
            options: optional,
        })
    }

    pub fn broker_url(&self) -> String {
        self.broker.url()
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigValidationError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigValidationError::InvalidOption {
            key: OPTION_CONNECT_TIMEOUT.to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigValidationError::InvalidOption {
            key: OPTION_CONNECT_TIMEOUT.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// A connected messaging client, shared through the registry.
#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// Settings the client was built from.
    fn config(&self) -> &ClientConfig;

    fn broker_url(&self) -> String {
        self.config().broker_url()
    }

    /// Close the transport. Further calls are no-ops.
    async fn disconnect(&self) -> Result<(), ConnectionError>;
}

/// Messaging client over a plain TCP connection to the broker.
pub struct TcpMessagingClient {
    config: ClientConfig,
    peer: SocketAddr,
    stream: Mutex<Option<TcpStream>>,
}

impl TcpMessagingClient {
    pub fn new(config: ClientConfig, stream: TcpStream) -> Result<Self, ConnectionError> {
        let peer = stream.peer_addr()?;
        Ok(Self {
            config,
            peer,
            stream: Mutex::new(Some(stream)),
        })
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }
}

#[async_trait]
impl MessagingClient for TcpMessagingClient {
    fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn disconnect(&self) -> Result<(), ConnectionError> {
        let stream = self.stream.lock().await.take();
        if let Some(mut stream) = stream {
            stream.shutdown().await?;
            tracing::info!(broker = %self.config.broker_url(), peer = %self.peer, "Messaging client disconnected");
        }
        Ok(())
    }
}

impl std::fmt::Debug for TcpMessagingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TcpMessagingClient")
            .field("broker", &self.config.broker_url())
            .field("peer", &self.peer)
            .finish()
    }
}
