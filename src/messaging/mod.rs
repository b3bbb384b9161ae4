//! Messaging client bootstrap subsystem.
//!
//! # Data Flow
//! ```text
//! Registry (message bus ResourceConfig, SecretProvider)
//!     → auth.rs (which credentials the auth mode needs)
//!     → client.rs (validated ClientConfig)
//!     → factory.rs (connect, retried under the RetryTimer)
//!     → bootstrap.rs (publish client into the registry, report)
//! ```
//!
//! # Design Decisions
//! - Only connection errors are retried; config and secret errors are final
//! - The secret store is consulted at most once per run
//! - No wire protocol here: this decides when a connection is attempted, not its bytes

pub mod auth;
pub mod bootstrap;
pub mod client;
pub mod error;
pub mod factory;

pub use bootstrap::MessagingBootstrap;
pub use client::{BrokerAddress, ClientConfig, MessagingClient, TcpMessagingClient};
pub use error::{BootstrapError, ConfigValidationError, ConnectionError};
pub use factory::{ClientFactory, TcpClientFactory};
