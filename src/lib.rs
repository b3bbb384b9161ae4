//! Startup bootstrap for services with credential-gated dependencies.
//!
//! Brings dependent resources (a messaging client) online under a bounded
//! retry budget, coordinating concurrent handlers through a shared registry.

pub mod config;
pub mod lifecycle;
pub mod messaging;
pub mod observability;
pub mod registry;
pub mod resilience;
pub mod secrets;

pub use config::BootstrapConfig;
pub use lifecycle::{BootstrapHandler, Shutdown, StartupSequence};
pub use messaging::MessagingBootstrap;
pub use registry::Registry;
pub use resilience::RetryTimer;
