//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Registry + handlers → spawn each handler → barrier wait → pass/fail
//!
//! Shutdown (shutdown.rs):
//!     Signal received → cancel startup retries → disconnect → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Startup handlers run concurrently under one shared deadline
//! - Shutdown is a latched signal; late subscribers still observe it

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{BootstrapHandler, CompletionToken, StartupBarrier, StartupSequence};
