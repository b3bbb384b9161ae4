//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Connection attempt to a dependency:
//!     → timeouts.rs (enforce connect deadline)
//!     → On failure: retries.rs (budget left? wait one interval, retry)
//!     → Budget spent or shutdown: give up
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - Connection errors are always retryable; everything else is fatal
//! - Waits between attempts are interruptible by shutdown

pub mod retries;
pub mod timeouts;

pub use retries::{RetryTimer, Tick};
pub use timeouts::{with_timeout, TimedOut};
