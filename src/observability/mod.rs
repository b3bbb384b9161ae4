//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Bootstrap handlers produce:
//!     → logging.rs (structured log events per state transition)
//!     → metrics.rs (attempt counters, outcomes, durations)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
