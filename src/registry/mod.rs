//! Resource registry subsystem.
//!
//! # Data Flow
//! ```text
//! Service startup
//!     → registers configuration + secret provider
//!     → bootstrap handlers read them concurrently
//!     → successful handlers publish clients
//!     → rest of the service reads clients for its lifetime
//! ```
//!
//! # Design Decisions
//! - Passed explicitly as a capability, never a process-wide singleton
//! - One slot per key; a later `set` overwrites
//! - Entries are `Arc`s, so readers share ownership of published resources

pub mod keys;
pub mod store;

pub use store::Registry;
