//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (startup timer)
//!     → validation.rs (semantic checks)
//!     → BootstrapConfig (validated, immutable)
//!     → resource sections handed to the registry
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Retry interval and budget are configuration, never constants

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AuthMode, BootstrapConfig, InsecureSecret, ObservabilityConfig, ResourceConfig, StartupConfig,
};
pub use validation::ValidationError;
