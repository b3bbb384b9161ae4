//! Secret resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Bootstrap handler (auth mode ≠ none)
//!     → SecretProvider::get_secret(secret_name)   (exactly once)
//!     → CredentialBundle
//!     → messaging auth rules (shape check against the auth mode)
//! ```
//!
//! # Security Constraints
//! - Secret values are never logged; `CredentialBundle` debug output shows keys only
//! - Lookup failures are fatal for the requesting handler, never retried

pub mod insecure;
pub mod provider;

pub use insecure::InsecureSecretProvider;
pub use provider::{CredentialBundle, SecretError, SecretProvider};
