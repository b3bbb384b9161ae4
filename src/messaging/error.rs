//! Messaging bootstrap error definitions.

use std::time::Duration;

use thiserror::Error;

use crate::config::AuthMode;
use crate::secrets::SecretError;

/// The resource configuration and credentials do not fit together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("auth mode '{0}' requires credentials but none were supplied")]
    CredentialsRequired(AuthMode),

    #[error("auth mode 'none' does not accept credentials")]
    CredentialsNotAccepted,

    #[error("credential '{key}' required by auth mode '{mode}' is missing")]
    MissingCredential { mode: AuthMode, key: &'static str },

    #[error("credential '{key}' is not used by auth mode '{mode}'")]
    UnexpectedCredential { mode: AuthMode, key: String },

    #[error("credential '{key}' is not valid PEM: {reason}")]
    InvalidPem { key: &'static str, reason: String },

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("port must be non-zero")]
    InvalidPort,

    #[error("optional setting '{0}' is reserved for credentials from the secret store")]
    ReservedOption(String),

    #[error("optional setting '{key}' is invalid: {reason}")]
    InvalidOption { key: String, reason: String },
}

/// A transport connection attempt failed. Always retryable.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("connection failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection timed out after {0:?}")]
    Timeout(Duration),

    #[error("broker unreachable: {0}")]
    Unreachable(String),
}

/// Why a bootstrap handler gave up.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// No resource configuration registered.
    #[error("no {0} configuration registered")]
    ConfigMissing(&'static str),

    /// Credential lookup failed.
    #[error("failed to retrieve secret '{name}': {source}")]
    SecretRetrieval {
        name: String,
        #[source]
        source: SecretError,
    },

    /// Credentials or settings do not match the auth mode.
    #[error("invalid client configuration: {0}")]
    ConfigValidation(#[from] ConfigValidationError),

    /// Retry budget spent without a successful connection.
    #[error("gave up after {attempts} connection attempt(s) in {elapsed:?}")]
    Exhausted {
        attempts: u32,
        elapsed: Duration,
        #[source]
        last_error: Option<ConnectionError>,
    },

    /// Shutdown requested while retrying.
    #[error("cancelled after {attempts} connection attempt(s)")]
    Cancelled { attempts: u32 },
}

impl BootstrapError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            BootstrapError::ConfigMissing(_) => "config_missing",
            BootstrapError::SecretRetrieval { .. } => "secret_retrieval",
            BootstrapError::ConfigValidation(_) => "config_validation",
            BootstrapError::Exhausted { .. } => "connection",
            BootstrapError::Cancelled { .. } => "cancelled",
        }
    }

    /// Number of transport attempts made before failing.
    pub fn attempts(&self) -> u32 {
        match self {
            BootstrapError::Exhausted { attempts, .. } | BootstrapError::Cancelled { attempts } => *attempts,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = BootstrapError::SecretRetrieval {
            name: "redisdb".into(),
            source: SecretError::NotFound("redisdb".into()),
        };
        assert_eq!(
            err.to_string(),
            "failed to retrieve secret 'redisdb': secret 'redisdb' not found"
        );
        assert_eq!(err.kind(), "secret_retrieval");
        assert_eq!(err.attempts(), 0);

        let err = ConfigValidationError::MissingCredential {
            mode: AuthMode::ClientCert,
            key: "clientkey",
        };
        assert_eq!(
            err.to_string(),
            "credential 'clientkey' required by auth mode 'clientcert' is missing"
        );
    }

    #[test]
    fn test_exhausted_keeps_last_cause() {
        let err = BootstrapError::Exhausted {
            attempts: 3,
            elapsed: Duration::from_secs(2),
            last_error: Some(ConnectionError::Timeout(Duration::from_secs(1))),
        };
        assert_eq!(err.attempts(), 3);
        assert_eq!(err.kind(), "connection");
        assert!(err.source().unwrap().to_string().contains("timed out"));
    }
}
