//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a bootstrapped service.
//! All types derive Serde traits for deserialization from config files.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the bootstrap service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Startup timer settings shared by every bootstrap handler.
    pub startup: StartupConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Message bus the service depends on. Absent means nothing to bootstrap.
    pub message_bus: Option<ResourceConfig>,

    /// Secrets served from configuration instead of a secret store.
    /// Keyed by an arbitrary label; lookups go by `secret_name`.
    pub insecure_secrets: HashMap<String, InsecureSecret>,
}

/// Startup timer configuration.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct StartupConfig {
    /// Total time budget for bringing dependencies online, in seconds.
    pub duration_secs: u64,

    /// Wait between connection attempts, in seconds.
    pub interval_secs: u64,
}

impl StartupConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            duration_secs: 60,
            interval_secs: 1,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Connection settings for a dependent resource such as a message bus.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ResourceConfig {
    /// Implementation type (e.g., "redis", "mqtt").
    #[serde(rename = "type")]
    pub kind: String,

    /// Transport protocol used in the broker URL (e.g., "redis", "tcp").
    pub protocol: String,

    pub host: String,

    pub port: u16,

    /// Which credential shape the connection requires.
    pub auth_mode: AuthMode,

    /// Name of the credential bundle in the secret store.
    pub secret_name: String,

    /// Extra implementation-specific settings. Drained into the client
    /// configuration on every bootstrap run.
    pub optional: HashMap<String, String>,
}

/// Credential shape required by a resource connection.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq, Hash)]
pub enum AuthMode {
    #[default]
    #[serde(rename = "none", alias = "")]
    None,
    #[serde(rename = "usernamepassword")]
    UsernamePassword,
    #[serde(rename = "clientcert")]
    ClientCert,
    #[serde(rename = "cacert")]
    CaCert,
    #[serde(rename = "usernamepassword+clientcert")]
    UsernamePasswordAndClientCert,
}

impl AuthMode {
    pub const ALL: [AuthMode; 5] = [
        AuthMode::None,
        AuthMode::UsernamePassword,
        AuthMode::ClientCert,
        AuthMode::CaCert,
        AuthMode::UsernamePasswordAndClientCert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::None => "none",
            AuthMode::UsernamePassword => "usernamepassword",
            AuthMode::ClientCert => "clientcert",
            AuthMode::CaCert => "cacert",
            AuthMode::UsernamePasswordAndClientCert => "usernamepassword+clientcert",
        }
    }

    /// Whether credentials must be fetched from the secret store.
    pub fn requires_secret(&self) -> bool {
        !matches!(self, AuthMode::None)
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A secret served straight from configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct InsecureSecret {
    /// Name the secret is requested by.
    pub secret_name: String,

    /// Credential key/value pairs.
    pub secret_data: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BootstrapConfig::default();
        assert_eq!(config.startup.duration_secs, 60);
        assert_eq!(config.startup.interval_secs, 1);
        assert!(config.message_bus.is_none());
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_auth_mode_names() {
        let resource: ResourceConfig = toml::from_str(
            "type = \"redis\"\nauth_mode = \"usernamepassword+clientcert\"",
        )
        .unwrap();
        assert_eq!(resource.auth_mode, AuthMode::UsernamePasswordAndClientCert);

        let resource: ResourceConfig = toml::from_str("auth_mode = \"\"").unwrap();
        assert_eq!(resource.auth_mode, AuthMode::None);

        assert!(toml::from_str::<ResourceConfig>("auth_mode = \"kerberos\"").is_err());
    }

    #[test]
    fn test_only_none_skips_secret() {
        assert!(!AuthMode::None.requires_secret());
        assert!(AuthMode::ALL[1..].iter().all(AuthMode::requires_secret));
    }
}
