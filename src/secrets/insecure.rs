//! Secrets served from configuration.
//!
//! Meant for development setups without a secret store. Values come straight
//! from the `insecure_secrets` section of the config file.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;

use crate::config::InsecureSecret;
use crate::secrets::provider::{CredentialBundle, SecretError, SecretProvider};

/// Thread-safe, in-memory secret provider.
#[derive(Clone, Default)]
pub struct InsecureSecretProvider {
    secrets: Arc<DashMap<String, CredentialBundle>>,
}

impl InsecureSecretProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the `insecure_secrets` config section, indexed by `secret_name`.
    pub fn from_config(secrets: &HashMap<String, InsecureSecret>) -> Self {
        let provider = Self::new();
        for (label, secret) in secrets {
            let name = if secret.secret_name.is_empty() {
                label
            } else {
                &secret.secret_name
            };
            provider.store(name, CredentialBundle::from(secret.secret_data.clone()));
        }
        tracing::debug!(count = provider.secrets.len(), "Loaded insecure secrets from configuration");
        provider
    }

    /// Add or replace a secret.
    pub fn store(&self, name: impl Into<String>, bundle: CredentialBundle) {
        self.secrets.insert(name.into(), bundle);
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

impl SecretProvider for InsecureSecretProvider {
    fn get_secret(&self, name: &str) -> Result<CredentialBundle, SecretError> {
        self.secrets
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| SecretError::NotFound(name.to_string()))
    }
}
