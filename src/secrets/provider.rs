//! SecretProvider trait and credential bundle types.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use thiserror::Error;

/// Errors that can occur while resolving a secret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    /// No secret is stored under the requested name.
    #[error("secret '{0}' not found")]
    NotFound(String),

    /// The secret store could not be reached.
    #[error("secret store unavailable: {0}")]
    Unavailable(String),
}

impl SecretError {
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// Resolves named credential bundles.
///
/// Implementations back onto a secret store, configuration, or a test fake.
/// A failed lookup is final for the caller; it is never retried.
pub trait SecretProvider: Send + Sync {
    fn get_secret(&self, name: &str) -> Result<CredentialBundle, SecretError>;
}

/// Resolved credential key/value set.
///
/// `Debug` prints key names only.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialBundle {
    values: HashMap<String, String>,
}

impl CredentialBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Key names in sorted order.
    pub fn keys(&self) -> BTreeSet<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for CredentialBundle
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl From<HashMap<String, String>> for CredentialBundle {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("keys", &self.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_values() {
        let bundle: CredentialBundle = [("username", "admin"), ("password", "hunter2")]
            .into_iter()
            .collect();
        let printed = format!("{bundle:?}");
        assert!(printed.contains("password"));
        assert!(!printed.contains("hunter2"));
        assert!(!printed.contains("admin"));
    }

    #[test]
    fn test_keys_sorted() {
        let bundle: CredentialBundle = [("password", "p"), ("username", "u")].into_iter().collect();
        assert_eq!(bundle.keys().into_iter().collect::<Vec<_>>(), vec!["password", "username"]);
        assert_eq!(bundle.get("username"), Some("u"));
        assert!(!bundle.contains("cacert"));
    }
}
