//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{BootstrapConfig, StartupConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Overrides `startup.duration_secs`.
pub const ENV_STARTUP_DURATION: &str = "BOOTSTRAP_STARTUP_DURATION";

/// Overrides `startup.interval_secs`.
pub const ENV_STARTUP_INTERVAL: &str = "BOOTSTRAP_STARTUP_INTERVAL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// Startup timer values from the environment take precedence over the file.
pub fn load_config(path: &Path) -> Result<BootstrapConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse, apply environment overrides and validate a TOML document.
pub fn parse_config(content: &str) -> Result<BootstrapConfig, ConfigError> {
    let mut config: BootstrapConfig = toml::from_str(content)?;
    apply_startup_overrides(&mut config.startup, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Replace startup timer values with any set through `lookup`.
///
/// Values that are not whole seconds are logged and ignored.
pub fn apply_startup_overrides<F>(startup: &mut StartupConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(secs) = read_secs(&lookup, ENV_STARTUP_DURATION) {
        startup.duration_secs = secs;
    }
    if let Some(secs) = read_secs(&lookup, ENV_STARTUP_INTERVAL) {
        startup.interval_secs = secs;
    }
}

fn read_secs<F>(lookup: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(secs) => {
            tracing::info!(variable = key, value = secs, "Startup timer overridden from environment");
            Some(secs)
        }
        Err(e) => {
            tracing::warn!(variable = key, value = %raw, error = %e, "Ignoring invalid startup timer override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::AuthMode;
    use std::collections::HashMap;
    use std::io::Write;

    const SAMPLE: &str = r#"
        [startup]
        duration_secs = 30
        interval_secs = 2

        [message_bus]
        type = "redis"
        protocol = "redis"
        host = "localhost"
        port = 6379
        auth_mode = "usernamepassword"
        secret_name = "redisdb"

        [message_bus.optional]
        ClientId = "core-data"

        [insecure_secrets.redisdb]
        secret_name = "redisdb"

        [insecure_secrets.redisdb.secret_data]
        username = "app"
        password = "pw"
    "#;

    #[test]
    fn test_parse_full_document() {
        let config: BootstrapConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.startup.duration_secs, 30);

        let bus = config.message_bus.unwrap();
        assert_eq!(bus.kind, "redis");
        assert_eq!(bus.auth_mode, AuthMode::UsernamePassword);
        assert_eq!(bus.optional.get("ClientId").map(String::as_str), Some("core-data"));

        let secret = &config.insecure_secrets["redisdb"];
        assert_eq!(secret.secret_data.len(), 2);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert!(config.message_bus.is_some());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/bootstrap.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_invalid_document_is_validation_error() {
        let err = parse_config("[message_bus]\ntype = \"redis\"\nhost = \"\"\nport = 1\n").unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors, vec![ValidationError::EmptyField("host")]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_STARTUP_DURATION, "120"),
            (ENV_STARTUP_INTERVAL, "soon"),
        ]
        .into_iter()
        .collect();

        let mut startup = StartupConfig::default();
        apply_startup_overrides(&mut startup, |key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(startup.duration_secs, 120);
        // Unparsable value keeps the default.
        assert_eq!(startup.interval_secs, 1);
    }
}
