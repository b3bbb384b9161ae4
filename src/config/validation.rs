//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timer settings > 0, ports valid)
//! - Check that credential-gated resources name their secret
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BootstrapConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{BootstrapConfig, ResourceConfig};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("startup.interval_secs must be greater than zero")]
    ZeroInterval,

    #[error("startup.duration_secs must be greater than zero")]
    ZeroDuration,

    #[error("startup.interval_secs ({interval}) exceeds startup.duration_secs ({duration})")]
    IntervalExceedsDuration { interval: u64, duration: u64 },

    #[error("message_bus.{0} must not be empty")]
    EmptyField(&'static str),

    #[error("message_bus.port must be non-zero")]
    ZeroPort,

    #[error("message_bus.secret_name is required for auth mode '{0}'")]
    MissingSecretName(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &BootstrapConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let startup = &config.startup;
    if startup.interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval);
    }
    if startup.duration_secs == 0 {
        errors.push(ValidationError::ZeroDuration);
    }
    if startup.interval_secs > startup.duration_secs && startup.duration_secs > 0 {
        errors.push(ValidationError::IntervalExceedsDuration {
            interval: startup.interval_secs,
            duration: startup.duration_secs,
        });
    }

    if let Some(bus) = &config.message_bus {
        validate_resource(bus, &mut errors);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_resource(resource: &ResourceConfig, errors: &mut Vec<ValidationError>) {
    if resource.kind.trim().is_empty() {
        errors.push(ValidationError::EmptyField("type"));
    }
    if resource.host.trim().is_empty() {
        errors.push(ValidationError::EmptyField("host"));
    }
    if resource.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if resource.auth_mode.requires_secret() && resource.secret_name.trim().is_empty() {
        errors.push(ValidationError::MissingSecretName(resource.auth_mode.to_string()));
    }
}
