//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, paths and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: NavConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Whether a redirect target actually resolves is checked when the
//!   router is built, against the real table

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::NavConfig;
use crate::routing::FallbackPolicy;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub fn validate_config(config: &NavConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("{:?} is not a socket address", config.listener.bind_address),
        ));
    }

    if !config.routing.base.starts_with('/') {
        errors.push(ValidationError::new("routing.base", "must start with '/'"));
    }

    if let FallbackPolicy::Redirect { to } = &config.routing.fallback {
        if !to.starts_with('/') {
            errors.push(ValidationError::new(
                "routing.fallback.to",
                "must be an in-app path starting with '/'",
            ));
        } else if to.starts_with("//") {
            // Browsers read a `//x` Location header as another host.
            errors.push(ValidationError::new(
                "routing.fallback.to",
                "must not start with '//'",
            ));
        }
    }

    if config.spa.index_path.trim().is_empty() {
        errors.push(ValidationError::new("spa.index_path", "must not be empty"));
    }

    if config.spa.assets_dir.trim().is_empty() {
        errors.push(ValidationError::new("spa.assets_dir", "must not be empty"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("expected one of {}", LOG_LEVELS.join(", ")),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("{:?} is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
