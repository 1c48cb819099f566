//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! navigation host. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};

use crate::routing::{FallbackPolicy, MatchOptions, ParamRules, RouterOptions};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NavConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Route matching and fallback behaviour.
    pub routing: RoutingConfig,

    /// Where the built single-page application lives.
    pub spa: SpaConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// History base the application is mounted under.
    pub base: String,

    /// Reject trailing slashes the pattern does not declare.
    pub strict: bool,

    /// Match static segments case-sensitively.
    pub sensitive: bool,

    /// What to do when no route matches.
    pub fallback: FallbackPolicy,

    /// Validation rules per parameter name, e.g. `id = "numeric"`.
    pub params: ParamRules,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base: "/".to_string(),
            strict: false,
            sensitive: false,
            fallback: FallbackPolicy::NotFound,
            params: ParamRules::default(),
        }
    }
}

impl RoutingConfig {
    pub fn router_options(&self) -> RouterOptions {
        RouterOptions {
            base: self.base.clone(),
            matching: MatchOptions {
                strict: self.strict,
                sensitive: self.sensitive,
            },
            params: self.params.clone(),
            fallback: self.fallback.clone(),
        }
    }
}

/// Single-page application assets.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SpaConfig {
    /// HTML shell served for every recognised deep link.
    pub index_path: String,

    /// Directory served under `<base>assets/`.
    pub assets_dir: String,
}

impl Default for SpaConfig {
    fn default() -> Self {
        Self {
            index_path: "dist/index.html".to_string(),
            assets_dir: "dist/assets".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::ParamRule;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: NavConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.routing.base, "/");
        assert_eq!(config.routing.fallback, FallbackPolicy::NotFound);
        assert_eq!(config.timeouts.request_secs, 30);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_routing_section() {
        let config: NavConfig = toml::from_str(
            r#"
            [routing]
            base = "/app/"
            strict = true
            fallback = { policy = "redirect", to = "/" }

            [routing.params]
            id = "numeric"
            "#,
        )
        .unwrap();

        let options = config.routing.router_options();
        assert_eq!(options.base, "/app/");
        assert!(options.matching.strict);
        assert!(!options.matching.sensitive);
        assert_eq!(options.fallback, FallbackPolicy::Redirect { to: "/".into() });
        assert_eq!(options.params.rule_for("id"), ParamRule::Numeric);
    }
}
