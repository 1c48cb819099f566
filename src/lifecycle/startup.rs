//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the route table and the navigation router from config
//! - Fail fast on any table or router error
//!
//! # Design Decisions
//! - The router is built exactly once, here, and handed out by `Arc`
//! - Both binaries share this path so they agree on routing

use std::sync::Arc;
use thiserror::Error;

use crate::config::NavConfig;
use crate::routing::{RouteTable, RouteTableError, Router, RouterError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("route table: {0}")]
    Table(#[from] RouteTableError),

    #[error("router: {0}")]
    Router(#[from] RouterError),
}

/// Build the application's navigation router.
pub fn build_router(config: &NavConfig) -> Result<Arc<Router>, StartupError> {
    let table = RouteTable::standard()?;
    let router = Router::new(table, config.routing.router_options())?;

    tracing::info!(
        routes = router.table().len(),
        base = %router.options().base,
        strict = router.options().matching.strict,
        sensitive = router.options().matching.sensitive,
        "Route table compiled"
    );
    Ok(Arc::new(router))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::FallbackPolicy;

    #[test]
    fn test_build_default_router() {
        let router = build_router(&NavConfig::default()).unwrap();
        assert_eq!(router.table().len(), 4);
    }

    #[test]
    fn test_bad_fallback_fails_startup() {
        let mut config = NavConfig::default();
        config.routing.fallback = FallbackPolicy::Redirect { to: "/missing".into() };
        let err = build_router(&config).unwrap_err();
        assert!(matches!(err, StartupError::Router(RouterError::FallbackUnresolved { .. })));
    }

    #[test]
    fn test_off_site_fallback_fails_startup_without_validation() {
        let mut config = NavConfig::default();
        config.routing.fallback = FallbackPolicy::Redirect {
            to: "//create-soil-moisture".into(),
        };
        let err = build_router(&config).unwrap_err();
        assert!(matches!(err, StartupError::Router(RouterError::InvalidFallback(_))));
    }
}
