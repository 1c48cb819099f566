//! Routing error definitions.

use thiserror::Error;

use crate::routing::params::ParamRule;
use crate::routing::view::View;

/// A path pattern that cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern {pattern:?} must start with '/'")]
    MissingLeadingSlash { pattern: String },

    #[error("pattern {pattern:?} has an invalid parameter name {name:?}")]
    InvalidParamName { pattern: String, name: String },

    #[error("pattern {pattern:?} declares parameter {name:?} more than once")]
    DuplicateParam { pattern: String, name: String },
}

/// Errors raised while building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(
        "path {path:?} of route {route:?} collides with {existing_path:?} of route {existing:?}"
    )]
    DuplicatePath {
        route: String,
        path: String,
        existing: String,
        existing_path: String,
    },

    #[error("route name {0:?} is declared more than once")]
    DuplicateName(String),
}

/// Errors raised while resolving a location or building a link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no route matches {path:?}")]
    NotFound { path: String },

    #[error("parameter {name:?} of route {route:?} is not a valid {rule}: {value:?}")]
    InvalidParam {
        route: String,
        name: String,
        value: String,
        rule: ParamRule,
    },

    #[error("no route named {0:?}")]
    UnknownRoute(String),

    #[error("route {route:?} needs parameter {name:?}")]
    MissingParam { route: String, name: String },

    #[error("view {view} needs input {name:?}")]
    MissingProp { view: View, name: String },
}

impl ResolveError {
    /// Short machine-readable kind used in logs, metrics and API bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolveError::NotFound { .. } => "not_found",
            ResolveError::InvalidParam { .. } => "invalid_param",
            ResolveError::UnknownRoute(_) => "unknown_route",
            ResolveError::MissingParam { .. } => "missing_param",
            ResolveError::MissingProp { .. } => "missing_prop",
        }
    }
}

/// Errors raised while assembling a [`Router`](crate::routing::Router).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("fallback location {to:?} does not resolve: {source}")]
    FallbackUnresolved {
        to: String,
        #[source]
        source: ResolveError,
    },

    #[error("history base {0:?} must start with '/'")]
    InvalidBase(String),

    #[error("fallback location {0:?} must be an in-app path starting with a single '/'")]
    InvalidFallback(String),
}
