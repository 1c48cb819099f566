//! Route lookup and navigation.
//!
//! # Responsibilities
//! - Resolve a location against the route table
//! - Validate captured parameters before forwarding them
//! - Apply the fallback policy when nothing matches
//! - Build links to named routes
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - First match in declaration order wins
//! - Explicit NotFound rather than silent default

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::routing::error::{ResolveError, RouterError};
use crate::routing::location::{with_base, Location};
use crate::routing::matcher::{split_path, MatchOptions};
use crate::routing::params::ParamRules;
use crate::routing::table::{Route, RouteTable};
use crate::routing::view::{Screen, View};

/// What navigation does with a location that no route accepts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Report the location as not found.
    #[default]
    NotFound,
    /// Send the user to another in-app location.
    Redirect { to: String },
}

/// Everything about a router besides its table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterOptions {
    /// History base the application is mounted under.
    pub base: String,
    pub matching: MatchOptions,
    pub params: ParamRules,
    pub fallback: FallbackPolicy,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            base: "/".to_string(),
            matching: MatchOptions::default(),
            params: ParamRules::default(),
            fallback: FallbackPolicy::default(),
        }
    }
}

/// A successful resolution: which view to mount and with what inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    /// Name of the route that matched.
    pub route: String,
    /// The route's declared pattern.
    pub pattern: String,
    pub view: View,
    /// Path relative to the history base.
    pub path: String,
    /// Captured path parameters, as strings.
    pub params: BTreeMap<String, String>,
    /// Inputs forwarded to the view. Empty unless the route forwards params.
    pub props: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
    pub hash: Option<String>,
}

impl RouteMatch {
    /// The typed screen for this match.
    pub fn screen(&self) -> Result<Screen, ResolveError> {
        Screen::from_props(self.view, &self.props)
    }
}

/// Outcome of a navigation after the fallback policy is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Matched(RouteMatch),
    /// Redirect to `to` (base-prefixed) because of `cause`.
    Redirect { to: String, cause: ResolveError },
    NotFound(ResolveError),
}

/// The application's navigation object.
///
/// Built once at startup by the application root and passed by reference;
/// there is no process-wide instance.
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    options: RouterOptions,
}

impl Router {
    pub fn new(table: RouteTable, options: RouterOptions) -> Result<Self, RouterError> {
        if !options.base.starts_with('/') {
            return Err(RouterError::InvalidBase(options.base));
        }

        let router = Self { table, options };
        if let FallbackPolicy::Redirect { to } = &router.options.fallback {
            // A `//x` Location header points at another host.
            if !to.starts_with('/') || to.starts_with("//") {
                return Err(RouterError::InvalidFallback(to.clone()));
            }
            let location = Location::parse(to);
            router
                .resolve_path(&location.path, location.query, location.hash)
                .map_err(|source| RouterError::FallbackUnresolved {
                    to: to.clone(),
                    source,
                })?;
        }
        Ok(router)
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.table.iter()
    }

    /// Resolve a location (path-form or absolute URL) to a route.
    pub fn resolve(&self, location: &str) -> Result<RouteMatch, ResolveError> {
        let location = Location::parse(location);
        let path = location
            .strip_base(&self.options.base)
            .ok_or_else(|| ResolveError::NotFound {
                path: location.path.clone(),
            })?;
        self.resolve_path(&path, location.query, location.hash)
    }

    fn resolve_path(
        &self,
        path: &str,
        query: BTreeMap<String, String>,
        hash: Option<String>,
    ) -> Result<RouteMatch, ResolveError> {
        let segments = split_path(path);
        let mut rejected = None;

        for route in self.table.iter() {
            let Some(params) = route.pattern().matches(&segments, &self.options.matching) else {
                continue;
            };

            if let Some((name, value, rule)) = self.options.params.first_violation(&params) {
                // Keep looking; a later route may still accept the path.
                rejected.get_or_insert_with(|| ResolveError::InvalidParam {
                    route: route.name().to_string(),
                    name: name.to_string(),
                    value: value.to_string(),
                    rule,
                });
                continue;
            }

            let props = if route.props_from_params() {
                params.clone()
            } else {
                BTreeMap::new()
            };
            return Ok(RouteMatch {
                route: route.name().to_string(),
                pattern: route.path().to_string(),
                view: route.view(),
                path: path.to_string(),
                params,
                props,
                query,
                hash,
            });
        }

        Err(rejected.unwrap_or_else(|| ResolveError::NotFound {
            path: path.to_string(),
        }))
    }

    /// Resolve and apply the fallback policy.
    pub fn navigate(&self, location: &str) -> Navigation {
        match self.resolve(location) {
            Ok(matched) => Navigation::Matched(matched),
            Err(cause) => match &self.options.fallback {
                FallbackPolicy::NotFound => Navigation::NotFound(cause),
                FallbackPolicy::Redirect { to } => Navigation::Redirect {
                    to: with_base(&self.options.base, to),
                    cause,
                },
            },
        }
    }

    /// Build a base-prefixed link to a named route.
    pub fn href(
        &self,
        route: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<String, ResolveError> {
        let target = self
            .table
            .get(route)
            .ok_or_else(|| ResolveError::UnknownRoute(route.to_string()))?;

        let path = target
            .pattern()
            .build(params)
            .map_err(|name| ResolveError::MissingParam {
                route: route.to_string(),
                name: name.to_string(),
            })?;
        Ok(with_base(&self.options.base, &path))
    }
}
