//! The route table.
//!
//! # Responsibilities
//! - Declare the finite mapping from path patterns to views
//! - Reject ambiguous tables when they are built
//!
//! # Design Decisions
//! - Immutable after construction; shared by reference
//! - Declaration order is match order
//! - Two patterns collide when they differ only in parameter names

use serde::Serialize;

use crate::routing::error::{PatternError, RouteTableError};
use crate::routing::matcher::RoutePattern;
use crate::routing::view::View;

/// A single route declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    name: String,
    pattern: RoutePattern,
    view: View,
    props_from_params: bool,
}

impl Route {
    pub fn new(name: impl Into<String>, path: &str, view: View) -> Result<Self, PatternError> {
        Ok(Self {
            name: name.into(),
            pattern: RoutePattern::parse(path)?,
            view,
            props_from_params: false,
        })
    }

    /// Forward matched path parameters to the view as inputs.
    pub fn with_props(mut self) -> Self {
        self.props_from_params = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn props_from_params(&self) -> bool {
        self.props_from_params
    }

    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            name: self.name.clone(),
            path: self.pattern.as_str().to_string(),
            view: self.view,
            props_from_params: self.props_from_params,
        }
    }
}

/// Serializable view of a route for listings.
#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub name: String,
    pub path: String,
    pub view: View,
    pub props_from_params: bool,
}

/// An ordered, validated set of routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build a table, failing on duplicate names or colliding paths.
    pub fn new(routes: Vec<Route>) -> Result<Self, RouteTableError> {
        for (i, route) in routes.iter().enumerate() {
            for earlier in &routes[..i] {
                if earlier.name == route.name {
                    return Err(RouteTableError::DuplicateName(route.name.clone()));
                }
                if earlier.pattern.shape() == route.pattern.shape() {
                    return Err(RouteTableError::DuplicatePath {
                        route: route.name.clone(),
                        path: route.path().to_string(),
                        existing: earlier.name.clone(),
                        existing_path: earlier.path().to_string(),
                    });
                }
            }
        }
        Ok(Self { routes })
    }

    /// The soil moisture application's navigation table.
    ///
    /// `//create-soil-moisture` keeps its doubled leading slash: deployed
    /// links point at it, and the single-slash form is deliberately not a
    /// route.
    pub fn standard() -> Result<Self, RouteTableError> {
        Self::new(vec![
            Route::new("home", "/", View::Home)?,
            Route::new("create-soil-moisture", "//create-soil-moisture", View::CreateRequest)?,
            Route::new("soil-moisture-records", "/soil-moisture-records", View::RecordList)?,
            Route::new("edit-request", "/edit-request/:id", View::EditRequest)?.with_props(),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let table = RouteTable::standard().unwrap();
        assert_eq!(table.len(), 4);

        let paths: Vec<_> = table.iter().map(|r| r.path()).collect();
        assert_eq!(
            paths,
            vec!["/", "//create-soil-moisture", "/soil-moisture-records", "/edit-request/:id"]
        );

        let edit = table.get("edit-request").unwrap();
        assert_eq!(edit.view(), View::EditRequest);
        assert!(edit.props_from_params());
        assert!(!table.get("home").unwrap().props_from_params());
    }

    #[test]
    fn test_construction_is_idempotent() {
        assert_eq!(RouteTable::standard().unwrap(), RouteTable::standard().unwrap());
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let err = RouteTable::new(vec![
            Route::new("a", "/records", View::RecordList).unwrap(),
            Route::new("b", "/records", View::Home).unwrap(),
        ])
        .unwrap_err();
        assert!(matches!(err, RouteTableError::DuplicatePath { .. }));
    }

    #[test]
    fn test_param_rename_still_collides() {
        let err = RouteTable::new(vec![
            Route::new("a", "/edit-request/:id", View::EditRequest).unwrap(),
            Route::new("b", "/edit-request/:key", View::Home).unwrap(),
        ])
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "path \"/edit-request/:key\" of route \"b\" collides with \
             \"/edit-request/:id\" of route \"a\""
        );
    }

    #[test]
    fn test_doubled_slash_does_not_collide_with_single() {
        let table = RouteTable::new(vec![
            Route::new("a", "//create-soil-moisture", View::CreateRequest).unwrap(),
            Route::new("b", "/create-soil-moisture", View::CreateRequest).unwrap(),
        ]);
        assert!(table.is_ok());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = RouteTable::new(vec![
            Route::new("home", "/", View::Home).unwrap(),
            Route::new("home", "/start", View::Home).unwrap(),
        ])
        .unwrap_err();
        assert_eq!(err, RouteTableError::DuplicateName("home".into()));
    }

    #[test]
    fn test_summary_serializes() {
        let table = RouteTable::standard().unwrap();
        let json = serde_json::to_value(table.get("edit-request").unwrap().summary()).unwrap();
        assert_eq!(json["path"], "/edit-request/:id");
        assert_eq!(json["view"], "edit-request");
        assert_eq!(json["props_from_params"], true);
    }
}
