//! Response bodies and error mapping.
//!
//! # Responsibilities
//! - Shape JSON bodies for the resolution API
//! - Map resolution errors to HTTP status codes
//!
//! # Design Decisions
//! - Errors carry a stable machine-readable `error` kind
//! - Unmatched paths are 404, malformed parameters are 422

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::routing::{Navigation, ResolveError, RouteMatch, Screen};

/// Body returned by `/api/resolve` on success.
#[derive(Debug, Serialize)]
pub struct Resolution {
    #[serde(flatten)]
    pub matched: RouteMatch,
    /// Typed view plus inputs, when the view's inputs are complete.
    pub screen: Option<Screen>,
}

impl From<RouteMatch> for Resolution {
    fn from(matched: RouteMatch) -> Self {
        let screen = matched.screen().ok();
        Self { matched, screen }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: "bad_request",
            message: message.into(),
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        let status = match &err {
            ResolveError::NotFound { .. } | ResolveError::UnknownRoute(_) => StatusCode::NOT_FOUND,
            ResolveError::InvalidParam { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ResolveError::MissingParam { .. } => StatusCode::BAD_REQUEST,
            ResolveError::MissingProp { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            error: err.kind(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// JSON description of a navigation outcome.
pub fn navigation_body(navigation: &Navigation) -> serde_json::Value {
    match navigation {
        Navigation::Matched(matched) => serde_json::json!({
            "outcome": "matched",
            "resolution": Resolution::from(matched.clone()),
        }),
        Navigation::Redirect { to, cause } => serde_json::json!({
            "outcome": "redirect",
            "to": to,
            "cause": ApiError::from(cause.clone()),
        }),
        Navigation::NotFound(cause) => serde_json::json!({
            "outcome": "not_found",
            "cause": ApiError::from(cause.clone()),
        }),
    }
}
