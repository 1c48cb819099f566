//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve the SPA shell for every deep link the route table knows
//! - Expose the route table and resolution over JSON
//! - Bind server to listener and shut down gracefully

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::NavConfig;
use crate::http::request::{make_request_span, request_id_header, RequestIdExt};
use crate::http::response::{ApiError, Resolution};
use crate::observability::metrics;
use crate::routing::table::RouteSummary;
use crate::routing::{Navigation, Route, Router as NavRouter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<NavRouter>,
    pub index_path: Arc<PathBuf>,
}

/// HTTP host for the single-page application.
pub struct HttpServer {
    app: Router,
    config: NavConfig,
}

impl HttpServer {
    /// Create a new HTTP server around an already-built navigation router.
    pub fn new(config: NavConfig, router: Arc<NavRouter>) -> Self {
        let state = AppState {
            router,
            index_path: Arc::new(PathBuf::from(&config.spa.index_path)),
        };
        let app = Self::build_app(&config, state);
        Self { app, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &NavConfig, state: AppState) -> Router {
        let assets_path = format!("{}/assets", config.routing.base.trim_end_matches('/'));

        Router::new()
            .route("/health", get(health_handler))
            .route("/api/routes", get(routes_handler))
            .route("/api/resolve", get(resolve_handler))
            .nest_service(&assets_path, ServeDir::new(&config.spa.assets_dir))
            .fallback(navigate_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
                    .layer(PropagateRequestIdLayer::new(request_id_header())),
            )
    }

    /// The fully layered router, for driving without a socket.
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            base = %self.config.routing.base,
            "HTTP server starting"
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &NavConfig {
        &self.config
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn routes_handler(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    metrics::record_request("routes", 200);
    Json(state.router.routes().map(Route::summary).collect())
}

#[derive(Debug, Deserialize)]
struct ResolveQuery {
    path: Option<String>,
}

async fn resolve_handler(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<Resolution>, ApiError> {
    let Some(path) = query.path else {
        metrics::record_request("resolve", 400);
        return Err(ApiError::bad_request("missing `path` query parameter"));
    };

    match state.router.resolve(&path) {
        Ok(matched) => {
            tracing::debug!(path = %path, route = %matched.route, view = %matched.view, "Resolved");
            metrics::record_request("resolve", 200);
            Ok(Json(Resolution::from(matched)))
        }
        Err(e) => {
            let err = ApiError::from(e);
            tracing::debug!(path = %path, error = %err.message, "Resolution failed");
            metrics::record_request("resolve", err.status.as_u16());
            Err(err)
        }
    }
}

/// History-mode fallback: any path the table accepts gets the SPA shell.
async fn navigate_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    if request.method() != Method::GET && request.method() != Method::HEAD {
        metrics::record_request("navigate", 405);
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let request_id = request.request_id().to_string();
    let location = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    let navigation = state.router.navigate(&location);
    metrics::record_navigation(&navigation);

    match navigation {
        Navigation::Matched(matched) => {
            tracing::debug!(
                request_id = %request_id,
                route = %matched.route,
                view = %matched.view,
                "Serving application shell"
            );
            serve_index(&state, &request_id).await
        }
        Navigation::Redirect { to, cause } => {
            tracing::info!(
                request_id = %request_id,
                location = %location,
                to = %to,
                cause = %cause,
                "Redirecting"
            );
            metrics::record_request("navigate", 302);
            (StatusCode::FOUND, [(header::LOCATION, to)]).into_response()
        }
        Navigation::NotFound(cause) => {
            tracing::warn!(
                request_id = %request_id,
                location = %location,
                cause = %cause,
                "No route matched"
            );
            metrics::record_request("navigate", 404);
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
    }
}

async fn serve_index(state: &AppState, request_id: &str) -> Response {
    match tokio::fs::read_to_string(state.index_path.as_path()).await {
        Ok(html) => {
            metrics::record_request("navigate", 200);
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                html,
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                index_path = %state.index_path.display(),
                error = %e,
                "Failed to read application shell"
            );
            metrics::record_request("navigate", 500);
            (StatusCode::INTERNAL_SERVER_ERROR, "Application shell unavailable").into_response()
        }
    }
}
