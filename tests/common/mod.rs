//! Shared utilities for integration tests.

use axum::body::Body;
use axum::http::{Request, Response};
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt;

use soil_moisture_nav::config::NavConfig;
use soil_moisture_nav::lifecycle::build_router;
use soil_moisture_nav::HttpServer;

pub const INDEX_MARKER: &str = "<div id=\"app\"></div>";

/// A built SPA on disk: `index.html` plus one asset.
pub struct SpaFixture {
    pub dir: TempDir,
}

impl SpaFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("index.html"),
            format!("<!doctype html><html><body>{INDEX_MARKER}</body></html>"),
        )
        .unwrap();
        fs::create_dir(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets").join("app.js"), "console.log('soil');").unwrap();
        Self { dir }
    }

    /// Default config pointed at this fixture.
    pub fn config(&self) -> NavConfig {
        let mut config = NavConfig::default();
        config.listener.bind_address = "127.0.0.1:0".to_string();
        config.spa.index_path = self.dir.path().join("index.html").display().to_string();
        config.spa.assets_dir = self.dir.path().join("assets").display().to_string();
        config
    }
}

pub fn server(config: NavConfig) -> HttpServer {
    let router = build_router(&config).unwrap();
    HttpServer::new(config, router)
}

pub async fn get(server: &HttpServer, uri: &str) -> Response<Body> {
    send(server, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn send(server: &HttpServer, request: Request<Body>) -> Response<Body> {
    server.app().oneshot(request).await.unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
