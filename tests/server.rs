//! HTTP behaviour of the navigation host.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use soil_moisture_nav::routing::{FallbackPolicy, ParamRule, ParamRules};
use soil_moisture_nav::http::X_REQUEST_ID;
use soil_moisture_nav::lifecycle::build_router;
use soil_moisture_nav::Shutdown;

mod common;

use common::{body_json, body_string, get, send, server, SpaFixture, INDEX_MARKER};

#[tokio::test]
async fn test_deep_links_serve_the_shell() {
    let spa = SpaFixture::new();
    let server = server(spa.config());

    let uris = [
        "/",
        "/soil-moisture-records",
        "//create-soil-moisture",
        "/edit-request/123?tab=1",
    ];
    for uri in uris {
        let response = get(&server, uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert!(response.headers().contains_key(X_REQUEST_ID));
        assert!(body_string(response).await.contains(INDEX_MARKER));
    }
}

#[tokio::test]
async fn test_unknown_paths_are_404() {
    let spa = SpaFixture::new();
    let server = server(spa.config());

    for uri in ["/create-soil-moisture", "/edit-request/", "/nowhere", "//"] {
        let response = get(&server, uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body_string(response).await, "Not Found");
    }
}

#[tokio::test]
async fn test_redirect_fallback() {
    let spa = SpaFixture::new();
    let mut config = spa.config();
    config.routing.fallback = FallbackPolicy::Redirect {
        to: "/soil-moisture-records".to_string(),
    };
    let server = server(config);

    let response = get(&server, "/old-link").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/soil-moisture-records");
}

#[test]
fn test_off_site_redirect_is_refused() {
    let spa = SpaFixture::new();
    let mut config = spa.config();
    config.routing.fallback = FallbackPolicy::Redirect {
        to: "//create-soil-moisture".to_string(),
    };
    assert!(build_router(&config).is_err());
}

#[tokio::test]
async fn test_history_base() {
    let spa = SpaFixture::new();
    let mut config = spa.config();
    config.routing.base = "/app/".to_string();
    let server = server(config);

    assert_eq!(get(&server, "/app/edit-request/9").await.status(), StatusCode::OK);
    assert_eq!(get(&server, "/edit-request/9").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&server, "/app/assets/app.js").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_assets_are_served() {
    let spa = SpaFixture::new();
    let server = server(spa.config());

    let response = get(&server, "/assets/app.js").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "console.log('soil');");
}

#[tokio::test]
async fn test_missing_shell_is_500() {
    let spa = SpaFixture::new();
    let mut config = spa.config();
    config.spa.index_path = spa.dir.path().join("gone.html").display().to_string();
    let server = server(config);

    assert_eq!(get(&server, "/").await.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_non_get_is_rejected() {
    let spa = SpaFixture::new();
    let server = server(spa.config());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/soil-moisture-records")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&server, request).await.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let spa = SpaFixture::new();
    let server = server(spa.config());

    let request = Request::builder()
        .uri("/health")
        .header(X_REQUEST_ID, "req-42")
        .body(Body::empty())
        .unwrap();
    let response = send(&server, request).await;
    assert_eq!(response.headers()[X_REQUEST_ID], "req-42");
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_api_resolve() {
    let spa = SpaFixture::new();
    let server = server(spa.config());

    let response = get(&server, "/api/resolve?path=%2Fedit-request%2F123").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["route"], "edit-request");
    assert_eq!(body["view"], "edit-request");
    assert_eq!(body["props"]["id"], "123");
    assert_eq!(body["screen"]["id"], "123");

    let response = get(&server, "/api/resolve?path=%2F%2Fcreate-soil-moisture").await;
    assert_eq!(body_json(response).await["view"], "create-request");

    let response = get(&server, "/api/resolve?path=%2Fcreate-soil-moisture").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "not_found");

    let response = get(&server, "/api/resolve").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_api_resolve_invalid_param() {
    let spa = SpaFixture::new();
    let mut config = spa.config();
    config.routing.params = ParamRules::new().with("id", ParamRule::Numeric);
    let server = server(config);

    let response = get(&server, "/api/resolve?path=%2Fedit-request%2Fabc").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"], "invalid_param");

    assert_eq!(get(&server, "/edit-request/abc").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&server, "/edit-request/12").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_api_routes() {
    let spa = SpaFixture::new();
    let server = server(spa.config());

    let body = body_json(get(&server, "/api/routes").await).await;
    let routes = body.as_array().unwrap();
    assert_eq!(routes.len(), 4);
    assert_eq!(routes[1]["path"], "//create-soil-moisture");
    assert_eq!(routes[3]["props_from_params"], true);
}

#[tokio::test]
async fn test_graceful_shutdown_over_tcp() {
    let spa = SpaFixture::new();
    let server = server(spa.config());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(
            b"GET //create-soil-moisture HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await
        .unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();
    assert!(raw.starts_with("HTTP/1.1 200 OK"), "{raw}");
    assert!(raw.contains(INDEX_MARKER));

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
}
