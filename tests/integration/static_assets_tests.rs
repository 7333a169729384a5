//! Static assets integration tests.

use crate::common::test_server;
use axum::http::StatusCode;

#[tokio::test]
async fn test_stylesheet_served_verbatim() {
    let (server, _temp) = test_server();

    let response = server.get("/static/style.css").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let content_type = response.headers().get("content-type").unwrap();
    assert_eq!(content_type.to_str().unwrap(), "text/css");
    assert_eq!(response.text(), "body { font-family: serif; }");
}

#[tokio::test]
async fn test_missing_asset_not_found() {
    let (server, _temp) = test_server();

    let response = server.get("/static/missing.js").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
