//! General integration tests.
//!
//! Tests for health check and the fixed content pages

use crate::common::test_server;
use axum::http::StatusCode;

#[tokio::test]
async fn test_health_check() {
    let (server, _temp) = test_server();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_home_page() {
    let (server, _temp) = test_server();

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().starts_with("<!DOCTYPE html>"));
}

#[tokio::test]
async fn test_about_page() {
    let (server, _temp) = test_server();

    let response = server.get("/about/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("<h1>About</h1>"));
}

#[tokio::test]
async fn test_links_page() {
    let (server, _temp) = test_server();

    let response = server.get("/links/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("<h1>Links</h1>"));
}
