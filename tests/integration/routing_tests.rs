//! Routing integration tests.
//!
//! Unmatched paths and wrong methods never reach a handler

use crate::common::{admin_auth, store, test_server};
use axum::http::{StatusCode, header};

#[tokio::test]
async fn test_unknown_paths_are_not_found() {
    let (server, _temp) = test_server();

    for path in ["/nope", "/about", "/blog", "/blog/view/", "/admin/blog/edit/", "/admin/x/"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "{}", path);
    }
}

#[tokio::test]
async fn test_unknown_admin_path_is_not_found_without_auth() {
    let (server, _temp) = test_server();

    // No route matched, so the auth gate never runs
    let response = server.get("/admin/secret/").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
}

#[tokio::test]
async fn test_get_on_save_is_method_not_allowed() {
    let (server, temp) = test_server();

    let response = server
        .get("/admin/blog/save/")
        .add_header(header::AUTHORIZATION, admin_auth())
        .await;

    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers().get(header::ALLOW).unwrap(), "POST");
    assert!(store(&temp).list_admin().unwrap().is_empty());
}

#[tokio::test]
async fn test_post_on_page_is_method_not_allowed() {
    let (server, _temp) = test_server();

    let response = server.post("/about/").await;

    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers().get(header::ALLOW).unwrap(), "GET");
}
