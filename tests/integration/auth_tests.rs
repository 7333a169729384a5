//! Auth gate integration tests.
//!
//! Every admin route demands basic-auth credentials on every request

use crate::common::{admin_auth, store, test_server};
use axum::http::{HeaderValue, StatusCode, header};

const CHALLENGE: &str = r#"Basic realm="restricted", charset="UTF-8""#;

const ADMIN_GETS: [&str; 4] = [
    "/admin/",
    "/admin/blog/",
    "/admin/blog/create/",
    "/admin/blog/edit/anything",
];

#[tokio::test]
async fn test_admin_pages_challenge_without_credentials() {
    let (server, _temp) = test_server();

    for path in ADMIN_GETS {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{}", path);
        let challenge = response.headers().get(header::WWW_AUTHENTICATE).unwrap();
        assert_eq!(challenge, CHALLENGE);
    }
}

#[tokio::test]
async fn test_wrong_and_malformed_credentials_rejected() {
    let (server, _temp) = test_server();

    for value in [
        "Basic YWRtaW46d3Jvbmc=", // admin:wrong
        "Basic cm9vdDpzZWNyZXQ=", // root:secret
        "Basic not base64 at all",
        "Bearer YWRtaW46c2VjcmV0",
    ] {
        let response = server
            .get("/admin/")
            .add_header(header::AUTHORIZATION, HeaderValue::from_static(value))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{}", value);
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_some());
    }
}

#[tokio::test]
async fn test_valid_credentials_reach_admin() {
    let (server, _temp) = test_server();

    let response = server
        .get("/admin/")
        .add_header(header::AUTHORIZATION, admin_auth())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Manage posts"));
}

#[tokio::test]
async fn test_unauthorized_save_writes_nothing() {
    let (server, temp) = test_server();

    let response = server
        .post("/admin/blog/save/")
        .form(&[("title", "Sneaky"), ("blogPost", "nope")])
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert!(store(&temp).list_admin().unwrap().is_empty());
}

#[tokio::test]
async fn test_unauthorized_delete_keeps_post() {
    let (server, temp) = test_server();
    let posts = store(&temp);
    posts.create("Keep me", "body", "<p>body</p>").unwrap();

    let response = server
        .post("/admin/blog/delete/")
        .form(&[("title", "Keep me")])
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(posts.read("Keep me").unwrap().body, "body");
}

#[tokio::test]
async fn test_public_pages_need_no_credentials() {
    let (server, _temp) = test_server();

    for path in ["/", "/about/", "/links/", "/blog/"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::OK, "{}", path);
    }
}
