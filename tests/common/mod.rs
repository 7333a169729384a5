//! Shared test utilities for integration tests.

use axum::http::HeaderValue;
use axum_test::TestServer;
use quill::{AppState, Credentials, PostStore, create_app};
use std::sync::Arc;
use tempfile::TempDir;
use time::{Date, macros::date};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";

/// Fixed "today" so new-post filenames are predictable.
pub const TODAY: Date = date!(2024 - 01 - 02);

fn fixed_today() -> Date {
    TODAY
}

/// `Authorization` value for the test admin account ("admin:secret").
pub fn admin_auth() -> HeaderValue {
    HeaderValue::from_static("Basic YWRtaW46c2VjcmV0")
}

/// Creates a test server over an empty post store in a temporary directory.
///
/// Returns both the server and the temp directory (which must be kept alive
/// for the duration of the test to prevent cleanup).
pub fn test_server() -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let static_dir = temp_dir.path().join("static");
    std::fs::create_dir_all(&static_dir).expect("Failed to create static dir");
    std::fs::write(static_dir.join("style.css"), "body { font-family: serif; }")
        .expect("Failed to write stylesheet");

    let state = AppState::new(store(&temp_dir), Credentials::new(USERNAME, PASSWORD))
        .with_static_dir(static_dir)
        .with_today(fixed_today);

    let app = create_app(Arc::new(state));
    let server = TestServer::new(app).unwrap();

    (server, temp_dir)
}

/// A store over the same directories the test server uses, for seeding and
/// inspecting posts directly.
pub fn store(temp_dir: &TempDir) -> PostStore {
    PostStore::new(
        temp_dir.path().join("posts"),
        temp_dir.path().join("post_html"),
    )
}
