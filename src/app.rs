use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::Router;
use time::Date;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::credentials::Credentials;
use crate::dispatch;
use crate::middleware::{AuthGate, Chain};
use crate::posts::{self, PostStore};
use crate::router::RouteTable;

/// Format latency in human-readable units
fn format_latency(duration: std::time::Duration) -> String {
    let micros = duration.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{}ms", micros / 1000)
    } else {
        format!("{:.1}s", micros as f64 / 1_000_000.0)
    }
}

/// Everything a request needs, built once at startup and shared read-only.
pub struct AppState {
    pub store: PostStore,
    pub routes: RouteTable,
    /// Stages for every unprotected route.
    pub public_chain: Chain,
    /// Stages for admin routes, starting with the auth gate.
    pub admin_chain: Chain,
    pub static_dir: PathBuf,
    pub site_name: String,
    pub app_version: String,
    /// Date source for new post filenames.
    pub today: fn() -> Date,
}

pub type SharedAppState = Arc<AppState>;

impl AppState {
    pub fn new(store: PostStore, credentials: Credentials) -> Self {
        let credentials = Arc::new(credentials);
        Self {
            store,
            routes: RouteTable::site(),
            public_chain: Chain::new(),
            admin_chain: Chain::new().with(AuthGate::new(credentials)),
            static_dir: PathBuf::from("static"),
            site_name: "Quill".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            today: posts::today,
        }
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    pub fn with_today(mut self, today: fn() -> Date) -> Self {
        self.today = today;
        self
    }
}

pub fn create_app(state: SharedAppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .nest_service("/static", static_files)
        .fallback(dispatch::dispatch)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    static REQUEST_ID: AtomicU64 = AtomicU64::new(1);
                    let request_id_num = REQUEST_ID.fetch_add(1, Ordering::Relaxed);
                    let generator = block_id::BlockId::new(
                        block_id::Alphabet::alphanumeric(),
                        1234,
                        5,
                    );
                    let request_id = generator
                        .encode_string(request_id_num)
                        .unwrap_or_else(|| request_id_num.to_string());
                    tracing::info_span!(
                        "request",
                        id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_request(|request: &axum::http::Request<_>, _span: &Span| {
                    tracing::info!("-> {} {}", request.method(), request.uri());
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &Span| {
                        tracing::info!(
                            "<- {} latency={}",
                            response.status().as_u16(),
                            format_latency(latency)
                        );
                    },
                ),
        )
        .layer(CompressionLayer::new())
}
