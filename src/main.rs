use argh::FromArgs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quill::{AppState, Credentials, PostStore, create_app};

#[derive(FromArgs, Debug)]
/// Quill: a personal website and blog server.
struct Args {
    /// host to bind to
    #[argh(option, default = "String::from(\"127.0.0.1\")")]
    host: String,

    /// port to listen on
    #[argh(option, short = 'p', default = "8080")]
    port: u16,

    /// directory of markdown post sources
    #[argh(option, default = "PathBuf::from(\"posts\")")]
    posts_dir: PathBuf,

    /// directory of rendered post HTML
    #[argh(option, default = "PathBuf::from(\"post_html\")")]
    html_dir: PathBuf,

    /// directory served under /static/
    #[argh(option, default = "PathBuf::from(\"static\")")]
    static_dir: PathBuf,

    /// file holding the admin username (QUILL_ADMIN_USER overrides)
    #[argh(option, default = "PathBuf::from(\"secrets/user.txt\")")]
    user_file: PathBuf,

    /// file holding the admin password (QUILL_ADMIN_PASSWORD overrides)
    #[argh(option, default = "PathBuf::from(\"secrets/password.txt\")")]
    password_file: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Args = argh::from_env();

    let credentials = match Credentials::load(&args.user_file, &args.password_file) {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::error!("Failed to load admin credentials: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!("Admin user is {:?}", credentials.username());

    let store = PostStore::new(&args.posts_dir, &args.html_dir);
    let state = AppState::new(store, credentials).with_static_dir(&args.static_dir);
    let app = create_app(Arc::new(state));

    let addr: SocketAddr = match format!("{}:{}", args.host, args.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid host or port: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };
    match listener.local_addr() {
        Ok(actual) => tracing::info!("http://{}", actual),
        Err(_) => tracing::info!("http://{}", addr),
    }

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
