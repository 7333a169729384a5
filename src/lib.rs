pub mod app;
pub mod credentials;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod markdown;
pub mod middleware;
pub mod posts;
pub mod router;
pub mod templates;

pub use app::{AppState, SharedAppState, create_app};
pub use credentials::Credentials;
pub use error::{AppError, AppResult};
pub use posts::PostStore;
