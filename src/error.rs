use axum::{
    extract::rejection::FormRejection,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::posts::StoreError;

/// Challenge sent with every 401 so browsers prompt for credentials.
pub const BASIC_CHALLENGE: &str = r#"Basic realm="restricted", charset="UTF-8""#;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    RouteNotFound(String),

    #[error("Method {method} not allowed for {path}")]
    MethodNotAllowed {
        path: String,
        method: Method,
        allow: Method,
    },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("Template error: {0}")]
    Render(#[from] askama::Error),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Invalid form: {0}")]
    Form(#[from] FormRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Store and render failures are not differentiated by kind: the
        // client always gets the raw error text with a 500.
        let status = match &self {
            AppError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Store(_) | AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Form(rejection) => rejection.status(),
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        match &self {
            AppError::Unauthorized => (
                status,
                [(header::WWW_AUTHENTICATE, BASIC_CHALLENGE)],
                self.to_string(),
            )
                .into_response(),
            AppError::MethodNotAllowed { allow, .. } => (
                status,
                [(header::ALLOW, allow.as_str().to_string())],
                self.to_string(),
            )
                .into_response(),
            _ => (status, self.to_string()).into_response(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
