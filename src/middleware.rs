//! Request stages run between route matching and the handler.
//!
//! A [`Chain`] is an ordered list of [`Stage`]s. Each stage either lets the
//! request continue or answers it directly, in which case later stages and
//! the handler never run.

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};

use crate::AppError;
use crate::credentials::Credentials;

pub enum Flow {
    Continue,
    ShortCircuit(Response),
}

pub trait Stage: Send + Sync {
    fn check(&self, request: &Request) -> Flow;
}

#[derive(Clone, Default)]
pub struct Chain {
    stages: Vec<Arc<dyn Stage>>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Runs every stage in order, then `handler` if none short-circuited.
    pub async fn call<F, Fut>(&self, request: Request, handler: F) -> Response
    where
        F: FnOnce(Request) -> Fut,
        Fut: Future<Output = Response>,
    {
        for stage in &self.stages {
            if let Flow::ShortCircuit(response) = stage.check(&request) {
                return response;
            }
        }
        handler(request).await
    }
}

/// HTTP Basic check against the admin credentials. Stateless: every request
/// carries its own credentials.
pub struct AuthGate {
    credentials: Arc<Credentials>,
}

impl AuthGate {
    pub fn new(credentials: Arc<Credentials>) -> Self {
        Self { credentials }
    }
}

impl Stage for AuthGate {
    fn check(&self, request: &Request) -> Flow {
        // Malformed headers decode to None, same as a missing one
        let authorized = request
            .headers()
            .typed_get::<Authorization<Basic>>()
            .is_some_and(|auth| self.credentials.verify(auth.username(), auth.password()));

        if authorized {
            Flow::Continue
        } else {
            tracing::debug!("Rejected credentials for {}", request.uri().path());
            Flow::ShortCircuit(AppError::Unauthorized.into_response())
        }
    }
}
