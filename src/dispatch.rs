use std::sync::Arc;

use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
};

use crate::handlers;
use crate::router::{Params, RouteId};
use crate::{AppError, AppResult, SharedAppState};

/// Entry point for every request outside `/static`: match the route table,
/// run the route's middleware chain, then its handler.
pub async fn dispatch(State(state): State<SharedAppState>, request: Request) -> Response {
    let path = request.uri().path().to_string();
    let Some((route, params)) = state.routes.match_path(&path) else {
        return AppError::RouteNotFound(path).into_response();
    };

    if request.method() != route.method {
        return AppError::MethodNotAllowed {
            path,
            method: request.method().clone(),
            allow: route.method.clone(),
        }
        .into_response();
    }

    let chain = if route.protected {
        &state.admin_chain
    } else {
        &state.public_chain
    };

    let id = route.id;
    let handler_state = Arc::clone(&state);
    chain
        .call(request, |request| async move {
            handle(id, &handler_state, params, request)
                .await
                .unwrap_or_else(IntoResponse::into_response)
        })
        .await
}

async fn handle(
    id: RouteId,
    state: &crate::AppState,
    params: Params,
    request: Request,
) -> AppResult<Response> {
    match id {
        RouteId::Home => handlers::home(state).await,
        RouteId::About => handlers::about(state).await,
        RouteId::Links => handlers::links(state).await,
        RouteId::BlogIndex => handlers::blog_index(state).await,
        RouteId::BlogView => handlers::blog_view(state, param(&params, "title")?).await,
        RouteId::AdminHome => handlers::admin_home(state).await,
        RouteId::AdminBlog => handlers::admin_blog(state).await,
        RouteId::AdminCreate => handlers::create_form(state).await,
        RouteId::AdminEdit => handlers::edit_form(state, param(&params, "filename")?).await,
        RouteId::AdminSave => handlers::save_post(state, request).await,
        RouteId::AdminDelete => handlers::delete_post(state, request).await,
        RouteId::Health => Ok(handlers::health_check().await),
    }
}

fn param<'a>(params: &'a Params, name: &str) -> AppResult<&'a str> {
    params
        .get(name)
        .ok_or_else(|| AppError::BadRequest(format!("missing path parameter {}", name)))
}
