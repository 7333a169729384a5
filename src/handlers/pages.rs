use axum::response::{IntoResponse, Response};

use crate::templates::*;

pub async fn health_check() -> Response {
    "OK".into_response()
}

pub async fn home(state: &crate::AppState) -> crate::AppResult<Response> {
    render(&HomeTemplate {
        site_name: state.site_name.clone(),
        page_title: String::new(),
        active_nav: "home",
        app_version: state.app_version.clone(),
    })
}

pub async fn about(state: &crate::AppState) -> crate::AppResult<Response> {
    render(&AboutTemplate {
        site_name: state.site_name.clone(),
        page_title: "About".to_string(),
        active_nav: "about",
        app_version: state.app_version.clone(),
    })
}

pub async fn links(state: &crate::AppState) -> crate::AppResult<Response> {
    render(&LinksTemplate {
        site_name: state.site_name.clone(),
        page_title: "Links".to_string(),
        active_nav: "links",
        app_version: state.app_version.clone(),
    })
}
