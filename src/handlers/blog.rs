use axum::response::Response;

use crate::templates::*;

pub async fn blog_index(state: &crate::AppState) -> crate::AppResult<Response> {
    let posts = state.store.list_public()?;
    render(&BlogIndexTemplate {
        site_name: state.site_name.clone(),
        page_title: "Blog".to_string(),
        active_nav: "blog",
        app_version: state.app_version.clone(),
        posts,
    })
}

pub async fn blog_view(state: &crate::AppState, title: &str) -> crate::AppResult<Response> {
    let content = state.store.read_rendered(title)?;
    render(&PostTemplate {
        site_name: state.site_name.clone(),
        page_title: title.to_string(),
        active_nav: "blog",
        app_version: state.app_version.clone(),
        title: title.to_string(),
        content,
    })
}
