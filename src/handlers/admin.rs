use axum::{
    Form,
    extract::{FromRequest, Request},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::templates::*;

const ADMIN_BLOG: &str = "/admin/blog/";

/// Fields posted by the editor form.
#[derive(Debug, Deserialize)]
pub struct SavePostForm {
    pub title: String,
    #[serde(rename = "blogPost", default)]
    pub blog_post: String,
    #[serde(rename = "hiddenHTML", default)]
    pub hidden_html: String,
    /// Set when editing; the post stored under this title is replaced.
    #[serde(rename = "oldTitle", default)]
    pub old_title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeletePostForm {
    pub title: String,
}

pub async fn admin_home(state: &crate::AppState) -> crate::AppResult<Response> {
    render(&AdminTemplate {
        site_name: state.site_name.clone(),
        page_title: "Admin".to_string(),
        active_nav: "admin",
        app_version: state.app_version.clone(),
    })
}

pub async fn admin_blog(state: &crate::AppState) -> crate::AppResult<Response> {
    let posts = state.store.list_admin()?;
    render(&AdminBlogTemplate {
        site_name: state.site_name.clone(),
        page_title: "Posts".to_string(),
        active_nav: "admin",
        app_version: state.app_version.clone(),
        posts,
    })
}

pub async fn create_form(state: &crate::AppState) -> crate::AppResult<Response> {
    render(&EditorTemplate {
        site_name: state.site_name.clone(),
        page_title: "New post".to_string(),
        active_nav: "admin",
        app_version: state.app_version.clone(),
        old_title: String::new(),
        title: String::new(),
        body: String::new(),
    })
}

pub async fn edit_form(state: &crate::AppState, filename: &str) -> crate::AppResult<Response> {
    let post = state.store.read(filename)?;
    render(&EditorTemplate {
        site_name: state.site_name.clone(),
        page_title: format!("Edit {}", post.title),
        active_nav: "admin",
        app_version: state.app_version.clone(),
        old_title: post.title.clone(),
        title: post.title,
        body: post.body,
    })
}

pub async fn save_post(state: &crate::AppState, request: Request) -> crate::AppResult<Response> {
    let Form(form) = Form::<SavePostForm>::from_request(request, &()).await?;

    match form.old_title.as_deref().filter(|old| !old.is_empty()) {
        Some(old_title) => {
            state
                .store
                .replace(old_title, &form.title, &form.blog_post, &form.hidden_html)?;
            tracing::info!("Edited {:?} -> {:?}", old_title, form.title);
        }
        None => {
            state.store.create_dated(
                &form.title,
                (state.today)(),
                &form.blog_post,
                &form.hidden_html,
            )?;
        }
    }

    Ok(Redirect::to(ADMIN_BLOG).into_response())
}

pub async fn delete_post(state: &crate::AppState, request: Request) -> crate::AppResult<Response> {
    let Form(form) = Form::<DeletePostForm>::from_request(request, &()).await?;
    state.store.delete(&form.title)?;
    Ok(Redirect::to(ADMIN_BLOG).into_response())
}
