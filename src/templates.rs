use askama::Template;
use axum::response::{Html, IntoResponse, Response};

use crate::posts::PostEntry;

/// Renders a view. Template failures surface as a 500 carrying the error text.
pub fn render<T: Template>(view: &T) -> crate::AppResult<Response> {
    let body = view.render()?;
    Ok(Html(body).into_response())
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub site_name: String,
    pub page_title: String,
    pub active_nav: &'static str,
    pub app_version: String,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub site_name: String,
    pub page_title: String,
    pub active_nav: &'static str,
    pub app_version: String,
}

#[derive(Template)]
#[template(path = "links.html")]
pub struct LinksTemplate {
    pub site_name: String,
    pub page_title: String,
    pub active_nav: &'static str,
    pub app_version: String,
}

#[derive(Template)]
#[template(path = "blog.html")]
pub struct BlogIndexTemplate {
    pub site_name: String,
    pub page_title: String,
    pub active_nav: &'static str,
    pub app_version: String,
    pub posts: Vec<PostEntry>,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub site_name: String,
    pub page_title: String,
    pub active_nav: &'static str,
    pub app_version: String,
    pub title: String,
    pub content: String,
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub site_name: String,
    pub page_title: String,
    pub active_nav: &'static str,
    pub app_version: String,
}

#[derive(Template)]
#[template(path = "admin_blog.html")]
pub struct AdminBlogTemplate {
    pub site_name: String,
    pub page_title: String,
    pub active_nav: &'static str,
    pub app_version: String,
    pub posts: Vec<PostEntry>,
}

/// Shared by create and edit. An empty `old_title` means a new post. The
/// form submits no rendered body, so the server renders the markdown on save.
#[derive(Template)]
#[template(path = "editor.html")]
pub struct EditorTemplate {
    pub site_name: String,
    pub page_title: String,
    pub active_nav: &'static str,
    pub app_version: String,
    pub old_title: String,
    pub title: String,
    pub body: String,
}
