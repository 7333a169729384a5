//! Route table for the site.
//!
//! Routes are an ordered list of path shapes built once at startup. A shape
//! is a sequence of literal and capture segments compared one-for-one with
//! the request path, so a trailing slash is significant; `/about/` matches
//! and `/about` does not. A path that matches nothing is a 404 and never
//! reaches a handler.

use axum::http::Method;
use percent_encoding::percent_decode_str;

/// Identifies the handler a matched route dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteId {
    Home,
    About,
    Links,
    BlogIndex,
    BlogView,
    AdminHome,
    AdminBlog,
    AdminCreate,
    AdminEdit,
    AdminSave,
    AdminDelete,
    Health,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(&'static str),
    /// Matches one non-empty segment, stored under this name.
    Capture(&'static str),
}

#[derive(Debug, Clone)]
pub struct Route {
    pub id: RouteId,
    pub method: Method,
    pub segments: Vec<Segment>,
    /// Protected routes run behind the admin auth gate.
    pub protected: bool,
}

impl Route {
    /// Builds a route from a pattern such as `/blog/view/{title}`.
    pub fn new(id: RouteId, method: Method, pattern: &'static str) -> Self {
        Self {
            id,
            method,
            segments: parse_shape(pattern),
            protected: false,
        }
    }

    pub fn protected(mut self) -> Self {
        self.protected = true;
        self
    }

    fn matches(&self, path: &str) -> Option<Params> {
        let rest = path.strip_prefix('/')?;
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::default();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) => {
                    if *literal != part {
                        return None;
                    }
                }
                Segment::Capture(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    let value = percent_decode_str(part).decode_utf8().ok()?;
                    params.0.push((*name, value.into_owned()));
                }
            }
        }
        Some(params)
    }
}

fn parse_shape(pattern: &'static str) -> Vec<Segment> {
    pattern
        .strip_prefix('/')
        .unwrap_or(pattern)
        .split('/')
        .map(|part| match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
            Some(name) => Segment::Capture(name),
            None => Segment::Literal(part),
        })
        .collect()
}

/// Path parameters captured by a match, already percent-decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(&'static str, String)>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The site's fixed route grammar.
    pub fn site() -> Self {
        use RouteId::*;
        Self::new(vec![
            Route::new(Home, Method::GET, "/"),
            Route::new(About, Method::GET, "/about/"),
            Route::new(Links, Method::GET, "/links/"),
            Route::new(BlogIndex, Method::GET, "/blog/"),
            Route::new(BlogView, Method::GET, "/blog/view/{title}"),
            Route::new(AdminHome, Method::GET, "/admin/").protected(),
            Route::new(AdminBlog, Method::GET, "/admin/blog/").protected(),
            Route::new(AdminCreate, Method::GET, "/admin/blog/create/").protected(),
            Route::new(AdminEdit, Method::GET, "/admin/blog/edit/{filename}").protected(),
            Route::new(AdminSave, Method::POST, "/admin/blog/save/").protected(),
            Route::new(AdminDelete, Method::POST, "/admin/blog/delete/").protected(),
            Route::new(Health, Method::GET, "/health"),
        ])
    }

    /// First route whose shape matches `path`, with its captures.
    pub fn match_path(&self, path: &str) -> Option<(&Route, Params)> {
        self.routes
            .iter()
            .find_map(|route| route.matches(path).map(|params| (route, params)))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::site()
    }
}
