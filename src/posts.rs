use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::{Date, OffsetDateTime};

use crate::markdown;

/// Titles containing this token are unpublished drafts.
pub const DRAFT_MARKER: &str = "DRAFT";

const SOURCE_EXT: &str = "md";
const RENDERED_EXT: &str = "html";

/// Characters escaped when a title is placed in a single URL path segment.
/// Covers every HTML-special character, so entry URLs are safe to emit
/// unescaped in templates.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'&')
    .add(b'\'')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid post title: {0:?}")]
    InvalidTitle(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub title: String,
    pub body: String,
    pub rendered_body: String,
}

/// A row in a post listing. Derived from the directory, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEntry {
    pub title: String,
    pub url: String,
}

/// Where a listing is shown, which decides the link each entry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Public,
    Admin,
}

impl Listing {
    fn url_for(self, title: &str) -> String {
        let segment = utf8_percent_encode(title, SEGMENT);
        match self {
            Listing::Public => format!("/blog/view/{}", segment),
            Listing::Admin => format!("/admin/blog/edit/{}", segment),
        }
    }
}

/// Builds the storage key for a post. New posts are prefixed with their
/// creation date, so two posts only collide on the same title and day.
pub fn derive_filename(title: &str, date: Option<Date>) -> String {
    match date {
        Some(date) => format!(
            "{:04}-{:02}-{:02} - {}",
            date.year(),
            u8::from(date.month()),
            date.day(),
            title
        ),
        None => title.to_string(),
    }
}

/// Today's date in the server's local timezone, or UTC when the local
/// offset cannot be determined.
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

/// File-backed post repository: markdown sources in one directory, rendered
/// HTML in a parallel one, both keyed by title.
///
/// Nothing is cached. The source and rendered records are written and
/// removed one after the other, so a failure in between leaves them out of
/// step.
#[derive(Clone, Debug)]
pub struct PostStore {
    posts_dir: PathBuf,
    html_dir: PathBuf,
}

impl PostStore {
    pub fn new(posts_dir: impl Into<PathBuf>, html_dir: impl Into<PathBuf>) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            html_dir: html_dir.into(),
        }
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    pub fn html_dir(&self) -> &Path {
        &self.html_dir
    }

    /// Published posts, newest-looking title first.
    pub fn list_public(&self) -> Result<Vec<PostEntry>> {
        let mut entries: Vec<PostEntry> = self
            .titles()?
            .into_iter()
            .filter(|title| !title.contains(DRAFT_MARKER))
            .map(|title| PostEntry {
                url: Listing::Public.url_for(&title),
                title,
            })
            .collect();

        // Case-insensitive descending; date-prefixed titles sort newest first
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.title.to_lowercase()));
        Ok(entries)
    }

    /// Every post including drafts, in directory order.
    pub fn list_admin(&self) -> Result<Vec<PostEntry>> {
        Ok(self
            .titles()?
            .into_iter()
            .map(|title| PostEntry {
                url: Listing::Admin.url_for(&title),
                title,
            })
            .collect())
    }

    pub fn read(&self, title: &str) -> Result<Post> {
        validate_title(title)?;
        let source = self.source_path(title);
        let body = std::fs::read_to_string(&source).map_err(|e| io_error(e, &source, title))?;

        let rendered = self.rendered_path(title);
        let rendered_body = match std::fs::read_to_string(&rendered) {
            Ok(html) => html,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(io_error(e, &rendered, title)),
        };

        Ok(Post {
            title: title.to_string(),
            body,
            rendered_body,
        })
    }

    /// Display HTML for a post. Posts without a rendered record are rendered
    /// from their markdown source.
    pub fn read_rendered(&self, title: &str) -> Result<String> {
        validate_title(title)?;
        let rendered = self.rendered_path(title);
        match std::fs::read_to_string(&rendered) {
            Ok(html) => Ok(html),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let source = self.source_path(title);
                let body =
                    std::fs::read_to_string(&source).map_err(|e| io_error(e, &source, title))?;
                tracing::debug!("No rendered record for {:?}, rendering source", title);
                Ok(markdown::render(&body))
            }
            Err(e) => Err(io_error(e, &rendered, title)),
        }
    }

    /// Writes both records, overwriting any post with the same title.
    pub fn create(&self, title: &str, body: &str, rendered_body: &str) -> Result<()> {
        validate_title(title)?;
        ensure_dir(&self.posts_dir)?;
        ensure_dir(&self.html_dir)?;

        let source = self.source_path(title);
        std::fs::write(&source, body).map_err(|e| io_error(e, &source, title))?;

        let html = if rendered_body.trim().is_empty() {
            markdown::render(body)
        } else {
            rendered_body.to_string()
        };
        let rendered = self.rendered_path(title);
        std::fs::write(&rendered, html).map_err(|e| io_error(e, &rendered, title))?;

        tracing::info!("Wrote post {:?}", title);
        Ok(())
    }

    /// Creates a new post under its date-prefixed filename. The submitted
    /// title itself must be valid, not just the derived filename.
    pub fn create_dated(
        &self,
        title: &str,
        date: Date,
        body: &str,
        rendered_body: &str,
    ) -> Result<String> {
        validate_title(title)?;
        let filename = derive_filename(title, Some(date));
        self.create(&filename, body, rendered_body)?;
        Ok(filename)
    }

    /// Edit by removal and re-creation. Not atomic: if the create step fails
    /// the old post is already gone.
    pub fn replace(
        &self,
        old_title: &str,
        new_title: &str,
        body: &str,
        rendered_body: &str,
    ) -> Result<()> {
        validate_title(old_title)?;
        validate_title(new_title)?;
        self.delete(old_title)?;
        self.create(new_title, body, rendered_body)
    }

    pub fn delete(&self, title: &str) -> Result<()> {
        validate_title(title)?;
        let source = self.source_path(title);
        std::fs::remove_file(&source).map_err(|e| io_error(e, &source, title))?;

        let rendered = self.rendered_path(title);
        match std::fs::remove_file(&rendered) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(io_error(e, &rendered, title)),
        }

        tracing::info!("Deleted post {:?}", title);
        Ok(())
    }

    fn titles(&self) -> Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.posts_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.posts_dir.clone(),
                    source,
                });
            }
        };

        let mut titles = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: self.posts_dir.clone(),
                source,
            })?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string()
                && let Some(title) = name.strip_suffix(".md")
            {
                titles.push(title.to_string());
            }
        }
        Ok(titles)
    }

    fn source_path(&self, title: &str) -> PathBuf {
        self.posts_dir.join(format!("{}.{}", title, SOURCE_EXT))
    }

    fn rendered_path(&self, title: &str) -> PathBuf {
        self.html_dir.join(format!("{}.{}", title, RENDERED_EXT))
    }
}

/// A title must name a single file inside the store.
fn validate_title(title: &str) -> Result<()> {
    let invalid = title.trim().is_empty()
        || title == "."
        || title == ".."
        || title.contains('/')
        || title.contains('\\')
        || title.contains('\0');
    if invalid {
        return Err(StoreError::InvalidTitle(title.to_string()));
    }
    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

fn io_error(e: io::Error, path: &Path, title: &str) -> StoreError {
    if e.kind() == io::ErrorKind::NotFound {
        StoreError::NotFound(title.to_string())
    } else {
        StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    }
}
