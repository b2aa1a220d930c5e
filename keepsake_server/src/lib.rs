//! # Keepsake Server
//!
//! Serves the page shell, its static assets and the content API:
//!
//! - `GET /` returns `index.html` from the public directory
//! - `GET /api/anniversary-data` returns the site content as JSON
//! - any other `GET` returns the matching file under the public directory

pub mod config;
pub mod error;

pub use config::*;
pub use error::*;

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use keepsake_rules::SiteContent;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct AppState {
    content: Arc<SiteContent>,
    public_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(content: SiteContent, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            content: Arc::new(content),
            public_dir: Arc::new(public_dir.into()),
        }
    }

    /// State publishing the embedded content.
    pub fn builtin(public_dir: impl Into<PathBuf>) -> Result<Self, ServeError> {
        Ok(Self::new(SiteContent::builtin()?, public_dir))
    }

    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/anniversary-data", get(anniversary_data))
        .fallback(static_file)
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Response {
    serve_file(&state.public_dir.join("index.html")).await
}

async fn anniversary_data(State(state): State<AppState>) -> Response {
    Json(state.content.as_ref()).into_response()
}

async fn static_file(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    match resolve(&state.public_dir, uri.path()) {
        Some(path) => serve_file(&path).await,
        None => {
            debug!(path = uri.path(), "rejected request path");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Map a request path onto the public directory.
///
/// Only plain file-name components are accepted, so `..` and absolute
/// segments can never leave the directory.
fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path.trim_start_matches('/'));
    let mut resolved = root.to_path_buf();
    let mut depth = 0;

    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                resolved.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    (depth > 0).then_some(resolved)
}

async fn serve_file(path: &Path) -> Response {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            debug!(path = %path.display(), bytes = bytes.len(), "serving file");
            (StatusCode::OK, [(header::CONTENT_TYPE, content_type(path))], bytes).into_response()
        }
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "failed to read static file");
            }
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Content type for a file, chosen by extension.
pub fn content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mp3") => "audio/mpeg",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
