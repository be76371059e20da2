//! Static theme file handler.
//!
//! Serves files below the configured themes directory. Stylesheets are the
//! special case: their relative `url(...)` references are rewritten against
//! the handler's mount prefix before the bytes go out, and the content
//! length follows the rewritten body. Everything else is served as-is.

use std::path::{
    Component,
    Path,
    PathBuf,
};

use axum::Router;
use axum::extract::{
    Path as RequestPath,
    State,
};
use axum::http::{
    StatusCode,
    header,
};
use axum::response::{
    IntoResponse,
    Response,
};
use axum::routing::get;

use super::rewrite::rewrite_css_urls;

/// Serves theme assets below one directory under one mount prefix.
#[derive(Debug, Clone)]
pub struct ThemesService {
    themes_dir: PathBuf,
    themes_url: String,
}

impl ThemesService {
    #[must_use]
    pub fn new(themes_dir: PathBuf, themes_url: String) -> Self {
        Self { themes_dir, themes_url }
    }

    /// Router serving `GET /{*path}`; nest it under the mount prefix.
    #[must_use]
    pub fn router(self) -> Router {
        Router::new().route("/{*path}", get(serve_theme_file)).with_state(self)
    }

    /// Resolve and serve one requested theme file.
    pub async fn respond(&self, request_path: &str) -> Response {
        let Some(relative) = sanitize_request_path(request_path) else {
            tracing::debug!(path = request_path, "Rejected theme file path");
            return StatusCode::NOT_FOUND.into_response();
        };

        let abspath = self.themes_dir.join(&relative);
        let bytes = match tokio::fs::read(&abspath).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(path = %abspath.display(), %err, "Failed to read theme file");
                return StatusCode::NOT_FOUND.into_response();
            }
        };

        let extension = relative.extension().and_then(|ext| ext.to_str());
        if extension == Some("css") {
            let css = String::from_utf8_lossy(&bytes);
            let base = self.base_url(relative.parent());
            let rewritten = rewrite_css_urls(&css, &base);
            return ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], rewritten)
                .into_response();
        }

        ([(header::CONTENT_TYPE, content_type_for(extension))], bytes).into_response()
    }

    /// Public URL of the directory a served file lives in.
    fn base_url(&self, dir: Option<&Path>) -> String {
        let mut base = self.themes_url.trim_end_matches('/').to_string();
        for component in dir.into_iter().flat_map(Path::components) {
            base.push('/');
            base.push_str(&component.as_os_str().to_string_lossy());
        }
        base
    }
}

async fn serve_theme_file(
    State(service): State<ThemesService>,
    RequestPath(path): RequestPath<String>,
) -> Response {
    service.respond(&path).await
}

/// Accept only plain relative paths; anything traversing out of the themes
/// directory resolves to nothing.
fn sanitize_request_path(request_path: &str) -> Option<PathBuf> {
    let path = Path::new(request_path);
    let mut sanitized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => sanitized.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if sanitized.as_os_str().is_empty() { None } else { Some(sanitized) }
}

/// Content type by file extension.
///
/// The handful of asset types a theme actually ships; anything unknown is
/// served as an opaque byte stream.
fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("css") => "text/css; charset=utf-8",
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json" | "map") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",
        Some("eot") => "application/vnd.ms-fontobject",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
