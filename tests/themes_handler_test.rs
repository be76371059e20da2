//! Tests for the theme asset handler.

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::fs;

use axum::body::to_bytes;
use axum::http::{
    StatusCode,
    header,
};
use lab_server::ThemesService;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const THEMES_URL: &str = "/lab/api/themes";

fn service(themes: &TempDir) -> ThemesService {
    ThemesService::new(themes.path().to_path_buf(), THEMES_URL.to_string())
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn css_urls_are_rewritten_under_the_mount_prefix() {
    let themes = TempDir::new().unwrap();
    fs::create_dir_all(themes.path().join("dark")).unwrap();
    fs::write(
        themes.path().join("dark/index.css"),
        concat!(
            "body { background: url('images/background.png'); }\n",
            ".logo { content: url(\"../shared/logo.svg\"); }\n",
        ),
    )
    .unwrap();

    let response = service(&themes).respond("dark/index.css").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/css; charset=utf-8"
    );
    let body = body_string(response).await;
    assert_eq!(
        body,
        concat!(
            "body { background: url('/lab/api/themes/dark/images/background.png'); }\n",
            ".logo { content: url(\"/lab/api/themes/shared/logo.svg\"); }\n",
        ),
    );
}

#[tokio::test]
async fn absolute_and_scheme_urls_are_served_unchanged() {
    let themes = TempDir::new().unwrap();
    let css = concat!(
        ".a { background: url('/static/base.png'); }\n",
        ".b { background: url('data:image/png;base64,iVBORw0KGgo='); }\n",
        ".c { background: url('https://example.com/x.png'); }\n",
    );
    fs::write(themes.path().join("plain.css"), css).unwrap();

    let response = service(&themes).respond("plain.css").await;

    assert_eq!(body_string(response).await, css);
}

#[tokio::test]
async fn non_css_files_are_served_verbatim() {
    let themes = TempDir::new().unwrap();
    fs::create_dir_all(themes.path().join("dark/images")).unwrap();
    let payload = b"\x89PNG\r\n\x1a\nnot-really-a-png";
    fs::write(themes.path().join("dark/images/icon.png"), payload).unwrap();

    let response = service(&themes).respond("dark/images/icon.png").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(bytes.as_ref(), payload);
}

#[tokio::test]
async fn missing_files_return_not_found() {
    let themes = TempDir::new().unwrap();

    let response = service(&themes).respond("dark/missing.css").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn traversal_outside_the_themes_dir_returns_not_found() {
    let themes = TempDir::new().unwrap();
    fs::write(themes.path().join("secret.txt"), "nope").unwrap();

    let response = service(&themes).respond("../secret.txt").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_url_tokens_are_left_untouched() {
    let themes = TempDir::new().unwrap();
    let css = ".broken { background: url(images/unquoted.png); }\n";
    fs::write(themes.path().join("broken.css"), css).unwrap();

    let response = service(&themes).respond("broken.css").await;

    assert_eq!(body_string(response).await, css);
}
