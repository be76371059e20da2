//! Rewrites relative `url(...)` references inside served CSS.
//!
//! Theme stylesheets refer to their images and fonts relative to the file,
//! but the handler serves them under a configurable mount prefix, so every
//! relative reference is rewritten to an absolute mount-aware path. This is
//! best-effort substitution, not CSS parsing: malformed quoting simply fails
//! to match and is left untouched.

use std::sync::LazyLock;

use regex::{
    Captures,
    Regex,
};

/// Matches `url('...')` and `url("...")` tokens.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"url\('([^']*)'\)|url\("([^"]*)"\)"#).expect("invalid url regex")
});

/// Matches arguments qualified with a scheme (`http:`, `data:`, ...).
static SCHEME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:").expect("invalid scheme regex"));

/// Rewrite every relative `url(...)` argument in `css` against `base_url`.
///
/// Root-relative (leading `/`) and scheme-qualified arguments pass through
/// unchanged, as do empty ones. The quote style of the original token is
/// preserved because only the argument is replaced.
#[must_use]
pub fn rewrite_css_urls(css: &str, base_url: &str) -> String {
    URL_PATTERN
        .replace_all(css, |caps: &Captures<'_>| {
            let token = caps.get(0).map_or("", |m| m.as_str());
            let part = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());

            if part.is_empty() || part.starts_with('/') || SCHEME_PATTERN.is_match(part) {
                return token.to_string();
            }

            token.replace(part, &resolve_url(base_url, part))
        })
        .into_owned()
}

/// Join `relative` onto `base` and normalize `.` and `..` segments lexically.
fn resolve_url(base: &str, relative: &str) -> String {
    let joined = format!("{}/{relative}", base.trim_end_matches('/'));

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    format!("/{}", segments.join("/"))
}
