//! Custom Askama template filters.
//!
//! Every filter that ignores its input is applied to an empty string,
//! e.g. `{{ ""|current_year }}`.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::Datelike;

/// Content hash of `static/css/main.css`, computed by the build script.
const CSS_HASH: &str = env!("CSS_HASH");

/// Year shown in the footer.
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    Ok(chrono::Utc::now().year())
}

/// Stylesheet version for cache busting.
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(CSS_HASH)
}

/// Cart line count with its noun: `1 item`, `3 items`.
///
/// Usage in templates: `{{ cart.lines.len()|items }}`
#[askama::filter_fn]
pub fn items(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(count_items(&value.to_string()))
}

fn count_items(count: &str) -> String {
    let noun = if count == "1" { "item" } else { "items" };
    format!("{count} {noun}")
}
