// src/core/html.rs
// Thin helpers over `scraper` so page specs read as selector → text/attr.

use scraper::{ElementRef, Selector};
use url::Url;

use super::sanitize::normalize_ws;
use crate::error::ExtractError;

pub fn selector(css: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector { css, reason: e.to_string() })
}

pub fn first<'a>(scope: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    scope.select(sel).next()
}

/// Visible text of an element, whitespace-collapsed.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

pub fn attr_of(el: ElementRef<'_>, name: &str) -> Option<String> {
    el.value().attr(name).map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Resolve `href`/`src` against the page URL; keep the raw value if it can't be joined.
pub fn absolutize(base: Option<&Url>, raw: &str) -> String {
    match base.and_then(|b| b.join(raw).ok()) {
        Some(u) => u.to_string(),
        None => raw.to_string(),
    }
}
