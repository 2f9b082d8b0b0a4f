// src/core/html.rs
//
// Thin helpers over `scraper` so the specs read as "where is the value"
// rather than selector plumbing.

use scraper::{ElementRef, Html, Selector};

use super::sanitize::{contains_ci, non_empty, normalize_ws};
use crate::error::{Error, Result};

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Parse(format!("bad selector `{css}`: {e:?}")))
}

/// Visible text of an element, whitespace-normalized.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Text of the first match under `scope`, if present and non-empty.
pub fn first_text(scope: ElementRef<'_>, css: &str) -> Result<Option<String>> {
    let sel = selector(css)?;
    Ok(scope.select(&sel).next().and_then(|el| non_empty(&text_of(el))))
}

/// Same as `first_text`, rooted at the document.
pub fn doc_first_text(doc: &Html, css: &str) -> Result<Option<String>> {
    first_text(doc.root_element(), css)
}

/// `href` of the first `<a>` under `scope` that carries one.
pub fn first_href(scope: ElementRef<'_>, css: &str) -> Result<Option<String>> {
    let sel = selector(css)?;
    Ok(scope
        .select(&sel)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .find(|h| !h.is_empty())
        .map(str::to_string))
}

/// Does the rendered text of `el` mention `needle` (case-insensitive)?
pub fn mentions(el: ElementRef<'_>, needle: &str) -> bool {
    contains_ci(&el.text().collect::<String>(), needle)
}

/// Text of the first `<span>` that follows (in document order) a text node
/// containing `label`, searching only inside `scope`.
pub fn span_after_label(scope: ElementRef<'_>, label: &str) -> Option<String> {
    let mut seen_label = false;
    for node in scope.descendants() {
        if !seen_label {
            if let Some(text) = node.value().as_text() {
                seen_label = text.contains(label);
            }
            continue;
        }
        if let Some(el) = ElementRef::wrap(node) {
            if el.value().name() == "span" {
                return non_empty(&text_of(el));
            }
        }
    }
    None
}

/// Joins a site-relative href onto the source base URL.
pub fn absolute(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return s!(href);
    }
    let base = base.trim_end_matches('/');
    if href.starts_with('/') { join!(base, href) } else { join!(base, "/", href) }
}
