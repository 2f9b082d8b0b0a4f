// src/core/sanitize.rs

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Empty or whitespace-only → None, otherwise the normalized text.
pub fn non_empty(s: &str) -> Option<String> {
    let t = normalize_ws(s);
    if t.is_empty() { None } else { Some(t) }
}

/// First whitespace-separated token ("47.11 Торговля…" → "47.11").
pub fn first_token(s: &str) -> Option<String> {
    s.split_whitespace().next().map(str::to_string)
}

/// Filesystem-safe cache file stem: keeps alphanumerics (any script), spaces,
/// hyphens and underscores, then drops trailing whitespace.
/// Distinct queries can collapse to the same stem; callers accept the aliasing.
pub fn cache_file_stem(query: &str) -> String {
    let kept: String = query
        .chars()
        .filter(|&c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_')
        .collect();
    kept.trim_end().to_string()
}

/// Case-insensitive containment, Cyrillic included.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
