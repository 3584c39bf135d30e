// src/core/sanitize.rs

/// Collapse runs of whitespace (incl. NBSP) to one space and trim.
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

/// Vote counts render as `(1.2M)` or `(12,345)`: drop the parentheses,
/// surrounding whitespace and thousands separators.
pub fn strip_vote_decor(s: &str) -> String {
    s.trim_matches(|c: char| c == '(' || c == ')' || c.is_whitespace())
        .chars()
        .filter(|&c| c != ',')
        .collect()
}
