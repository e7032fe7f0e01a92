//! HTML escaping (spec.md §4.4).
//!
//! Applied to every literal scalar emitted as text or as an attribute
//! value — attribute values included, because an HTML entity decodes back
//! to its original character before the browser uses the attribute (e.g. a
//! `href` built from a percent-encoded, then entity-escaped URL still
//! resolves to the original URL once parsed).

/// Append the escaped form of `ch` to `out`.
pub fn push_escaped_char(out: &mut String, ch: char) {
    match ch {
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '&' => out.push_str("&amp;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        '/' => out.push_str("&#47;"),
        other => out.push(other),
    }
}

/// Escape an entire string (used for attribute values and element content
/// that arrives as a complete `String` rather than cell-by-cell).
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        push_escaped_char(&mut out, ch);
    }
    out
}
