//! URL scheme allow-listing and percent-encoding for hrefs and image
//! sources (spec.md §4.4).

/// Extract the scheme from `url` (the part before the first `:`), per
/// RFC 3986's `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
/// Returns `None` if there's no `:` or the prefix isn't a valid scheme.
pub fn scheme_of(url: &str) -> Option<&str> {
    let colon = url.find(':')?;
    let candidate = &url[..colon];
    let mut chars = candidate.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        Some(candidate)
    } else {
        None
    }
}

fn scheme_allowed(url: &str, allowed: &[&str]) -> bool {
    scheme_of(url).is_some_and(|scheme| allowed.iter().any(|a| a.eq_ignore_ascii_case(scheme)))
}

/// Percent-encode the characters that would let a URL break out of its
/// HTML attribute, then escape only `&` in what remains (spec.md §4.4:
/// "percent-encode control and HTML-unsafe characters... before
/// HTML-escaping `&` within it" — narrower than [`escape::escape`], which
/// would also turn every `/` into `&#47;` and corrupt an otherwise-valid
/// URL or data URI).
pub fn escape_url_for_attr(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for ch in url.chars() {
        match ch {
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            '\'' => out.push_str("%27"),
            '"' => out.push_str("%22"),
            '&' => out.push_str("&amp;"),
            c if (c as u32) < 0x20 => out.push_str(&format!("%{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Resolve a link `href`: the escaped URL if its scheme is allow-listed,
/// otherwise the literal string `#` (spec.md §4.4).
pub fn sanitize_href(url: &str, allowed: &[&str]) -> String {
    if scheme_allowed(url, allowed) {
        escape_url_for_attr(url)
    } else {
        "#".to_string()
    }
}

/// Whether an external-image URL's scheme is allow-listed. Unlike links,
/// a rejected image URL suppresses the element entirely rather than
/// falling back to `#` (spec.md §4.3).
pub fn is_allowed_image_scheme(url: &str, allowed: &[&str]) -> bool {
    scheme_allowed(url, allowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_scheme() {
        assert_eq!(scheme_of("https://example.com"), Some("https"));
        assert_eq!(scheme_of("artifact://build/1"), Some("artifact"));
        assert_eq!(scheme_of("javascript:alert(1)"), Some("javascript"));
    }

    #[test]
    fn no_scheme_without_colon() {
        assert_eq!(scheme_of("not-a-url"), None);
    }

    #[test]
    fn sanitize_href_rejects_disallowed_scheme() {
        assert_eq!(
            sanitize_href("javascript:alert(1)", &["http", "https", "artifact"]),
            "#"
        );
    }

    #[test]
    fn sanitize_href_keeps_allowed_scheme() {
        assert_eq!(
            sanitize_href("https://example.com/x", &["http", "https", "artifact"]),
            "https://example.com/x"
        );
    }

    #[test]
    fn sanitize_href_percent_encodes_unsafe_chars_and_escapes_ampersand() {
        assert_eq!(
            sanitize_href("https://x/?a=1&b='<q>'", &["http", "https"]),
            "https://x/?a=1&amp;b=%27%3Cq%3E%27"
        );
    }

    #[test]
    fn external_image_scheme_check() {
        assert!(is_allowed_image_scheme("https://x", &["http", "https"]));
        assert!(!is_allowed_image_scheme("artifact://x", &["http", "https"]));
    }
}
