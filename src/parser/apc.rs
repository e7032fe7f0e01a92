//! APC (Application Program Command) dispatch for `bk;...` processing
//! instructions — spec.md §4.3.

use crate::cell::{Apc, Element};
use crate::screen::Screen;

/// Parse a `bk;` payload's remainder into ordered `key=value` pairs.
/// Pairs are separated by unescaped `;`; a value may be bare,
/// single-quoted, or double-quoted (with the opposite quote allowed
/// unescaped inside), and `\;` escapes a literal semicolon within a bare
/// value.
fn parse_pairs(s: &str) -> Vec<(String, String)> {
    let chars: Vec<char> = s.chars().collect();
    let mut i = 0;
    let mut pairs = Vec::new();

    while i < chars.len() {
        let mut key = String::new();
        while i < chars.len() && chars[i] != '=' {
            key.push(chars[i]);
            i += 1;
        }
        if i >= chars.len() {
            // Trailing key with no `=value`: drop it, nothing more to parse.
            break;
        }
        i += 1; // skip '='

        let mut value = String::new();
        match chars.get(i) {
            Some(&quote @ ('"' | '\'')) => {
                i += 1;
                while i < chars.len() && chars[i] != quote {
                    if chars[i] == '\\' && i + 1 < chars.len() {
                        value.push(chars[i + 1]);
                        i += 2;
                    } else {
                        value.push(chars[i]);
                        i += 1;
                    }
                }
                i += 1; // skip closing quote
            }
            _ => {
                while i < chars.len() && chars[i] != ';' {
                    if chars[i] == '\\' && i + 1 < chars.len() {
                        value.push(chars[i + 1]);
                        i += 2;
                    } else {
                        value.push(chars[i]);
                        i += 1;
                    }
                }
            }
        }
        pairs.push((key, value));

        while i < chars.len() && chars[i] != ';' {
            i += 1;
        }
        if i < chars.len() {
            i += 1; // skip ';'
        }
    }

    pairs
}

/// Dispatch one finished APC payload. Non-`bk` payloads are discarded.
pub fn dispatch(screen: &mut Screen, payload: &[u8]) {
    let text = String::from_utf8_lossy(payload);
    let Some(rest) = text.strip_prefix("bk;") else {
        log::trace!("discarding non-bk APC payload");
        return;
    };

    let pairs = parse_pairs(rest);
    for (key, value) in &pairs {
        if key == "t" {
            screen.set_timestamp(value);
        }
    }

    // A payload carrying only the timestamp key updates the register but
    // emits no element (spec.md §9's third open question, resolved in
    // SPEC_FULL.md §3: timestamp update and node emission are
    // independent, so `t` alongside other keys still renders).
    let only_timestamp = matches!(pairs.as_slice(), [(key, _)] if key == "t");
    if pairs.is_empty() || only_timestamp {
        return;
    }

    screen.write_element(Element::Apc(Apc { pairs }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Node;

    #[test]
    fn bare_timestamp_only_updates_register_without_emitting_an_element() {
        let mut screen = Screen::new();
        dispatch(&mut screen, b"bk;t=123");
        screen.write('a');
        assert_eq!(screen.line_timestamp(0), Some("123"));
        assert!(matches!(screen.lines()[0][0].node, Node::Text('a')));
    }

    #[test]
    fn timestamp_alongside_other_keys_still_renders_an_element() {
        let mut screen = Screen::new();
        dispatch(&mut screen, b"bk;t=123;foo=bar");
        assert_eq!(screen.line_timestamp(0), Some("123"));
        let Node::Element(Element::Apc(apc)) = &screen.lines()[0][0].node else {
            panic!("expected an APC element");
        };
        assert_eq!(
            apc.pairs,
            vec![("t".to_string(), "123".to_string()), ("foo".to_string(), "bar".to_string())]
        );
    }

    #[test]
    fn non_bk_payload_is_discarded() {
        let mut screen = Screen::new();
        dispatch(&mut screen, b"other;stuff");
        assert!(screen.lines().is_empty());
    }

    #[test]
    fn quoted_value_allows_the_opposite_quote_and_semicolons_inside() {
        let mut screen = Screen::new();
        dispatch(&mut screen, br#"bk;msg="a;b's here""#);
        let Node::Element(Element::Apc(apc)) = &screen.lines()[0][0].node else {
            panic!("expected an APC element");
        };
        assert_eq!(apc.pairs, vec![("msg".to_string(), "a;b's here".to_string())]);
    }

    #[test]
    fn escaped_semicolon_in_a_bare_value() {
        let mut screen = Screen::new();
        dispatch(&mut screen, br"bk;msg=a\;b;other=x");
        let Node::Element(Element::Apc(apc)) = &screen.lines()[0][0].node else {
            panic!("expected an APC element");
        };
        assert_eq!(
            apc.pairs,
            vec![("msg".to_string(), "a;b".to_string()), ("other".to_string(), "x".to_string())]
        );
    }
}
