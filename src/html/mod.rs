//! The HTML serializer (spec.md §4.4): walks a finished [`Screen`] and
//! emits one HTML line per screen line, joined by `\n`.

pub mod escape;
pub mod url;

use crate::cell::{Element, Node};
use crate::screen::{Line, Screen};
use crate::style::{Color, Style, StyleFlags};

const LINK_SCHEMES: &[&str] = &["http", "https", "artifact"];

/// Serialize `screen` to an HTML fragment.
pub fn render(screen: &Screen) -> String {
    let lines: Vec<String> = screen
        .lines()
        .iter()
        .enumerate()
        .map(|(y, line)| render_line(screen, y, line))
        .collect();
    lines.join("\n")
}

fn render_line(screen: &Screen, y: usize, line: &Line) -> String {
    let mut out = String::new();

    if screen.timestamp_ever_set() {
        if let Some(ts) = screen.line_timestamp(y) {
            out.push_str("<?bk t=\"");
            out.push_str(&escape::escape(ts));
            out.push_str("\"?>");
        }
    }

    if line.is_empty() {
        out.push_str("&nbsp;");
        return out;
    }

    let mut run_style: Option<Style> = None;
    let mut run_text = String::new();
    for cell in line {
        match &cell.node {
            Node::Text(ch) => {
                if run_style != Some(cell.style) {
                    flush_run(&mut out, run_style, &run_text);
                    run_text.clear();
                    run_style = Some(cell.style);
                }
                escape::push_escaped_char(&mut run_text, *ch);
            }
            Node::Element(element) => {
                flush_run(&mut out, run_style, &run_text);
                run_text.clear();
                run_style = None;
                render_element(&mut out, element);
            }
        }
    }
    flush_run(&mut out, run_style, &run_text);

    out
}

fn flush_run(out: &mut String, style: Option<Style>, text: &str) {
    if text.is_empty() {
        return;
    }
    match style {
        Some(style) if !style.is_empty() => {
            out.push_str("<span class=\"");
            out.push_str(&class_list(style));
            out.push_str("\">");
            out.push_str(text);
            out.push_str("</span>");
        }
        _ => out.push_str(text),
    }
}

/// Build the space-separated `term-*` class list for a non-empty style
/// (spec.md §4.4).
fn class_list(style: Style) -> String {
    let mut classes = Vec::new();
    if let Some(color) = style.fg {
        classes.push(match color {
            Color::Standard(n @ 90..=97) => format!("term-fgi{n}"),
            Color::Standard(n) => format!("term-fg{n}"),
            Color::Indexed(n) => format!("term-fgx{n}"),
        });
    }
    if let Some(color) = style.bg {
        classes.push(match color {
            Color::Standard(n) => format!("term-bg{n}"),
            Color::Indexed(n) => format!("term-bgx{n}"),
        });
    }
    for &(flag, code) in StyleFlags::CLASS_CODES {
        if style.flags.contains(flag) {
            classes.push(format!("term-fg{code}"));
        }
    }
    classes.join(" ")
}

fn render_element(out: &mut String, element: &Element) {
    match element {
        Element::Image(image) => {
            out.push_str("<img alt=\"");
            out.push_str(&escape::escape(&image.alt));
            out.push_str("\" src=\"");
            out.push_str(&url::escape_url_for_attr(&image.src));
            out.push('"');
            if let Some(width) = &image.width {
                out.push_str(" width=\"");
                out.push_str(&escape::escape(width));
                out.push('"');
            }
            if let Some(height) = &image.height {
                out.push_str(" height=\"");
                out.push_str(&escape::escape(height));
                out.push('"');
            }
            out.push('>');
        }
        Element::Link(link) => {
            out.push_str("<a href=\"");
            out.push_str(&url::sanitize_href(&link.url, LINK_SCHEMES));
            out.push_str("\">");
            out.push_str(&escape::escape(&link.content));
            out.push_str("</a>");
        }
        Element::Apc(apc) => {
            out.push_str("<?bk");
            for (key, value) in &apc.pairs {
                out.push(' ');
                out.push_str(&escape::escape(key));
                out.push_str("=\"");
                out.push_str(&escape::escape(value));
                out.push('"');
            }
            out.push_str("?>");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Apc, Image, Link};

    #[test]
    fn empty_line_renders_as_nbsp() {
        let mut screen = Screen::new();
        screen.write('a');
        screen.linefeed();
        screen.carriage_return();
        screen.linefeed();
        screen.carriage_return();
        screen.write('b');
        assert_eq!(render(&screen), "a\n&nbsp;\nb");
    }

    #[test]
    fn adjacent_same_style_cells_coalesce_into_one_span() {
        let mut screen = Screen::new();
        screen.apply_sgr(&[32]);
        screen.write('a');
        screen.apply_sgr(&[32]);
        screen.write('b');
        assert_eq!(render(&screen), "<span class=\"term-fg32\">ab</span>");
    }

    #[test]
    fn intense_standard_foreground_uses_the_fgi_prefix() {
        let mut screen = Screen::new();
        screen.apply_sgr(&[90]);
        screen.write('a');
        assert_eq!(render(&screen), "<span class=\"term-fgi90\">a</span>");
    }

    #[test]
    fn intense_standard_background_keeps_the_plain_bg_prefix() {
        let mut screen = Screen::new();
        screen.apply_sgr(&[100]);
        screen.write('a');
        assert_eq!(render(&screen), "<span class=\"term-bg100\">a</span>");
    }

    #[test]
    fn style_change_flushes_a_new_span() {
        let mut screen = Screen::new();
        screen.write('h');
        screen.write('e');
        screen.apply_sgr(&[32]);
        screen.write('y');
        assert_eq!(render(&screen), "he<span class=\"term-fg32\">y</span>");
    }

    #[test]
    fn indexed_colors_use_x_class_names() {
        let mut screen = Screen::new();
        screen.apply_sgr(&[38, 5, 169, 48, 5, 50]);
        screen.write('x');
        assert_eq!(render(&screen), "<span class=\"term-fgx169 term-bgx50\">x</span>");
    }

    #[test]
    fn image_element_attributes_are_escaped() {
        let mut screen = Screen::new();
        screen.write_element(Element::Image(Image {
            alt: "<alt>".to_string(),
            src: "data:image/gif;base64,AA==".to_string(),
            width: None,
            height: None,
        }));
        assert_eq!(
            render(&screen),
            "<img alt=\"&lt;alt&gt;\" src=\"data:image/gif;base64,AA==\">"
        );
    }

    #[test]
    fn link_content_defaults_and_href_is_sanitized() {
        let mut screen = Screen::new();
        screen.write_element(Element::Link(Link {
            url: "javascript:alert(1)".to_string(),
            content: "hello".to_string(),
        }));
        assert_eq!(render(&screen), "<a href=\"#\">hello</a>");
    }

    #[test]
    fn apc_element_renders_processing_instruction() {
        let mut screen = Screen::new();
        screen.write_element(Element::Apc(Apc {
            pairs: vec![("foo".to_string(), "bar".to_string())],
        }));
        assert_eq!(render(&screen), "<?bk foo=\"bar\"?>");
    }

    #[test]
    fn apc_key_is_escaped_the_same_as_its_value() {
        let mut screen = Screen::new();
        screen.write_element(Element::Apc(Apc {
            pairs: vec![("<script".to_string(), "1".to_string())],
        }));
        let out = render(&screen);
        assert!(!out.contains("<script"));
        assert_eq!(out, "<?bk &lt;script=\"1\"?>");
    }

    #[test]
    fn timestamp_prefixes_each_line_that_has_one() {
        let mut screen = Screen::new();
        screen.set_timestamp("123");
        screen.write('h');
        assert_eq!(render(&screen), "<?bk t=\"123\"?>h");
    }
}
