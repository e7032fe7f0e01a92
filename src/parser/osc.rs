//! OSC (Operating System Command) dispatch for inline images (1337),
//! external images (1338), and hyperlinks (1339) — spec.md §4.3.

use base64::Engine as _;

use crate::cell::{Element, Image, Link};
use crate::html::url::is_allowed_image_scheme;
use crate::screen::Screen;

const EXTERNAL_IMAGE_SCHEMES: &[&str] = &["http", "https"];

/// Split `s` on its first `;` into (code, rest).
fn split_code(s: &str) -> Option<(&str, &str)> {
    let semi = s.find(';')?;
    Some((&s[..semi], &s[semi + 1..]))
}

/// Parse a `;`-separated `key=value` list. No quoting or escaping — OSC
/// 1337/1338/1339 parameters are plain tokens, unlike APC `bk;` payloads.
fn parse_kv_list(s: &str) -> Vec<(&str, &str)> {
    s.split(';')
        .filter_map(|part| part.split_once('='))
        .collect()
}

fn lookup<'a>(pairs: &[(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Infer a MIME type from a filename's extension (spec.md §4.3, extended
/// per SPEC_FULL.md §3 beyond the four named extensions).
fn mime_for_filename(name: &str) -> &'static str {
    let ext = name.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "gif" => "image/gif",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "pdf" => "application/pdf",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// Write `element` on its own line: if the cursor isn't already at column
/// 0, start a fresh line first; then write the element and start another
/// fresh line after it (spec.md §4.3 image rendering policy). Consecutive
/// images collapse naturally since the post-element linefeed already
/// leaves the cursor at column 0.
fn emit_block_element(screen: &mut Screen, element: Element) {
    if screen.cursor_x() != 0 {
        screen.linefeed();
        screen.carriage_return();
    }
    screen.write_element(element);
    screen.linefeed();
    screen.carriage_return();
}

pub fn dispatch(screen: &mut Screen, payload: &[u8]) {
    let text = String::from_utf8_lossy(payload);
    let Some((code, rest)) = split_code(&text) else {
        log::trace!("OSC payload has no numeric code: {text:?}");
        return;
    };
    match code {
        "1337" => handle_inline_image(screen, rest),
        "1338" => handle_external_image(screen, rest),
        "1339" => handle_hyperlink(screen, rest),
        other => log::trace!("discarding unrecognized OSC code {other}"),
    }
}

/// `File=key=value;key=value:BASE64`.
fn handle_inline_image(screen: &mut Screen, rest: &str) {
    let Some(after_file) = rest.strip_prefix("File=") else {
        log::trace!("OSC 1337 payload missing File= prefix");
        return;
    };
    let Some((params, payload_b64)) = after_file.split_once(':') else {
        log::trace!("OSC 1337 payload missing ':' before base64 data");
        return;
    };

    let pairs = parse_kv_list(params);
    if lookup(&pairs, "inline") != Some("1") {
        return;
    }

    let name = lookup(&pairs, "name").unwrap_or_default();
    let filename = base64::engine::general_purpose::STANDARD
        .decode(name)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default();

    let payload_valid = base64::engine::general_purpose::STANDARD
        .decode(payload_b64)
        .is_ok();
    let payload = if payload_valid { payload_b64 } else { "" };

    let mime = mime_for_filename(&filename);
    let image = Image {
        alt: filename,
        src: format!("data:{mime};base64,{payload}"),
        width: lookup(&pairs, "width").map(str::to_string),
        height: lookup(&pairs, "height").map(str::to_string),
    };
    emit_block_element(screen, Element::Image(image));
}

/// `url=...;alt=...;width=...;height=...`.
fn handle_external_image(screen: &mut Screen, rest: &str) {
    let pairs = parse_kv_list(rest);
    let Some(url) = lookup(&pairs, "url") else {
        log::trace!("OSC 1338 payload missing url=");
        return;
    };
    if !is_allowed_image_scheme(url, EXTERNAL_IMAGE_SCHEMES) {
        log::trace!("dropping external image with disallowed scheme: {url}");
        return;
    }
    let image = Image {
        alt: lookup(&pairs, "alt").unwrap_or_default().to_string(),
        src: url.to_string(),
        width: lookup(&pairs, "width").map(str::to_string),
        height: lookup(&pairs, "height").map(str::to_string),
    };
    emit_block_element(screen, Element::Image(image));
}

/// `url=...;content=...`; content defaults to the URL.
fn handle_hyperlink(screen: &mut Screen, rest: &str) {
    let pairs = parse_kv_list(rest);
    let Some(url) = lookup(&pairs, "url") else {
        log::trace!("OSC 1339 payload missing url=");
        return;
    };
    let content = lookup(&pairs, "content").unwrap_or(url).to_string();
    screen.write_element(Element::Link(Link {
        url: url.to_string(),
        content,
    }));
}
