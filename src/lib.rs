//! Renders a byte stream of ANSI/VT100 terminal output — including the
//! `OSC 1337`/`1338`/`1339` inline-image, external-image, and hyperlink
//! extensions, and a `bk;` `APC` timestamp/processing-instruction
//! extension — as a static HTML fragment.
//!
//! The crate exposes a single entry point, [`render`]. It drives a
//! [`screen::Screen`] from the input with [`parser::Parser`], then walks
//! the finished screen with [`html::render`]. `render` never fails: every
//! malformed escape sequence is handled by one of the policies in the
//! module docs below rather than surfaced as an error.

mod cell;
mod html;
mod parser;
mod screen;
mod style;

pub use cell::{Apc, Cell, Element, Image, Link, Node};
pub use screen::{DisplayClearMode, Line, LineClearMode, Screen};
pub use style::{Color, Style, StyleFlags};

/// Render `input` to an HTML fragment (no wrapping `<html>`/`<body>`).
///
/// `input` is an arbitrary byte sequence; invalid UTF-8 is tolerated and
/// replaced with U+FFFD rather than aborting the render.
pub fn render(input: &[u8]) -> String {
    let mut screen = Screen::new();
    parser::Parser::new().feed(&mut screen, input);
    html::render(&screen)
}
