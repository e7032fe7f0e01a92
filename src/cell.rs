//! Terminal cell types.
//!
//! A [`Cell`] is one character position on the [`crate::screen::Screen`]:
//! either a decoded text scalar or an inline [`Element`], plus the style in
//! effect when it was written.

use crate::style::Style;

/// An OSC 1337 inline / OSC 1338 external image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub alt: String,
    pub src: String,
    pub width: Option<String>,
    pub height: Option<String>,
}

/// An OSC 1339 hyperlink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub content: String,
}

/// An APC `bk;...` processing-instruction node (anything but a lone `t=`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Apc {
    pub pairs: Vec<(String, String)>,
}

/// The non-text payload a [`Cell`] may hold.
///
/// Elements are rendered inline and occupy exactly one cell; unlike text
/// scalars they don't participate in wide-character width accounting
/// (spec.md §1 Non-goals) — the core never produces multi-cell elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Image(Image),
    Link(Link),
    Apc(Apc),
}

/// What a [`Cell`] holds: plain text or an inline [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(char),
    Element(Element),
}

/// One character position in the terminal grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub node: Node,
    pub style: Style,
}

impl Default for Cell {
    /// A freshly allocated cell: a space with the empty style — *not* the
    /// cursor's current style (spec.md §3; only [`crate::screen::Screen::write`]
    /// stamps the current style).
    fn default() -> Self {
        Self {
            node: Node::Text(' '),
            style: Style::default(),
        }
    }
}
