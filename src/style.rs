//! Terminal display style: colors and attribute flags.
//!
//! A [`Style`] is a small, `Copy`, value-compared type — the serializer
//! relies on structural equality to coalesce adjacent cells into a single
//! `<span>` (see [`crate::html`]).

use bitflags::bitflags;

bitflags! {
    /// SGR attribute flags (spec.md §3's boolean flag set).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StyleFlags: u8 {
        const BOLD        = 1 << 0;
        const DIM          = 1 << 1;
        const ITALIC       = 1 << 2;
        const UNDERLINE    = 1 << 3;
        const BLINK        = 1 << 4;
        const INVERSE      = 1 << 5;
        const CROSSED_OUT  = 1 << 6;
    }
}

impl StyleFlags {
    /// The flag/SGR-code pairs used to name `term-fgN` classes (spec.md §4.4).
    pub const CLASS_CODES: &'static [(Self, u8)] = &[
        (Self::BOLD, 1),
        (Self::DIM, 2),
        (Self::ITALIC, 3),
        (Self::UNDERLINE, 4),
        (Self::BLINK, 5),
        (Self::INVERSE, 7),
        (Self::CROSSED_OUT, 9),
    ];
}

/// A foreground or background color, deferred to its raw SGR representation
/// so the serializer can emit `term-fgN` / `term-fgxN` class names directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// A standard color, storing the literal SGR code it was set from
    /// (30–37, 90–97 for foreground; 40–47, 100–107 for background).
    Standard(u8),
    /// A 256-color palette index (from `38;5;N` / `48;5;N`).
    Indexed(u8),
}

/// The active display attributes at a point on the screen.
///
/// Empty (`Style::default()`) iff foreground, background, and all flags are
/// unset — an empty style produces no wrapping `<span>` (spec.md §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub flags: StyleFlags,
}

impl Style {
    /// `true` iff this style has no foreground, background, or flags set.
    pub fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.flags.is_empty()
    }

    /// Apply a run of SGR parameters (spec.md §4.2), left to right.
    ///
    /// An empty parameter list is treated as a single `0` (full reset).
    /// Unknown codes are ignored without aborting the rest of the run —
    /// `\x1b[0;30;42m` sets foreground 30 and background 42 even though the
    /// run starts with a reset.
    pub fn apply_sgr(&mut self, params: &[u32]) {
        if params.is_empty() {
            *self = Self::default();
            return;
        }

        let mut i = 0;
        while i < params.len() {
            let code = params[i];
            match code {
                0 => *self = Self::default(),
                1 => self.flags.insert(StyleFlags::BOLD),
                2 => self.flags.insert(StyleFlags::DIM),
                3 => self.flags.insert(StyleFlags::ITALIC),
                4 => self.flags.insert(StyleFlags::UNDERLINE),
                5 => self.flags.insert(StyleFlags::BLINK),
                7 => self.flags.insert(StyleFlags::INVERSE),
                9 => self.flags.insert(StyleFlags::CROSSED_OUT),
                21 | 22 => self.flags.remove(StyleFlags::BOLD | StyleFlags::DIM),
                23 => self.flags.remove(StyleFlags::ITALIC),
                24 => self.flags.remove(StyleFlags::UNDERLINE),
                25 => self.flags.remove(StyleFlags::BLINK),
                27 => self.flags.remove(StyleFlags::INVERSE),
                29 => self.flags.remove(StyleFlags::CROSSED_OUT),
                30..=37 | 90..=97 => self.fg = Some(Color::Standard(code as u8)),
                39 => self.fg = None,
                40..=47 | 100..=107 => self.bg = Some(Color::Standard(code as u8)),
                49 => self.bg = None,
                38 | 48 => {
                    // Extended color: `38;5;N` / `48;5;N`. Anything else
                    // (missing the `5`, or truncated) is dropped whole —
                    // we don't want a malformed extended-color sequence to
                    // misinterpret its trailing index as an unrelated code.
                    if params.get(i + 1) == Some(&5) {
                        if let Some(&index) = params.get(i + 2) {
                            let color = Some(Color::Indexed(index.min(255) as u8));
                            if code == 38 {
                                self.fg = color;
                            } else {
                                self.bg = color;
                            }
                            i += 2;
                        } else {
                            log::trace!("truncated extended color sequence at SGR param {i}");
                        }
                    } else {
                        log::trace!("unsupported extended color mode for SGR code {code}");
                    }
                }
                other => log::trace!("ignoring unknown SGR code {other}"),
            }
            i += 1;
        }
    }
}
