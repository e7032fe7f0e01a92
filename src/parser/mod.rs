//! The byte-oriented escape-sequence parser (spec.md §4.3).
//!
//! Ported from the shape of the teacher's `term::handler` — a small
//! dispatcher per concern (`csi`, `osc`, `apc`) driven by one state
//! machine — but driving the state machine directly instead of through
//! `vte::ansi::Handler`. The teacher's `vte` dependency provides a fixed,
//! standards-conformant ANSI processor: it has no hook for the custom OSC
//! 1337/1338/1339 image/link payloads this spec requires, and its
//! `SosPmApcString` state discards APC payload bytes outright rather than
//! handing them to the application. Those two requirements are exactly
//! this module's reason to exist, so the state machine is hand-rolled here
//! in the same explicit "states + transition table" shape `vte` itself
//! uses internally (spec.md §9 design note), not recursive descent.

mod apc;
mod csi;
mod osc;

use crate::screen::Screen;

const MAX_CSI_PARAM: u32 = 65_535;

/// Parameter accumulation for an in-progress CSI sequence.
#[derive(Debug, Default)]
struct CsiState {
    params: Vec<u32>,
    current: Option<u32>,
    private: bool,
}

#[derive(Debug)]
enum State {
    Ground,
    Escape,
    Csi(CsiState),
    Osc(Vec<u8>),
    Apc(Vec<u8>),
}

/// Drives a [`Screen`] from a raw byte stream.
///
/// Restartable in principle (the state machine holds no borrowed data), but
/// this crate only ever calls [`Parser::feed`] once per screen — streaming,
/// partial-frame parsing is out of scope (spec.md §1 Non-goals).
#[derive(Debug)]
pub struct Parser {
    state: State,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: State::Ground,
        }
    }

    /// Consume the entire input, driving `screen` to completion.
    ///
    /// An escape sequence left unterminated at end of input is discarded
    /// silently (spec.md §7's truncate-at-EOF policy) — the parser simply
    /// stops with its accumulation state unused.
    pub fn feed(&mut self, screen: &mut Screen, input: &[u8]) {
        let mut i = 0;
        while i < input.len() {
            i = self.step(screen, input, i);
        }
    }

    fn step(&mut self, screen: &mut Screen, input: &[u8], i: usize) -> usize {
        match self.state {
            State::Ground => self.step_ground(screen, input, i),
            State::Escape => self.step_escape(screen, input, i),
            State::Csi(_) => self.step_csi(screen, input, i),
            State::Osc(_) => self.step_osc(screen, input, i),
            State::Apc(_) => self.step_apc(screen, input, i),
        }
    }

    fn step_ground(&mut self, screen: &mut Screen, input: &[u8], i: usize) -> usize {
        match input[i] {
            0x1b => {
                self.state = State::Escape;
                i + 1
            }
            b'\r' => {
                screen.carriage_return();
                i + 1
            }
            b'\n' => {
                // Plain `\n` is treated the way captured terminal output
                // almost always means it (ONLCR-style cooked mode): move
                // to the next line *and* return to column 0. `Screen`
                // itself keeps `linefeed`/`carriage_return` decoupled —
                // `\x1b[nB` (cursor down) goes through `Screen::down` and
                // preserves the column, only bare `\n` implies the return.
                screen.linefeed();
                screen.carriage_return();
                i + 1
            }
            0x08 => {
                screen.backspace();
                i + 1
            }
            _ => decode_and_write(screen, input, i),
        }
    }

    /// `ESC` was just consumed; `input[i]` decides the next state.
    fn step_escape(&mut self, screen: &mut Screen, input: &[u8], i: usize) -> usize {
        match input[i] {
            b'[' => {
                self.state = State::Csi(CsiState::default());
                i + 1
            }
            b']' => {
                self.state = State::Osc(Vec::new());
                i + 1
            }
            b'_' => {
                self.state = State::Apc(Vec::new());
                i + 1
            }
            b'M' => {
                screen.reverse_linefeed();
                self.state = State::Ground;
                i + 1
            }
            _ => {
                // Malformed escape: discard the introducer and re-process
                // this byte as ground text (it may start a multi-byte
                // UTF-8 sequence, so don't just emit it raw).
                self.state = State::Ground;
                i
            }
        }
    }

    fn step_csi(&mut self, screen: &mut Screen, input: &[u8], i: usize) -> usize {
        let byte = input[i];
        let State::Csi(csi) = &mut self.state else {
            unreachable!("step_csi called outside Csi state")
        };

        match byte {
            b'?' => {
                csi.private = true;
                i + 1
            }
            b'0'..=b'9' => {
                let digit = u32::from(byte - b'0');
                let next = csi.current.unwrap_or(0).saturating_mul(10).saturating_add(digit);
                csi.current = Some(next.min(MAX_CSI_PARAM));
                i + 1
            }
            b';' => {
                csi.params.push(csi.current.take().unwrap_or(0));
                i + 1
            }
            0x40..=0x7e => {
                if let Some(n) = csi.current.take() {
                    csi.params.push(n);
                }
                let State::Csi(CsiState { params, private, .. }) =
                    std::mem::replace(&mut self.state, State::Ground)
                else {
                    unreachable!()
                };
                csi::dispatch(screen, &params, private, byte);
                i + 1
            }
            _ => {
                // Not a parameter byte and not a final byte: the sequence
                // is malformed. Discard it and resume at this byte.
                self.state = State::Ground;
                i
            }
        }
    }

    fn step_osc(&mut self, screen: &mut Screen, input: &[u8], i: usize) -> usize {
        let byte = input[i];
        if byte == 0x07 {
            let State::Osc(buf) = std::mem::replace(&mut self.state, State::Ground) else {
                unreachable!()
            };
            osc::dispatch(screen, &buf);
            return i + 1;
        }
        if byte == 0x1b {
            if input.get(i + 1) == Some(&b'\\') {
                let State::Osc(buf) = std::mem::replace(&mut self.state, State::Ground) else {
                    unreachable!()
                };
                osc::dispatch(screen, &buf);
                return i + 2;
            }
            // Lone ESC inside an OSC string: abort the string and resume
            // interpreting from the escape introducer.
            self.state = State::Escape;
            return i + 1;
        }
        if let State::Osc(buf) = &mut self.state {
            buf.push(byte);
        }
        i + 1
    }

    fn step_apc(&mut self, screen: &mut Screen, input: &[u8], i: usize) -> usize {
        let byte = input[i];
        if byte == 0x07 {
            let State::Apc(buf) = std::mem::replace(&mut self.state, State::Ground) else {
                unreachable!()
            };
            apc::dispatch(screen, &buf);
            return i + 1;
        }
        if byte == 0x1b {
            if input.get(i + 1) == Some(&b'\\') {
                let State::Apc(buf) = std::mem::replace(&mut self.state, State::Ground) else {
                    unreachable!()
                };
                apc::dispatch(screen, &buf);
                return i + 2;
            }
            self.state = State::Escape;
            return i + 1;
        }
        if let State::Apc(buf) = &mut self.state {
            buf.push(byte);
        }
        i + 1
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode one UTF-8 scalar starting at `input[i]` and write it to `screen`.
///
/// Invalid bytes are replaced with U+FFFD and skipped one at a time, never
/// aborting the parse (spec.md §4.3, §7).
fn decode_and_write(screen: &mut Screen, input: &[u8], i: usize) -> usize {
    match std::str::from_utf8(&input[i..]) {
        Ok(rest) => {
            let ch = rest.chars().next().expect("non-empty slice decodes to >=1 char");
            screen.write(ch);
            i + ch.len_utf8()
        }
        Err(err) => {
            let valid_up_to = err.valid_up_to();
            if valid_up_to > 0 {
                let rest = std::str::from_utf8(&input[i..i + valid_up_to])
                    .expect("prefix validated by valid_up_to");
                let ch = rest.chars().next().expect("non-empty prefix");
                screen.write(ch);
                i + ch.len_utf8()
            } else {
                log::trace!("replacing invalid UTF-8 byte at offset {i} with U+FFFD");
                screen.write('\u{fffd}');
                i + 1
            }
        }
    }
}
