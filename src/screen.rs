//! The virtual screen: a growable grid of styled cells with a cursor.
//!
//! Ported from the teacher's `grid` module family (`Grid`, `Cursor`,
//! `grid::editing`, `grid::navigation`) with the fixed-width/scrollback/
//! scroll-region/tab-stop machinery stripped out — spec.md §1 scopes this
//! core down to an unbounded, lazily-growing grid with a single cursor and
//! style register.

use crate::cell::{Cell, Element, Node};
use crate::style::Style;

/// One row of cells. Grows rightward on demand; never pre-allocated to a
/// fixed width (spec.md §9: "do not allocate a rectangular buffer").
pub type Line = Vec<Cell>;

/// Mode for [`Screen::clear_line`] (CSI `K`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClearMode {
    /// Erase from the start of the line through the cursor, inclusive.
    Before,
    /// Erase from the cursor to the end of the line (truncates).
    After,
    /// Erase the entire line, keeping its length.
    All,
}

/// Mode for [`Screen::clear_display`] (CSI `J`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayClearMode {
    /// Erase from the cursor to the end of the display.
    Below,
    /// Erase from the start of the display through the cursor.
    Above,
    /// Erase the entire display and reset the cursor to (0, 0).
    All,
}

/// The in-memory terminal screen the parser drives.
///
/// One `Screen` exists per [`crate::render`] call: created empty, driven to
/// completion, serialized once, then discarded (spec.md §3 Lifecycle).
#[derive(Debug, Default)]
pub struct Screen {
    lines: Vec<Line>,
    /// Timestamp in effect when each line in `lines` was last touched.
    /// Parallel to `lines`; see [`Screen::set_timestamp`].
    line_timestamps: Vec<Option<String>>,
    x: usize,
    y: usize,
    style: Style,
    last_timestamp: Option<String>,
    timestamp_ever_set: bool,
}

impl Screen {
    /// Create an empty screen: cursor at (0, 0), empty style, no lines.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor_x(&self) -> usize {
        self.x
    }

    pub fn cursor_y(&self) -> usize {
        self.y
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line_timestamp(&self, index: usize) -> Option<&str> {
        self.line_timestamps.get(index)?.as_deref()
    }

    pub fn timestamp_ever_set(&self) -> bool {
        self.timestamp_ever_set
    }

    /// Grow `lines`/`line_timestamps` so that index `y` exists, if it
    /// doesn't already. Newly created lines are empty sequences — left
    /// padding happens lazily on write, not here (spec.md §4.1) — and
    /// inherit whatever timestamp is currently registered, since nothing
    /// could have changed it while those rows were merely skipped over by
    /// cursor motion.
    fn ensure_line(&mut self, y: usize) {
        while self.lines.len() <= y {
            self.lines.push(Line::new());
            self.line_timestamps.push(self.last_timestamp.clone());
        }
    }

    fn write_cell(&mut self, cell: Cell) {
        let (x, y) = (self.x, self.y);
        self.ensure_line(y);
        let line = &mut self.lines[y];
        if x >= line.len() {
            line.resize_with(x, Cell::default);
            line.push(cell);
        } else {
            line[x] = cell;
        }
        self.x = x + 1;
    }

    /// Place a text scalar at the cursor with the current style, then
    /// advance the cursor one column.
    pub fn write(&mut self, scalar: char) {
        let style = self.style;
        self.write_cell(Cell {
            node: Node::Text(scalar),
            style,
        });
    }

    /// As [`Screen::write`], but with an [`Element`] payload. Elements
    /// occupy exactly one cell and don't participate in cursor-advance
    /// beyond the usual single-column step.
    pub fn write_element(&mut self, element: Element) {
        let style = self.style;
        self.write_cell(Cell {
            node: Node::Element(element),
            style,
        });
    }

    /// Move the cursor left one column. Never crosses into the previous
    /// line.
    pub fn backspace(&mut self) {
        self.x = self.x.saturating_sub(1);
    }

    pub fn carriage_return(&mut self) {
        self.x = 0;
    }

    /// Move down one row; `x` is unchanged. The new row is allocated
    /// lazily on the next write.
    pub fn linefeed(&mut self) {
        if self.y < self.lines.len() {
            self.line_timestamps[self.y] = self.last_timestamp.clone();
        }
        self.y += 1;
    }

    pub fn reverse_linefeed(&mut self) {
        self.y = self.y.saturating_sub(1);
    }

    /// Cursor motion, clamped at 0 on the low side, unbounded on the high
    /// side. Callers (the parser) are responsible for resolving a missing
    /// or zero CSI parameter to `1` before calling these.
    pub fn up(&mut self, n: usize) {
        self.y = self.y.saturating_sub(n);
    }

    pub fn down(&mut self, n: usize) {
        self.y += n;
    }

    pub fn forward(&mut self, n: usize) {
        self.x += n;
    }

    pub fn back(&mut self, n: usize) {
        self.x = self.x.saturating_sub(n);
    }

    /// `CSI n G`: move to an already-0-based column.
    pub fn goto_column(&mut self, n: usize) {
        self.x = n;
    }

    pub fn apply_sgr(&mut self, params: &[u32]) {
        self.style.apply_sgr(params);
    }

    /// Update the timestamp register (APC `bk;t=...`). Annotates the
    /// current line immediately — lines materialized later inherit
    /// whatever value is registered at creation time (see
    /// [`Screen::ensure_line`]), which together give each line "the most
    /// recent timestamp observed before its terminator was consumed"
    /// (spec.md §4.4).
    pub fn set_timestamp(&mut self, ts: &str) {
        self.timestamp_ever_set = true;
        self.last_timestamp = Some(ts.to_string());
        if self.y < self.lines.len() {
            self.line_timestamps[self.y] = self.last_timestamp.clone();
        }
    }

    pub fn clear_line(&mut self, mode: LineClearMode) {
        let y = self.y;
        if y >= self.lines.len() {
            return;
        }
        let x = self.x;
        let line = &mut self.lines[y];
        match mode {
            LineClearMode::Before => {
                if !line.is_empty() {
                    let end = x.min(line.len() - 1);
                    for cell in &mut line[..=end] {
                        *cell = Cell::default();
                    }
                }
            }
            LineClearMode::After => {
                line.truncate(x.min(line.len()));
            }
            LineClearMode::All => {
                let len = line.len();
                *line = vec![Cell::default(); len];
            }
        }
    }

    pub fn clear_display(&mut self, mode: DisplayClearMode) {
        let y = self.y;
        match mode {
            DisplayClearMode::Below => {
                if y < self.lines.len() {
                    let x = self.x;
                    let len = self.lines[y].len();
                    self.lines[y].truncate(x.min(len));
                    self.lines.truncate(y + 1);
                    self.line_timestamps.truncate(y + 1);
                }
            }
            DisplayClearMode::Above => {
                if y < self.lines.len() {
                    let x = self.x;
                    let len = self.lines[y].len();
                    for cell in &mut self.lines[y][..x.min(len)] {
                        *cell = Cell::default();
                    }
                }
                for line in &mut self.lines[..y.min(self.lines.len())] {
                    line.clear();
                }
            }
            DisplayClearMode::All => {
                self.lines.clear();
                self.line_timestamps.clear();
                self.x = 0;
                self.y = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests;
