// SPDX-License-Identifier: MIT
//
// Surface — the frame-sized output buffer the explorer draws into.
//
// All output for one event goes into memory first and reaches the terminal
// in a single write when the event loop flushes. On top of the raw buffer
// the surface offers the drawing vocabulary the explorer uses: positioned
// text, right-aligned status text, background color runs, cursor echo and
// clipboard writes.
//
// Positions are 1-based `(col, row)`, the same space the terminal uses for
// mouse reports, so hit-test coordinates and draw coordinates never need
// translating. Background runs remember the last color emitted and skip
// the SGR when consecutive runs share it.

use std::io::{self, Write};

use unicode_width::UnicodeWidthChar;

use crate::ansi;
use crate::color::CellColor;
use crate::terminal::Size;

/// Initial buffer capacity. A full truecolor repaint of a 200×60 grid with
/// a color change per cell is about 240 KB; typical frames are far smaller.
const DEFAULT_CAPACITY: usize = 64 * 1024;

/// Buffered drawing surface for one terminal.
pub struct Surface {
    buf: Vec<u8>,
    size: Size,
    /// Background emitted most recently, `None` after a reset.
    last_bg: Option<CellColor>,
}

impl Surface {
    /// Create an empty surface for a terminal of `size`.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
            size,
            last_bg: None,
        }
    }

    /// Terminal size this surface draws for.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Adopt a new terminal size.
    pub const fn resize(&mut self, size: Size) {
        self.size = size;
    }

    /// Bytes accumulated since the last flush.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Whether nothing is waiting to be flushed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    // ── Frame control ───────────────────────────────────────────────

    /// Begin a synchronized frame.
    pub fn begin_frame(&mut self) {
        let _ = ansi::begin_sync(&mut self.buf);
    }

    /// End a synchronized frame.
    pub fn end_frame(&mut self) {
        let _ = ansi::end_sync(&mut self.buf);
    }

    /// Reset attributes and clear the whole screen.
    pub fn clear_screen(&mut self) {
        self.reset();
        let _ = ansi::clear_screen(&mut self.buf);
    }

    /// Clear from the cursor to the end of its line.
    pub fn clear_to_eol(&mut self) {
        let _ = ansi::clear_to_eol(&mut self.buf);
    }

    /// Reset SGR attributes.
    pub fn reset(&mut self) {
        let _ = ansi::reset(&mut self.buf);
        self.last_bg = None;
    }

    /// Move the cursor to the 1-based `(col, row)`.
    pub fn move_cursor(&mut self, col: u16, row: u16) {
        let _ = ansi::cursor_to(
            &mut self.buf,
            col.saturating_sub(1),
            row.saturating_sub(1),
        );
    }

    // ── Text ────────────────────────────────────────────────────────

    /// Append text at the current cursor position.
    pub fn write_str(&mut self, text: &str) {
        self.buf.extend_from_slice(text.as_bytes());
    }

    /// Reset attributes, then write `text` starting at `(col, row)`.
    pub fn write_at(&mut self, col: u16, row: u16, text: &str) {
        self.move_cursor(col, row);
        self.reset();
        self.write_str(text);
    }

    /// Write `text` so it ends at the right edge of `row`.
    ///
    /// `text` may embed SGR sequences; only visible characters count
    /// toward its width. Text wider than the screen starts at column 1.
    pub fn write_right(&mut self, row: u16, text: &str) {
        let width = visible_width(text);
        let cols = usize::from(self.size.cols);
        let col = cols.saturating_sub(width) + 1;
        self.move_cursor(u16::try_from(col).unwrap_or(1), row);
        self.write_str(text);
    }

    // ── Color ───────────────────────────────────────────────────────

    /// Paint `len` cells of background `color` starting at `(col, row)`.
    ///
    /// Consecutive runs of the same color skip the SGR sequence.
    pub fn fill(&mut self, col: u16, row: u16, len: u16, color: CellColor) {
        if len == 0 {
            return;
        }
        self.move_cursor(col, row);
        if self.last_bg != Some(color) {
            let _ = ansi::bg(&mut self.buf, color);
            self.last_bg = Some(color);
        }
        self.buf.resize(self.buf.len() + usize::from(len), b' ');
    }

    // ── Clipboard ───────────────────────────────────────────────────

    /// Queue an OSC 52 clipboard write of `text`.
    pub fn copy_to_clipboard(&mut self, text: &str) {
        let _ = ansi::copy_to_clipboard(&mut self.buf, text);
    }

    // ── Output ──────────────────────────────────────────────────────

    /// Write accumulated output to stdout and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        self.flush_to(&mut stdout)
    }

    /// Write accumulated output to `w` and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for Surface {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Real flushing happens in flush_stdout / flush_to.
        Ok(())
    }
}

/// Display width of `text`, skipping CSI (`ESC [ … final`) and
/// OSC (`ESC ] … ST/BEL`) sequences.
#[must_use]
pub fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\x1b' {
            width += ch.width().unwrap_or(0);
            continue;
        }
        match chars.next() {
            Some('[') => {
                for c in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                while let Some(c) = chars.next() {
                    if c == '\x07' {
                        break;
                    }
                    if c == '\x1b' {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    width
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn surface() -> Surface {
        Surface::new(Size { cols: 20, rows: 5 })
    }

    fn text(s: &Surface) -> String {
        String::from_utf8(s.as_bytes().to_vec()).unwrap()
    }

    // ── Positioning ─────────────────────────────────────────────────

    #[test]
    fn move_cursor_is_one_based() {
        let mut s = surface();
        s.move_cursor(1, 1);
        s.move_cursor(18, 3);
        assert_eq!(text(&s), "\x1b[1;1H\x1b[3;18H");
    }

    #[test]
    fn write_at_resets_before_text() {
        let mut s = surface();
        s.write_at(2, 4, "hi");
        assert_eq!(text(&s), "\x1b[4;2H\x1b[0mhi");
    }

    #[test]
    fn write_right_aligns_visible_width() {
        let mut s = surface();
        s.write_right(1, "\x1b[41m  \x1b[0m abc");
        assert!(text(&s).starts_with("\x1b[1;15H"));
    }

    #[test]
    fn write_right_overlong_starts_at_column_one() {
        let mut s = surface();
        s.write_right(2, &"x".repeat(40));
        assert!(text(&s).starts_with("\x1b[2;1H"));
    }

    // ── Fill ────────────────────────────────────────────────────────

    #[test]
    fn fill_skips_repeated_background() {
        let mut s = surface();
        s.fill(1, 2, 3, CellColor::Ansi256(1));
        s.fill(4, 2, 2, CellColor::Ansi256(1));
        assert_eq!(text(&s), "\x1b[2;1H\x1b[41m   \x1b[2;4H  ");
    }

    #[test]
    fn reset_forgets_background() {
        let mut s = surface();
        s.fill(1, 1, 1, CellColor::Rgb(1, 2, 3));
        s.reset();
        s.fill(2, 1, 1, CellColor::Rgb(1, 2, 3));
        assert_eq!(text(&s).matches("\x1b[48;2;1;2;3m").count(), 2);
    }

    #[test]
    fn fill_zero_len_is_noop() {
        let mut s = surface();
        s.fill(1, 1, 0, CellColor::Ansi256(0));
        assert!(s.is_empty());
    }

    // ── Flush ───────────────────────────────────────────────────────

    #[test]
    fn flush_to_drains_buffer() {
        let mut s = surface();
        s.write_str("frame");
        let mut out = Vec::new();
        s.flush_to(&mut out).unwrap();
        assert_eq!(out, b"frame");
        assert!(s.is_empty());
    }

    #[test]
    fn clipboard_goes_through_osc52() {
        let mut s = surface();
        s.copy_to_clipboard("red");
        assert_eq!(text(&s), "\x1b]52;c;cmVk\x1b\\");
    }

    // ── Width ───────────────────────────────────────────────────────

    #[test]
    fn visible_width_ignores_escapes() {
        assert_eq!(visible_width("\x1b[48;2;1;2;3m   \x1b[0m ab"), 6);
        assert_eq!(visible_width("\x1b]52;c;aGk=\x1b\\x"), 1);
    }

    #[test]
    fn visible_width_counts_wide_and_arrows() {
        assert_eq!(visible_width("↑↓"), 2);
        assert_eq!(visible_width("色"), 2);
    }
}
