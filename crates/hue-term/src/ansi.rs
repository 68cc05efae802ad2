// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. They know
// the byte-level encoding of the handful of terminal commands the explorer
// needs: cursor placement, clearing, background colors, synchronized output,
// mouse tracking, cursor shape, and OSC 52 clipboard writes.
//
// Cursor positions are 0-indexed in this API and converted to the 1-indexed
// form ANSI expects.
use std::io::{self, Write};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

use crate::color::CellColor;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` using CUP. Our coordinates are 0-indexed.
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1)
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2) and home the cursor.
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J\x1b[H")
}

/// Clear from the cursor to the end of the line (EL 0).
#[inline]
pub fn clear_to_eol(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[K")
}

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(RESET.as_bytes())
}

/// The SGR reset sequence, for callers composing strings.
pub const RESET: &str = "\x1b[0m";

// ─── Background Color ────────────────────────────────────────────────────────

/// Set the background color.
///
/// Compact codes for the 16 basic colors (40–47, 100–107), the 256-color
/// form for palette indices 16–255, and 24-bit `TrueColor` for RGB.
pub fn bg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Ansi256(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 40 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 92 + u16::from(idx))
            } else {
                write!(w, "\x1b[48;5;{idx}m")
            }
        }
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[48;2;{r};{g};{b}m"),
    }
}

/// The background sequence for `color` as an owned string.
///
/// Status lines and saved-color descriptions embed swatches as text, so
/// they need the escape sequence as a `String` rather than a write.
#[must_use]
pub fn bg_string(color: CellColor) -> String {
    let mut buf = Vec::with_capacity(20);
    // Writing into a Vec cannot fail.
    let _ = bg(&mut buf, color);
    String::from_utf8_lossy(&buf).into_owned()
}

// ─── Synchronized Output ─────────────────────────────────────────────────────

/// Begin synchronized output (DEC Private Mode 2026).
///
/// The terminal holds the frame until [`end_sync`], so a full repaint of a
/// color grid never shows up half drawn.
#[inline]
pub fn begin_sync(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2026h")
}

/// End synchronized output — the terminal renders the buffered frame.
#[inline]
pub fn end_sync(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2026l")
}

// ─── Alternate Screen ───────────────────────────────────────────────────────

/// Enter the alternate screen buffer (DEC Private Mode 1049).
#[inline]
pub fn enter_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049h")
}

/// Exit the alternate screen buffer and restore original content.
#[inline]
pub fn exit_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049l")
}

// ─── Mouse Protocol ─────────────────────────────────────────────────────────

/// Enable SGR mouse reports (DEC 1006) for buttons and every motion
/// (DEC 1000 + 1002 + 1003). Hover needs the all-motion level.
pub fn enable_mouse(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1000h\x1b[?1002h\x1b[?1003h\x1b[?1006h")
}

/// Disable all mouse tracking.
pub fn disable_mouse(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1006l\x1b[?1003l\x1b[?1002l\x1b[?1000l")
}

// ─── Cursor Shape ───────────────────────────────────────────────────────────

/// Terminal cursor shape (DECSCUSR).
///
/// The explorer echoes the pointer position with the hardware cursor, so a
/// block is the most visible choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    /// Terminal default (usually blinking block).
    #[default]
    Default,
    /// Steady block cursor.
    SteadyBlock,
}

/// Set the cursor shape using DECSCUSR.
#[inline]
pub fn set_cursor_shape(w: &mut impl Write, shape: CursorShape) -> io::Result<()> {
    let n: u8 = match shape {
        CursorShape::Default => 0,
        CursorShape::SteadyBlock => 2,
    };
    write!(w, "\x1b[{n} q")
}

// ─── Clipboard (OSC 52) ─────────────────────────────────────────────────────

/// Copy `text` to the system clipboard with OSC 52.
///
/// The payload is base64 encoded and targets the `c` (clipboard) selection.
/// Terminated with ST (`ESC \`), which every OSC 52 capable terminal accepts.
pub fn copy_to_clipboard(w: &mut impl Write, text: &str) -> io::Result<()> {
    let payload = BASE64_STANDARD.encode(text.as_bytes());
    write!(w, "\x1b]52;c;{payload}\x1b\\")
}

// ─── Tests ───────────────────────────────────────────────────────────────────
