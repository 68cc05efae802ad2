// SPDX-License-Identifier: MIT
//
// Terminal input parser.
//
// Turns raw stdin bytes into structured events: keys (with the modifier
// parameter xterm puts on arrows, e.g. `ESC [ 1 ; 2 A` for Shift+Up) and
// SGR mouse reports (press / release / drag / move / scroll, with Shift,
// Alt and Ctrl).
//
// Mouse coordinates are kept exactly as the terminal reports them: 1-based
// column and row. The explorer's hit table uses the same space, so a report
// can be looked up without translation.
//
// The parser keeps a small byte buffer because an escape sequence can be
// split across two reads. A lone ESC stays pending until either more bytes
// arrive or the caller decides it was a real Escape and calls `flush`.

use bitflags::bitflags;

// ─── Event Types ────────────────────────────────────────────────────────────

/// A parsed terminal input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// A mouse report.
    Mouse(MouseEvent),
}

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which key was pressed.
    pub code: KeyCode,
    /// Active modifier keys.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press without modifiers.
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    /// Ctrl + `c`, the way a raw-mode terminal delivers it (byte `c & 0x1f`).
    #[must_use]
    pub fn is_ctrl(self, c: char) -> bool {
        self.code == KeyCode::Char(c) && self.modifiers.contains(Modifiers::CTRL)
    }
}

/// Identity of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A Unicode character.
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// F1 through F12.
    F(u8),
}

bitflags! {
    /// Keyboard modifier flags, in the xterm encoding (`param = 1 + bits`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
        const META  = 0b0000_1000;
    }
}

/// A mouse report: action, 1-based position, and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// What happened.
    pub kind: MouseEventKind,
    /// 1-based column, as reported.
    pub x: u16,
    /// 1-based row, as reported.
    pub y: u16,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Whether this report is a button release — a completed click.
    #[inline]
    #[must_use]
    pub const fn is_release(&self) -> bool {
        matches!(self.kind, MouseEventKind::Release(_))
    }

    /// Whether the report is a release of the right button.
    #[inline]
    #[must_use]
    pub const fn is_right_click(&self) -> bool {
        matches!(self.kind, MouseEventKind::Release(MouseButton::Right))
    }
}

/// Mouse event classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Press(MouseButton),
    Release(MouseButton),
    /// Motion with a button held.
    Drag(MouseButton),
    /// Motion with no button held (needs all-motion tracking).
    Move,
    ScrollUp,
    ScrollDown,
}

/// Mouse button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

// ─── Parser ─────────────────────────────────────────────────────────────────

/// Incremental terminal input parser.
///
/// Feed bytes with [`advance`](Parser::advance); incomplete sequences are
/// buffered until the next call. [`flush`](Parser::flush) resolves whatever
/// is left (a lone ESC becomes an Escape key).
#[derive(Debug, Default)]
pub struct Parser {
    buf: Vec<u8>,
}

impl Parser {
    /// Create a parser with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(64),
        }
    }

    /// Feed raw bytes and return every event that can be fully parsed.
    pub fn advance(&mut self, data: &[u8]) -> Vec<Event> {
        self.buf.extend_from_slice(data);
        let mut events = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            match try_parse(&self.buf[pos..]) {
                Parsed::Event(event, consumed) => {
                    events.push(event);
                    pos += consumed;
                }
                Parsed::Incomplete => break,
                Parsed::Skip(n) => pos += n,
            }
        }

        if pos > 0 {
            self.buf.drain(..pos);
        }
        events
    }

    /// Whether unconsumed bytes are waiting for more input.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Resolve pending bytes as literal keys.
    ///
    /// Called after an input timeout: a lone ESC is the Escape key, and a
    /// truncated sequence degrades to its printable bytes.
    pub fn flush(&mut self) -> Vec<Event> {
        let events = self
            .buf
            .iter()
            .filter_map(|&byte| match byte {
                0x1B => Some(KeyEvent::plain(KeyCode::Escape)),
                0x7F => Some(KeyEvent::plain(KeyCode::Backspace)),
                b @ 0x01..=0x1A => Some(KeyEvent {
                    code: KeyCode::Char((b + b'a' - 1) as char),
                    modifiers: Modifiers::CTRL,
                }),
                b @ 0x20..=0x7E => Some(KeyEvent::plain(KeyCode::Char(b as char))),
                _ => None,
            })
            .map(Event::Key)
            .collect();
        self.buf.clear();
        events
    }
}

// ─── Stateless Parsing ──────────────────────────────────────────────────────

/// Outcome of parsing one event from the front of a buffer.
enum Parsed {
    /// An event, consuming `usize` bytes.
    Event(Event, usize),
    /// Need more bytes.
    Incomplete,
    /// Unrecognized, skip `usize` bytes.
    Skip(usize),
}

fn try_parse(buf: &[u8]) -> Parsed {
    let Some(&first) = buf.first() else {
        return Parsed::Skip(0);
    };

    match first {
        0x1B => parse_escape(buf),
        0x08 | 0x7F => key(KeyCode::Backspace, Modifiers::empty(), 1),
        0x09 => key(KeyCode::Tab, Modifiers::empty(), 1),
        0x0A | 0x0D => key(KeyCode::Enter, Modifiers::empty(), 1),
        0x00 => key(KeyCode::Char('@'), Modifiers::CTRL, 1),
        b @ 0x01..=0x1A => key(KeyCode::Char((b + b'a' - 1) as char), Modifiers::CTRL, 1),
        b @ 0x20..=0x7E => key(KeyCode::Char(b as char), Modifiers::empty(), 1),
        0xC0..=0xF7 => parse_utf8(buf),
        _ => Parsed::Skip(1),
    }
}

fn parse_escape(buf: &[u8]) -> Parsed {
    let Some(&second) = buf.get(1) else {
        return Parsed::Incomplete;
    };

    match second {
        b'[' => parse_csi(buf),
        b'O' => parse_ss3(buf),
        // Alt+printable.
        b @ 0x20..=0x7E => key(KeyCode::Char(b as char), Modifiers::ALT, 2),
        // Anything else: the ESC stands alone.
        _ => key(KeyCode::Escape, Modifiers::empty(), 1),
    }
}

fn parse_csi(buf: &[u8]) -> Parsed {
    if buf.len() < 3 {
        return Parsed::Incomplete;
    }
    if buf[2] == b'<' {
        return parse_sgr_mouse(buf);
    }

    // Parameter bytes 0x30..=0x3F, intermediates 0x20..=0x2F, final 0x40..=0x7E.
    let mut end = 2;
    while end < buf.len() {
        let b = buf[end];
        if (0x40..=0x7E).contains(&b) {
            break;
        }
        if !(0x20..=0x3F).contains(&b) {
            return Parsed::Skip(end + 1);
        }
        end += 1;
    }
    if end >= buf.len() {
        return Parsed::Incomplete;
    }

    let params = parse_params(&buf[2..end]);
    let consumed = end + 1;

    if buf[end] == b'~' {
        let modifiers = params.get(1).map_or(Modifiers::empty(), |&p| decode_modifiers(p));
        let code = match params.first().copied().unwrap_or(0) {
            1 | 7 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            15 => KeyCode::F(5),
            17..=21 => KeyCode::F(fkey_from_tilde(params[0])),
            23 => KeyCode::F(11),
            24 => KeyCode::F(12),
            _ => return Parsed::Skip(consumed),
        };
        return key(code, modifiers, consumed);
    }

    let modifiers = params.get(1).map_or(Modifiers::empty(), |&p| decode_modifiers(p));
    let code = match buf[end] {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        b'R' => KeyCode::F(3),
        b'S' => KeyCode::F(4),
        b'Z' => return key(KeyCode::Tab, Modifiers::SHIFT, consumed),
        _ => return Parsed::Skip(consumed),
    };
    key(code, modifiers, consumed)
}

fn parse_ss3(buf: &[u8]) -> Parsed {
    let Some(&b) = buf.get(2) else {
        return Parsed::Incomplete;
    };
    let code = match b {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        b'R' => KeyCode::F(3),
        b'S' => KeyCode::F(4),
        _ => return Parsed::Skip(3),
    };
    key(code, Modifiers::empty(), 3)
}

/// `ESC [ < Cb ; Cx ; Cy M` (press / motion) or `... m` (release).
fn parse_sgr_mouse(buf: &[u8]) -> Parsed {
    let start = 3;
    let mut end = start;
    while end < buf.len() {
        match buf[end] {
            b'M' | b'm' => break,
            b';' | b'0'..=b'9' => end += 1,
            _ => return Parsed::Skip(end + 1),
        }
    }
    if end >= buf.len() {
        return Parsed::Incomplete;
    }

    let params = parse_params(&buf[start..end]);
    let (cb, x, y) = match params.as_slice() {
        [cb, x, y] => (*cb, *x, *y),
        _ => return Parsed::Skip(end + 1),
    };

    let mut modifiers = Modifiers::empty();
    if cb & 4 != 0 {
        modifiers |= Modifiers::SHIFT;
    }
    if cb & 8 != 0 {
        modifiers |= Modifiers::ALT;
    }
    if cb & 16 != 0 {
        modifiers |= Modifiers::CTRL;
    }

    let base = cb & 3;
    let kind = if cb & 64 != 0 {
        if base == 0 {
            MouseEventKind::ScrollUp
        } else {
            MouseEventKind::ScrollDown
        }
    } else if cb & 32 != 0 {
        match base {
            0 => MouseEventKind::Drag(MouseButton::Left),
            1 => MouseEventKind::Drag(MouseButton::Middle),
            2 => MouseEventKind::Drag(MouseButton::Right),
            _ => MouseEventKind::Move,
        }
    } else if buf[end] == b'm' {
        MouseEventKind::Release(decode_mouse_button(base))
    } else {
        MouseEventKind::Press(decode_mouse_button(base))
    };

    Parsed::Event(
        Event::Mouse(MouseEvent {
            kind,
            x,
            y,
            modifiers,
        }),
        end + 1,
    )
}

fn parse_utf8(buf: &[u8]) -> Parsed {
    let expected = match buf[0] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    };
    if buf.len() < expected {
        return Parsed::Incomplete;
    }
    std::str::from_utf8(&buf[..expected])
        .ok()
        .and_then(|s| s.chars().next())
        .map_or(Parsed::Skip(1), |ch| {
            key(KeyCode::Char(ch), Modifiers::empty(), expected)
        })
}

// ─── Helpers ────────────────────────────────────────────────────────────────

const fn key(code: KeyCode, modifiers: Modifiers, consumed: usize) -> Parsed {
    Parsed::Event(Event::Key(KeyEvent { code, modifiers }), consumed)
}

/// Semicolon-separated decimal parameters. Empty fields read as 0.
fn parse_params(raw: &[u8]) -> Vec<u16> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(|&b| b == b';')
        .map(|field| {
            field
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .fold(0u16, |acc, &b| {
                    acc.saturating_mul(10).saturating_add(u16::from(b - b'0'))
                })
        })
        .collect()
}

/// `CSI 17~`..`CSI 21~` are F6..F10.
#[allow(clippy::cast_possible_truncation)]
const fn fkey_from_tilde(param: u16) -> u8 {
    (param - 11) as u8
}

/// xterm modifier parameter: `1 + bitmask`. 0 and 1 mean none.
#[allow(clippy::cast_possible_truncation)]
const fn decode_modifiers(param: u16) -> Modifiers {
    let val = if param > 0 { param - 1 } else { 0 };
    Modifiers::from_bits_truncate(val as u8)
}

const fn decode_mouse_button(base: u16) -> MouseButton {
    match base {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        _ => MouseButton::Right,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(data: &[u8]) -> Vec<Event> {
        Parser::new().advance(data)
    }

    fn parse_one(data: &[u8]) -> Event {
        let events = parse(data);
        assert_eq!(events.len(), 1, "expected one event from {data:?}, got {events:?}");
        events[0]
    }

    fn key_ev(code: KeyCode, modifiers: Modifiers) -> Event {
        Event::Key(KeyEvent { code, modifiers })
    }

    fn mouse(kind: MouseEventKind, x: u16, y: u16, modifiers: Modifiers) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            x,
            y,
            modifiers,
        })
    }

    // ── Plain keys ──────────────────────────────────────────────────────

    #[test]
    fn printable_and_space() {
        assert_eq!(
            parse(b"q "),
            vec![
                key_ev(KeyCode::Char('q'), Modifiers::empty()),
                key_ev(KeyCode::Char(' '), Modifiers::empty()),
            ]
        );
    }

    #[test]
    fn ctrl_c_is_char_with_ctrl() {
        let Event::Key(k) = parse_one(b"\x03") else {
            panic!("expected key");
        };
        assert!(k.is_ctrl('c'));
    }

    #[test]
    fn enter_tab_backspace() {
        assert_eq!(parse_one(b"\r"), key_ev(KeyCode::Enter, Modifiers::empty()));
        assert_eq!(parse_one(b"\t"), key_ev(KeyCode::Tab, Modifiers::empty()));
        assert_eq!(parse_one(b"\x7f"), key_ev(KeyCode::Backspace, Modifiers::empty()));
    }

    #[test]
    fn utf8_character() {
        assert_eq!(
            parse_one("é".as_bytes()),
            key_ev(KeyCode::Char('é'), Modifiers::empty())
        );
    }

    // ── Arrows ──────────────────────────────────────────────────────────

    #[test]
    fn arrows() {
        assert_eq!(parse_one(b"\x1b[A"), key_ev(KeyCode::Up, Modifiers::empty()));
        assert_eq!(parse_one(b"\x1b[B"), key_ev(KeyCode::Down, Modifiers::empty()));
        assert_eq!(parse_one(b"\x1b[C"), key_ev(KeyCode::Right, Modifiers::empty()));
        assert_eq!(parse_one(b"\x1b[D"), key_ev(KeyCode::Left, Modifiers::empty()));
    }

    #[test]
    fn shift_up_carries_modifier() {
        assert_eq!(parse_one(b"\x1b[1;2A"), key_ev(KeyCode::Up, Modifiers::SHIFT));
    }

    #[test]
    fn ctrl_down_carries_modifier() {
        assert_eq!(parse_one(b"\x1b[1;5B"), key_ev(KeyCode::Down, Modifiers::CTRL));
    }

    #[test]
    fn ss3_arrows() {
        assert_eq!(parse_one(b"\x1bOA"), key_ev(KeyCode::Up, Modifiers::empty()));
    }

    #[test]
    fn tilde_keys() {
        assert_eq!(parse_one(b"\x1b[3~"), key_ev(KeyCode::Delete, Modifiers::empty()));
        assert_eq!(parse_one(b"\x1b[17~"), key_ev(KeyCode::F(6), Modifiers::empty()));
        assert_eq!(parse_one(b"\x1b[24;5~"), key_ev(KeyCode::F(12), Modifiers::CTRL));
    }

    // ── Escape ambiguity ────────────────────────────────────────────────

    #[test]
    fn lone_escape_waits_then_flushes() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b").is_empty());
        assert!(p.has_pending());
        assert_eq!(p.flush(), vec![key_ev(KeyCode::Escape, Modifiers::empty())]);
        assert!(!p.has_pending());
    }

    #[test]
    fn split_sequence_completes_on_next_read() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b[1;").is_empty());
        assert_eq!(p.advance(b"2B"), vec![key_ev(KeyCode::Down, Modifiers::SHIFT)]);
    }

    #[test]
    fn alt_char() {
        assert_eq!(parse_one(b"\x1bx"), key_ev(KeyCode::Char('x'), Modifiers::ALT));
    }

    // ── SGR Mouse ───────────────────────────────────────────────────────

    #[test]
    fn mouse_coordinates_stay_one_based() {
        assert_eq!(
            parse_one(b"\x1b[<35;10;20M"),
            mouse(MouseEventKind::Move, 10, 20, Modifiers::empty())
        );
    }

    #[test]
    fn mouse_left_press_and_release() {
        assert_eq!(
            parse(b"\x1b[<0;5;6M\x1b[<0;5;6m"),
            vec![
                mouse(MouseEventKind::Press(MouseButton::Left), 5, 6, Modifiers::empty()),
                mouse(MouseEventKind::Release(MouseButton::Left), 5, 6, Modifiers::empty()),
            ]
        );
    }

    #[test]
    fn mouse_right_release_is_right_click() {
        let Event::Mouse(m) = parse_one(b"\x1b[<2;1;1m") else {
            panic!("expected mouse");
        };
        assert!(m.is_release());
        assert!(m.is_right_click());
    }

    #[test]
    fn mouse_modifiers() {
        assert_eq!(
            parse_one(b"\x1b[<4;3;3m"),
            mouse(MouseEventKind::Release(MouseButton::Left), 3, 3, Modifiers::SHIFT)
        );
        assert_eq!(
            parse_one(b"\x1b[<16;3;3m"),
            mouse(MouseEventKind::Release(MouseButton::Left), 3, 3, Modifiers::CTRL)
        );
        assert_eq!(
            parse_one(b"\x1b[<8;3;3M"),
            mouse(MouseEventKind::Press(MouseButton::Left), 3, 3, Modifiers::ALT)
        );
    }

    #[test]
    fn mouse_drag_and_scroll() {
        assert_eq!(
            parse_one(b"\x1b[<32;7;8M"),
            mouse(MouseEventKind::Drag(MouseButton::Left), 7, 8, Modifiers::empty())
        );
        assert_eq!(
            parse_one(b"\x1b[<65;7;8M"),
            mouse(MouseEventKind::ScrollDown, 7, 8, Modifiers::empty())
        );
    }

    #[test]
    fn mouse_large_coordinates() {
        assert_eq!(
            parse_one(b"\x1b[<35;300;120M"),
            mouse(MouseEventKind::Move, 300, 120, Modifiers::empty())
        );
    }

    #[test]
    fn malformed_mouse_is_skipped() {
        assert!(parse(b"\x1b[<1;2M").is_empty());
    }

    #[test]
    fn keys_and_mouse_interleave() {
        let events = parse(b"a\x1b[<35;2;2Mb");
        assert_eq!(events.len(), 3);
        assert!(matches!(events[1], Event::Mouse(_)));
    }
}
