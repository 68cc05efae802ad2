// SPDX-License-Identifier: MIT
//
// Interaction state and the key-driven state machine.
//
//   → / ←           next / previous mode
//   space           next mode, or next component in RGB mode
//   ↑ / ↓           step ±16 (±1 with any modifier), clamped to 0..=255
//   q, Q, Ctrl-C    quit
//   other keys      printable, Enter, Tab, Backspace: next mode;
//                   any other named key only forces a repaint
//
// Every key marks the frame dirty.

use hue_term::input::{KeyCode, KeyEvent};
use tracing::debug;

use crate::mode::{Component, Mode};

/// Step the explorer starts at (mid lightness).
pub const INITIAL_STEP: u8 = 128;

/// Step change per arrow press.
const COARSE_STEP: i16 = 16;

/// Step change per arrow press with a modifier held.
const FINE_STEP: i16 = 1;

/// What the caller should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Everything the explorer knows besides the hit table and saved colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionState {
    pub mode: Mode,
    /// HSL/OKLCH lightness or the fixed RGB channel value.
    pub step: u8,
    /// Channel held at `step` in RGB mode.
    pub component: Component,
    /// The frame must be regenerated before the next read.
    pub dirty: bool,
    /// Fractional digits for web HSL/OKLCH text (negative: full precision).
    pub rounding: i32,
    /// Pointer position the status row was last computed for.
    pub last_pos: Option<(u16, u16)>,
}

impl InteractionState {
    /// Fresh state: Basic16 mode, initial step, Red component, dirty.
    #[must_use]
    pub const fn new(rounding: i32) -> Self {
        Self {
            mode: Mode::Basic16,
            step: INITIAL_STEP,
            component: Component::Red,
            dirty: true,
            rounding,
            last_pos: None,
        }
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        self.dirty = true;

        if key.is_ctrl('c') {
            return KeyOutcome::Quit;
        }

        match key.code {
            KeyCode::Char('q' | 'Q') if key.modifiers.is_empty() => return KeyOutcome::Quit,
            KeyCode::Right => self.next_mode(),
            KeyCode::Left => self.prev_mode(),
            KeyCode::Up => self.adjust_step(key, 1),
            KeyCode::Down => self.adjust_step(key, -1),
            KeyCode::Char(' ') if self.mode == Mode::Rgb => {
                self.component = self.component.next();
                debug!(component = %self.component, "component changed");
            }
            KeyCode::Char(_) | KeyCode::Enter | KeyCode::Tab | KeyCode::Backspace => {
                self.next_mode();
            }
            _ => {}
        }
        KeyOutcome::Continue
    }

    /// The terminal size changed: repaint without touching anything else.
    pub const fn on_resize(&mut self) {
        self.dirty = true;
    }

    pub fn next_mode(&mut self) {
        self.mode = self.mode.next();
        self.dirty = true;
        debug!(mode = %self.mode, "mode changed");
    }

    pub fn prev_mode(&mut self) {
        self.mode = self.mode.prev();
        self.dirty = true;
        debug!(mode = %self.mode, "mode changed");
    }

    fn adjust_step(&mut self, key: KeyEvent, direction: i16) {
        let delta = if key.modifiers.is_empty() {
            COARSE_STEP
        } else {
            FINE_STEP
        };
        let step = (i16::from(self.step) + direction * delta).clamp(0, 255);
        self.step = u8::try_from(step).unwrap_or(u8::MAX);
        debug!(step = self.step, "step changed");
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
