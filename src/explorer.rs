// SPDX-License-Identifier: MIT
//
// Explorer — the interactive session.
//
// Implements hue-term's `App`: keys go to the state machine, pointer reports
// go to the status row and the saved-color collector, and a dirty frame is
// regenerated from the hit table.
//
// Status row (row 1), right-aligned next to the mode title:
//
//   [Copied ]<swatch>   x,y   <label> (<canonical>) <hsl> <oklch>
//
// A click (button release) also copies one form of the color to the
// clipboard and records the description in the saved set:
//
//   plain click        canonical (`Red`, `#rrggbb`)
//   right click        hsl(…)
//   any modifier       oklch(…)

use std::collections::HashSet;

use anyhow::{Context, Result};
use hue_color::{Color, web_hsl, web_oklch};
use hue_term::ansi::RESET;
use hue_term::event_loop::{Action, App, EventLoop, LoopConfig};
use hue_term::input::{Event, MouseEvent};
use hue_term::surface::Surface;
use hue_term::terminal::Size;
use tracing::debug;

use crate::cli::Config;
use crate::grid::{Params, strategy};
use crate::hits::HitTable;
use crate::logging;
use crate::state::{InteractionState, KeyOutcome};

// ─── Saved Colors ────────────────────────────────────────────────────────────

/// Insertion-ordered set of saved color descriptions.
#[derive(Debug, Default, Clone)]
pub struct SavedColorSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl SavedColorSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `entry` unless already present. Returns whether it was new.
    pub fn insert(&mut self, entry: String) -> bool {
        if self.seen.contains(&entry) {
            return false;
        }
        self.seen.insert(entry.clone());
        self.order.push(entry);
        true
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in the order they were first saved.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

// ─── Clipboard Format ────────────────────────────────────────────────────────

/// Which text a click copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CopyFormat {
    Canonical,
    WebHsl,
    WebOklch,
}

impl CopyFormat {
    /// Format for a click, or `None` when the report is not a click.
    fn for_click(mouse: &MouseEvent) -> Option<Self> {
        if !mouse.is_release() {
            None
        } else if mouse.is_right_click() {
            Some(Self::WebHsl)
        } else if !mouse.modifiers.is_empty() {
            Some(Self::WebOklch)
        } else {
            Some(Self::Canonical)
        }
    }
}

/// The text forms of one color shown on the status row.
struct Description {
    label: String,
    canonical: String,
    hsl: String,
    oklch: String,
}

impl Description {
    fn new(color: &Color, rounding: i32) -> Self {
        Self {
            label: color.label(),
            canonical: color.canonical(),
            hsl: web_hsl(color, rounding),
            oklch: web_oklch(color, rounding),
        }
    }

    /// Everything after the label. The canonical form is skipped when it
    /// would just repeat the label.
    fn extra(&self) -> String {
        let mut extra = String::new();
        if self.canonical != self.label {
            extra.push_str(&format!(" ({})", self.canonical));
        }
        extra.push(' ');
        extra.push_str(&self.hsl);
        extra.push(' ');
        extra.push_str(&self.oklch);
        extra
    }

    fn payload(self, format: CopyFormat) -> String {
        match format {
            CopyFormat::Canonical => self.canonical,
            CopyFormat::WebHsl => self.hsl,
            CopyFormat::WebOklch => self.oklch,
        }
    }
}

// ─── Explorer ────────────────────────────────────────────────────────────────

/// The interactive explorer session.
pub struct Explorer {
    state: InteractionState,
    table: HitTable,
    saved: SavedColorSet,
    true_color: bool,
    /// Latest pointer position, re-shown after a repaint.
    pointer: Option<(u16, u16)>,
}

impl Explorer {
    #[must_use]
    pub fn new(rounding: i32, true_color: bool) -> Self {
        Self {
            state: InteractionState::new(rounding),
            table: HitTable::new(),
            saved: SavedColorSet::new(),
            true_color,
            pointer: None,
        }
    }

    /// End the session, keeping the saved colors.
    #[must_use]
    pub fn into_saved(self) -> SavedColorSet {
        self.saved
    }

    const fn params(&self) -> Params {
        Params {
            mode: self.state.mode,
            step: self.state.step,
            component: self.state.component,
        }
    }

    fn on_pointer(&mut self, surface: &mut Surface, mouse: &MouseEvent) {
        let pos = (mouse.x, mouse.y);
        let copy = CopyFormat::for_click(mouse);
        let moved = self.state.last_pos != Some(pos);
        self.pointer = Some(pos);
        self.state.last_pos = Some(pos);

        if moved || copy.is_some() {
            self.show_status(surface, pos, copy);
        }
        surface.move_cursor(pos.0, pos.1);
    }

    /// Rewrite the status row for the color at `pos`, copying and saving it
    /// when `copy` is set. Cells without a color leave the row alone.
    fn show_status(&mut self, surface: &mut Surface, (x, y): (u16, u16), copy: Option<CopyFormat>) {
        let Some(color) = self.table.get(x, y) else {
            return;
        };
        let swatch = color.swatch(self.true_color);
        let desc = Description::new(color, self.state.rounding);
        let extra = desc.extra();
        let copied = if copy.is_some() { "Copied " } else { "" };

        surface.write_at(1, 1, strategy(self.state.mode).title);
        surface.clear_to_eol();
        surface.write_right(
            1,
            &format!("{copied}{swatch}   {x},{y}   {RESET} {}{extra}", desc.label),
        );

        if let Some(format) = copy {
            let entry = format!("{swatch}    {RESET} : {}{extra}", desc.label);
            let payload = desc.payload(format);
            debug!(%payload, ?format, "copied to clipboard");
            surface.copy_to_clipboard(&payload);
            self.saved.insert(entry);
        }
    }
}

impl App for Explorer {
    fn on_event(&mut self, event: &Event, surface: &mut Surface) -> Action {
        match event {
            Event::Key(key) => match self.state.handle_key(*key) {
                KeyOutcome::Quit => Action::Quit,
                KeyOutcome::Continue => Action::Continue,
            },
            Event::Mouse(mouse) => {
                self.on_pointer(surface, mouse);
                Action::Continue
            }
        }
    }

    fn on_resize(&mut self, size: Size) {
        debug!(cols = size.cols, rows = size.rows, "resized");
        self.state.on_resize();
    }

    fn is_dirty(&self) -> bool {
        self.state.dirty
    }

    fn paint(&mut self, surface: &mut Surface) {
        let size = surface.size();
        let strategy = strategy(self.state.mode);
        let params = self.params();
        if self.table.ensure(strategy, params, size) {
            debug!(mode = %params.mode, step = params.step, "hit table rebuilt");
        }

        surface.write_at(1, 1, strategy.title);
        for label in (strategy.labels)(size) {
            if label.row < size.rows {
                surface.write_at(label.col, label.row, &label.text);
            }
        }
        self.table.paint(surface, self.true_color);
        if size.rows > 1 {
            surface.write_at(1, size.rows, &(strategy.legend)(&params));
        }

        self.state.dirty = false;
        self.state.last_pos = None;
        if let Some((x, y)) = self.pointer {
            self.state.last_pos = Some((x, y));
            self.show_status(surface, (x, y), None);
            surface.move_cursor(x, y);
        }
    }
}

/// Run the explorer until the user quits; returns what they saved.
///
/// # Errors
///
/// Fails if the terminal cannot be opened or reading it fails.
pub fn run(config: &Config) -> Result<SavedColorSet> {
    let mut event_loop = EventLoop::new(LoopConfig::with_fps(config.fps))
        .context("Error opening terminal")?;
    let mut explorer = Explorer::new(config.rounding, config.true_color);

    logging::set_raw_mode(true);
    let result = event_loop.run(&mut explorer);
    logging::set_raw_mode(false);

    result.context("Error reading terminal")?;
    Ok(explorer.into_saved())
}

// ─── Tests ──────────────────────────────────────────────────────────────────
