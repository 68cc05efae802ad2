// SPDX-License-Identifier: MIT
//
// Event loop — wires terminal, input source, parser and surface to an app.
//
// One thread, one loop:
//
//   1. If the app reports itself dirty, repaint the whole frame inside a
//      synchronized-output bracket.
//   2. Flush whatever the surface holds (a repaint, or incremental status
//      and cursor writes made while handling the previous event).
//   3. Block in the input source until bytes, a resize, a signal, or the
//      frame timeout arrives, and dispatch it.
//
// The frame timeout doubles as the escape-sequence timeout: a lone ESC held
// by the parser is released as the Escape key when a wait comes back empty.

use std::io;
use std::time::Duration;

use crate::input::{Event, Parser};
use crate::reader::{Input, InputSource};
use crate::surface::Surface;
use crate::terminal::{Size, Terminal};

// ─── App Trait ───────────────────────────────────────────────────────────────

/// What the application tells the event loop after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep running.
    Continue,
    /// Leave the loop and restore the terminal.
    Quit,
}

/// Application interface for the event loop.
///
/// Events may write incremental output straight into the surface (status
/// line updates, cursor echo, clipboard writes). Whole-frame repaints go
/// through [`paint`](App::paint), which the loop calls whenever
/// [`is_dirty`](App::is_dirty) is true.
pub trait App {
    /// Handle one parsed input event.
    fn on_event(&mut self, event: &Event, surface: &mut Surface) -> Action;

    /// The terminal was resized. The surface already has the new size.
    fn on_resize(&mut self, _size: Size) {}

    /// Whether the next iteration must repaint the full frame.
    fn is_dirty(&self) -> bool;

    /// Repaint everything. The screen has been cleared; the app must clear
    /// its dirty state here.
    fn paint(&mut self, surface: &mut Surface);
}

// ─── Loop Config ─────────────────────────────────────────────────────────────

/// Frame rate used when none is configured.
pub const DEFAULT_FPS: u32 = 60;

/// Event loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// Target frames per second; bounds how long one input wait blocks.
    pub fps: u32,
}

impl LoopConfig {
    /// Config for `fps` frames per second. Zero is treated as one.
    #[must_use]
    pub const fn with_fps(fps: u32) -> Self {
        Self { fps }
    }

    /// How long a single input wait may block.
    #[must_use]
    pub fn frame_timeout(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self::with_fps(DEFAULT_FPS)
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// The terminal event loop.
///
/// Owns the terminal, the parser and the surface. [`run`](Self::run)
/// returns when the app quits, an interrupt arrives, or input fails; the
/// terminal is restored in every case.
pub struct EventLoop {
    terminal: Terminal,
    parser: Parser,
    surface: Surface,
    config: LoopConfig,
}

impl EventLoop {
    /// Create a loop for the current terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn new(config: LoopConfig) -> io::Result<Self> {
        let terminal = Terminal::new()?;
        let surface = Surface::new(terminal.size());
        Ok(Self {
            terminal,
            parser: Parser::new(),
            surface,
            config,
        })
    }

    /// The current terminal size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.terminal.size()
    }

    /// Enter explorer mode, run until quit, then restore the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if entering or leaving the terminal mode fails, or
    /// if reading input or writing output fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        self.terminal.enter()?;
        let size = self.terminal.refresh_size();
        self.surface.resize(size);
        app.on_resize(size);

        let mut input = InputSource::new(self.config.frame_timeout());
        let result = self.run_inner(app, &mut input);

        // Restore even when the loop failed; report the loop error first.
        let left = self.terminal.leave();
        result.and(left)
    }

    fn run_inner(&mut self, app: &mut impl App, input: &mut InputSource) -> io::Result<()> {
        loop {
            render(&mut self.surface, app);
            self.surface.flush_stdout()?;

            let next = input.next()?;
            let terminal = &mut self.terminal;
            let action = dispatch(&mut self.parser, &mut self.surface, app, next, || {
                terminal.refresh_size()
            });
            if action == Action::Quit {
                // Anything written while handling the quit event still goes out.
                return self.surface.flush_stdout();
            }
        }
    }
}

/// Repaint the full frame if the app asks for it.
pub fn render(surface: &mut Surface, app: &mut impl App) {
    if !app.is_dirty() {
        return;
    }
    surface.begin_frame();
    surface.clear_screen();
    app.paint(surface);
    surface.end_frame();
}

/// Route one input to the app.
///
/// `refresh_size` is called on resize to learn the new terminal size.
pub fn dispatch(
    parser: &mut Parser,
    surface: &mut Surface,
    app: &mut impl App,
    input: Input,
    refresh_size: impl FnOnce() -> Size,
) -> Action {
    let events = match input {
        Input::Bytes(bytes) => parser.advance(&bytes),
        Input::Timeout if parser.has_pending() => parser.flush(),
        Input::Timeout => Vec::new(),
        Input::Resize => {
            let size = refresh_size();
            surface.resize(size);
            app.on_resize(size);
            Vec::new()
        }
        Input::Interrupt => return Action::Quit,
    };

    for event in &events {
        if app.on_event(event, surface) == Action::Quit {
            return Action::Quit;
        }
    }
    Action::Continue
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyCode, KeyEvent};
    use pretty_assertions::assert_eq;

    /// Records what the loop hands it.
    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
        sizes: Vec<Size>,
        dirty: bool,
        paints: usize,
    }

    impl App for Recorder {
        fn on_event(&mut self, event: &Event, surface: &mut Surface) -> Action {
            self.events.push(*event);
            surface.write_str("e");
            match event {
                Event::Key(KeyEvent {
                    code: KeyCode::Char('q'),
                    ..
                }) => Action::Quit,
                _ => {
                    self.dirty = true;
                    Action::Continue
                }
            }
        }

        fn on_resize(&mut self, size: Size) {
            self.sizes.push(size);
            self.dirty = true;
        }

        fn is_dirty(&self) -> bool {
            self.dirty
        }

        fn paint(&mut self, surface: &mut Surface) {
            self.paints += 1;
            self.dirty = false;
            surface.write_str("frame");
        }
    }

    fn parts() -> (Parser, Surface, Recorder) {
        (
            Parser::new(),
            Surface::new(Size { cols: 80, rows: 24 }),
            Recorder::default(),
        )
    }

    fn no_resize() -> Size {
        unreachable!("size queried without a resize")
    }

    // ── LoopConfig ──────────────────────────────────────────────────

    #[test]
    fn default_is_sixty_fps() {
        let config = LoopConfig::default();
        assert_eq!(config.fps, 60);
        assert_eq!(config.frame_timeout(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn zero_fps_does_not_divide_by_zero() {
        assert_eq!(LoopConfig::with_fps(0).frame_timeout(), Duration::from_secs(1));
    }

    // ── Dispatch ────────────────────────────────────────────────────

    #[test]
    fn bytes_become_events() {
        let (mut parser, mut surface, mut app) = parts();
        let action = dispatch(
            &mut parser,
            &mut surface,
            &mut app,
            Input::Bytes(b"ab".to_vec()),
            no_resize,
        );
        assert_eq!(action, Action::Continue);
        assert_eq!(app.events.len(), 2);
        assert_eq!(surface.as_bytes(), b"ee");
    }

    #[test]
    fn quit_stops_remaining_events() {
        let (mut parser, mut surface, mut app) = parts();
        let action = dispatch(
            &mut parser,
            &mut surface,
            &mut app,
            Input::Bytes(b"qx".to_vec()),
            no_resize,
        );
        assert_eq!(action, Action::Quit);
        assert_eq!(app.events.len(), 1);
    }

    #[test]
    fn interrupt_quits_without_events() {
        let (mut parser, mut surface, mut app) = parts();
        let action = dispatch(&mut parser, &mut surface, &mut app, Input::Interrupt, no_resize);
        assert_eq!(action, Action::Quit);
        assert!(app.events.is_empty());
    }

    #[test]
    fn timeout_releases_lone_escape() {
        let (mut parser, mut surface, mut app) = parts();
        dispatch(
            &mut parser,
            &mut surface,
            &mut app,
            Input::Bytes(vec![0x1b]),
            no_resize,
        );
        assert!(app.events.is_empty());

        dispatch(&mut parser, &mut surface, &mut app, Input::Timeout, no_resize);
        assert_eq!(
            app.events,
            vec![Event::Key(KeyEvent::plain(KeyCode::Escape))]
        );
    }

    #[test]
    fn idle_timeout_does_nothing() {
        let (mut parser, mut surface, mut app) = parts();
        let action = dispatch(&mut parser, &mut surface, &mut app, Input::Timeout, no_resize);
        assert_eq!(action, Action::Continue);
        assert!(app.events.is_empty());
        assert!(!app.dirty);
    }

    #[test]
    fn resize_updates_surface_and_app() {
        let (mut parser, mut surface, mut app) = parts();
        let new = Size { cols: 120, rows: 40 };
        dispatch(&mut parser, &mut surface, &mut app, Input::Resize, || new);
        assert_eq!(surface.size(), new);
        assert_eq!(app.sizes, vec![new]);
        assert!(app.is_dirty());
    }

    // ── Render ──────────────────────────────────────────────────────

    #[test]
    fn render_skips_clean_frames() {
        let (_, mut surface, mut app) = parts();
        render(&mut surface, &mut app);
        assert!(surface.is_empty());
        assert_eq!(app.paints, 0);
    }

    #[test]
    fn render_brackets_dirty_frame() {
        let (_, mut surface, mut app) = parts();
        app.dirty = true;
        render(&mut surface, &mut app);

        let out = String::from_utf8(surface.as_bytes().to_vec()).unwrap();
        assert!(out.starts_with("\x1b[?2026h"));
        assert!(out.contains("\x1b[2J"));
        assert!(out.contains("frame"));
        assert!(out.ends_with("\x1b[?2026l"));
        assert_eq!(app.paints, 1);
        assert!(!app.is_dirty());
    }
}
