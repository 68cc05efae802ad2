// SPDX-License-Identifier: MIT
//
// hue-term — Terminal surface for the hue color explorer.
//
// Everything the explorer needs from a terminal and nothing more: raw mode
// with guaranteed restore, ANSI escape writers, a frame-sized output buffer
// with positioned writes, an input parser that understands modified arrow
// keys and SGR mouse reports, a single-threaded poll-based input source, and
// the event loop that ties them to an application.
//
// The terminal is driven directly through escape sequences and termios,
// with no TUI framework in between.

pub mod ansi;
pub mod color;
pub mod event_loop;
pub mod input;
pub mod reader;
pub mod surface;
pub mod terminal;
