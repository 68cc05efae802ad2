// SPDX-License-Identifier: MIT
//
// hue — explore terminal colors interactively, or decode them in batch.
//
// This is the main binary that wires together the crates:
//
//   hue-term  → terminal control, surface output, input parsing, event loop
//   hue-color → color model, conversions, string decoding, web formatting
//
// The Explorer implements hue-term's App trait. Each event flows through:
//
//   stdin → parser → on_event → state machine / pointer status
//   paint → hit table → surface → terminal
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ title · hover status         │  ← row 1
//   ├──────────────────────────────┤
//   │ color grid (per mode)        │  ← rows 2 ..= h-1
//   ├──────────────────────────────┤
//   │ legend                       │  ← row h
//   └──────────────────────────────┘

mod cli;
mod decode;
mod explorer;
mod grid;
mod hits;
mod logging;
mod mode;
mod state;

use std::env;
use std::io::{self, Write};
use std::process;

use tracing::{debug, error, info};

use cli::{Command, Config};
use explorer::SavedColorSet;

/// Exit status for a bad command line.
const EXIT_USAGE: i32 = 2;

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    logging::init();

    let colorterm = env::var("COLORTERM").ok();
    let config = match cli::parse(env::args().skip(1), colorterm.as_deref()) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            println!("{}", cli::USAGE);
            return 0;
        }
        Ok(Command::Version) => {
            println!("hue {}", env!("CARGO_PKG_VERSION"));
            return 0;
        }
        Err(e) => {
            eprintln!("hue: {e}");
            return EXIT_USAGE;
        }
    };

    if config.true_color {
        info!("Using 24 bits true color");
    } else {
        info!("Using 256 colors");
    }

    if config.is_interactive() {
        interactive(&config)
    } else {
        batch(&config)
    }
}

fn interactive(config: &Config) -> i32 {
    let saved = match explorer::run(config) {
        Ok(saved) => saved,
        Err(e) => {
            error!("{e:#}");
            return 1;
        }
    };

    if saved.is_empty() {
        info!("Exiting, no colors saved.");
        return 0;
    }
    if let Err(e) = print_saved(&saved, &mut io::stdout().lock()) {
        error!("writing saved colors: {e}");
        return 1;
    }
    0
}

fn batch(config: &Config) -> i32 {
    let mut stdout = io::stdout().lock();
    match decode::run(&config.colors, config.rounding, config.true_color, &mut stdout) {
        Ok(summary) => {
            debug!(decoded = summary.decoded, failed = summary.failed, "batch done");
            0
        }
        Err(e) => {
            error!("writing decoded colors: {e}");
            1
        }
    }
}

/// The saved colors, one per line, in the order they were saved.
fn print_saved(saved: &SavedColorSet, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Exiting. Saved colors:")?;
    for entry in saved.iter() {
        writeln!(out, "  {entry}")?;
    }
    out.flush()
}

// ─── Tests ──────────────────────────────────────────────────────────────────
