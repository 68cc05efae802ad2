// SPDX-License-Identifier: MIT
//
// Logging setup.
//
// `tracing` events go to stderr through a fmt subscriber filtered by
// `RUST_LOG` (default `info`). While the terminal is in raw mode a bare `\n`
// no longer returns the carriage, so the writer expands it to `\r\n`.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "info";

static RAW_MODE: AtomicBool = AtomicBool::new(false);

/// Install the global subscriber. A second call is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(|| CrlfWriter::new(io::stderr(), raw_mode()))
        .without_time()
        .with_target(false)
        .try_init();
    if let Err(err) = installed {
        debug!(%err, "log subscriber already installed");
    }
}

/// Tell log output whether the terminal is currently raw.
pub fn set_raw_mode(raw: bool) {
    RAW_MODE.store(raw, Ordering::Relaxed);
}

#[must_use]
pub fn raw_mode() -> bool {
    RAW_MODE.load(Ordering::Relaxed)
}

/// Writer that expands `\n` to `\r\n` when `raw`.
pub struct CrlfWriter<W> {
    inner: W,
    raw: bool,
}

impl<W: Write> CrlfWriter<W> {
    pub const fn new(inner: W, raw: bool) -> Self {
        Self { inner, raw }
    }
}

impl<W: Write> Write for CrlfWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.raw {
            return self.inner.write(buf);
        }
        let mut start = 0;
        for (i, &b) in buf.iter().enumerate() {
            if b == b'\n' && (i == 0 || buf[i - 1] != b'\r') {
                self.inner.write_all(&buf[start..i])?;
                self.inner.write_all(b"\r\n")?;
                start = i + 1;
            }
        }
        self.inner.write_all(&buf[start..])?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
