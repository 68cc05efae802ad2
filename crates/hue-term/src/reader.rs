// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Input source — one blocking wait for "next input, resize, or signal".
//
// Everything runs on the caller's thread. `InputSource::next` blocks in
// `poll(2)` on stdin until bytes arrive, the timeout expires, or a signal
// interrupts the wait. Signal handlers only flip atomics (the one thing a
// handler may safely do); the wait loop turns those flags into
// `Input::Resize` or `Input::Interrupt`.
//
// The timeout exists for the ESC ambiguity: a lone ESC byte is held by the
// parser until a wait comes back empty, at which point it is a real Escape.

use std::io;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Bytes read per `read()` call. A key is 1–6 bytes, a mouse report ~12,
/// and a fast mouse sweep can queue a few hundred.
const READ_BUF_SIZE: usize = 4096;

/// Set by the SIGWINCH handler.
static RESIZE_PENDING: AtomicBool = AtomicBool::new(false);

/// Set by the SIGINT / SIGTERM handler.
static INTERRUPT_PENDING: AtomicBool = AtomicBool::new(false);

static HANDLERS_INSTALLED: Once = Once::new();

/// What a single wait produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Raw bytes from the terminal.
    Bytes(Vec<u8>),
    /// The terminal was resized.
    Resize,
    /// SIGINT or SIGTERM was received.
    Interrupt,
    /// Nothing arrived within the timeout.
    Timeout,
}

/// Single-threaded blocking reader over stdin.
#[derive(Debug)]
pub struct InputSource {
    timeout: Duration,
    buf: Box<[u8; READ_BUF_SIZE]>,
}

impl InputSource {
    /// Create a source whose waits give up after `timeout`, installing the
    /// resize and interrupt handlers (once per process).
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        install_signal_handlers();
        Self {
            timeout,
            buf: Box::new([0; READ_BUF_SIZE]),
        }
    }

    /// The configured wait timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Block for the next input, resize, or signal.
    ///
    /// Pending signals are reported before any bytes, interrupt first.
    ///
    /// # Errors
    ///
    /// Returns an error if `poll` or `read` fails, or `UnexpectedEof` when
    /// stdin is closed.
    pub fn next(&mut self) -> io::Result<Input> {
        loop {
            if let Some(signal) = take_pending_signal() {
                return Ok(signal);
            }
            match self.wait_readable()? {
                Readiness::Ready => return self.read_chunk(),
                Readiness::TimedOut => return Ok(Input::Timeout),
                // Interrupted by a signal: report it on the next pass.
                Readiness::Interrupted => {}
            }
        }
    }

    #[cfg(unix)]
    fn wait_readable(&self) -> io::Result<Readiness> {
        let millis = i32::try_from(self.timeout.as_millis()).unwrap_or(i32::MAX);
        let mut pfd = libc::pollfd {
            fd: libc::STDIN_FILENO,
            events: libc::POLLIN,
            revents: 0,
        };
        let ready = unsafe { libc::poll(&raw mut pfd, 1, millis) };

        match ready {
            0 => Ok(Readiness::TimedOut),
            n if n > 0 => Ok(Readiness::Ready),
            _ => {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    Ok(Readiness::Interrupted)
                } else {
                    Err(err)
                }
            }
        }
    }

    #[cfg(not(unix))]
    fn wait_readable(&self) -> io::Result<Readiness> {
        Ok(Readiness::Ready)
    }

    #[cfg(unix)]
    fn read_chunk(&mut self) -> io::Result<Input> {
        let n = unsafe {
            libc::read(
                libc::STDIN_FILENO,
                self.buf.as_mut_ptr().cast(),
                self.buf.len(),
            )
        };
        match n {
            0 => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "terminal input closed",
            )),
            n if n > 0 => {
                #[allow(clippy::cast_sign_loss)] // n > 0 checked above.
                let chunk = self.buf[..n as usize].to_vec();
                Ok(Input::Bytes(chunk))
            }
            _ => {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    Ok(take_pending_signal().unwrap_or(Input::Timeout))
                } else {
                    Err(err)
                }
            }
        }
    }

    #[cfg(not(unix))]
    fn read_chunk(&mut self) -> io::Result<Input> {
        use std::io::Read;

        match io::stdin().lock().read(&mut self.buf[..])? {
            0 => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "terminal input closed",
            )),
            n => Ok(Input::Bytes(self.buf[..n].to_vec())),
        }
    }
}

enum Readiness {
    Ready,
    TimedOut,
    Interrupted,
}

fn take_pending_signal() -> Option<Input> {
    if INTERRUPT_PENDING.swap(false, Ordering::Relaxed) {
        return Some(Input::Interrupt);
    }
    if RESIZE_PENDING.swap(false, Ordering::Relaxed) {
        return Some(Input::Resize);
    }
    None
}

// ─── Signal Handlers ────────────────────────────────────────────────────────

/// Install SIGWINCH, SIGINT and SIGTERM handlers, once per process.
///
/// No `SA_RESTART`: the blocked `poll` must return `EINTR` so the wait loop
/// notices the flag immediately.
#[cfg(unix)]
fn install_signal_handlers() {
    HANDLERS_INSTALLED.call_once(|| unsafe {
        install(libc::SIGWINCH, on_resize as *const () as usize);
        install(libc::SIGINT, on_interrupt as *const () as usize);
        install(libc::SIGTERM, on_interrupt as *const () as usize);
    });
}

#[cfg(unix)]
unsafe fn install(signal: libc::c_int, handler: usize) {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = handler;
        sa.sa_flags = 0;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(signal, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn on_resize(_sig: libc::c_int) {
    RESIZE_PENDING.store(true, Ordering::Relaxed);
}

#[cfg(unix)]
extern "C" fn on_interrupt(_sig: libc::c_int) {
    INTERRUPT_PENDING.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
fn install_signal_handlers() {
    HANDLERS_INSTALLED.call_once(|| {});
}

// ─── Tests ───────────────────────────────────────────────────────────────────
