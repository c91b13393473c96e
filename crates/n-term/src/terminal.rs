// SPDX-License-Identifier: MIT
//
// Terminal control — raw mode, width queries, and RAII cleanup.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr), ioctl (TIOCGWINSZ), and isatty. These are the standard POSIX
// interfaces for terminal control — there is no safe alternative. Each
// unsafe block is minimal.
#![allow(unsafe_code)]
//
// The line editor consumes the terminal through one small capability,
// [`TermDriver`]: enter raw mode, restore the original mode, report the
// width in columns. [`Tty`] is the real implementation over a file
// descriptor; [`Headless`] is a fixed-width stand-in for hosts without a
// terminal (tests, embedding in a pty-less harness).
//
// Raw mode is a scoped resource. [`RawMode`] acquires it and releases it on
// drop, including during unwinding. A panic hook additionally restores the
// saved termios before the panic message prints, so a panic with
// `panic = "abort"` doesn't leave the user's shell without echo either.

use std::cell::Cell;
use std::io;
#[cfg(unix)]
use std::os::unix::io::RawFd;
use std::rc::Rc;
#[cfg(unix)]
use std::sync::Mutex;
use std::sync::Once;

/// Width reported when the terminal answers with zero columns.
pub const FALLBACK_COLS: u16 = 80;

// ─── Driver capability ──────────────────────────────────────────────────────

/// What the line editor needs from a terminal.
///
/// Implementations must make [`restore`](Self::restore) safe to call when
/// raw mode is not active (it is then a no-op).
pub trait TermDriver {
    /// Switch the terminal to raw mode: byte-at-a-time input, no echo, no
    /// signal generation for Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the terminal attributes cannot be changed.
    fn enable_raw(&mut self) -> io::Result<()>;

    /// Restore the mode saved by [`enable_raw`](Self::enable_raw).
    ///
    /// # Errors
    ///
    /// Returns the OS error if the terminal attributes cannot be restored.
    fn restore(&mut self) -> io::Result<()>;

    /// Current width in character cells.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the size query fails.
    fn width(&mut self) -> io::Result<u16>;
}

// ─── Capability detection ───────────────────────────────────────────────────

/// Whether a `TERM` value names a terminal that understands the ANSI
/// sequences the editor emits.
///
/// Unset, empty, `dumb` and `cons25` are rejected.
#[must_use]
pub fn term_supports_ansi(term: Option<&str>) -> bool {
    matches!(term, Some(t) if !t.is_empty() && t != "dumb" && t != "cons25")
}

/// Whether line editing can run given which standard streams are terminals
/// and the value of `TERM`.
///
/// Editing reads keys from stdin and draws on stdout, so both must be
/// terminals.
#[must_use]
pub fn stdio_supports_editing(stdin_tty: bool, stdout_tty: bool, term: Option<&str>) -> bool {
    stdin_tty && stdout_tty && term_supports_ansi(term)
}

/// Check whether `fd` is connected to a terminal.
#[cfg(unix)]
#[must_use]
pub fn is_tty(fd: RawFd) -> bool {
    unsafe { libc::isatty(fd) != 0 }
}

/// Query the column count of the terminal on `fd` via `ioctl(TIOCGWINSZ)`.
///
/// # Errors
///
/// Returns the OS error if `fd` is not a terminal or the query fails.
#[cfg(unix)]
pub fn query_width(fd: RawFd) -> io::Result<u16> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &raw mut ws) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(ws.ws_col)
}

// ─── Panic-Safe Terminal Restore ────────────────────────────────────────────

/// Global backup of the original termios for panic recovery.
///
/// [`Tty`] owns its own copy, but the panic hook can't reach it. This
/// backup — behind a [`Mutex`], not `static mut` — lets the hook restore
/// cooked mode without the struct.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<(RawFd, libc::termios)>> = Mutex::new(None);

/// Restore termios from the global backup. Best-effort, ignores errors.
#[cfg(unix)]
fn restore_termios_from_backup() {
    if let Ok(guard) = TERMIOS_BACKUP.lock() {
        if let Some((fd, ref original)) = *guard {
            unsafe {
                let _ = libc::tcsetattr(fd, libc::TCSANOW, original);
            }
        }
    }
}

/// Panic hook guard — ensures the hook is installed at most once per process.
static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the terminal before printing the error.
///
/// Without this, a panic in raw mode leaves the user's terminal broken:
/// no echo, no line editing, no way to read the error message.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            #[cfg(unix)]
            restore_termios_from_backup();

            original(info);
        }));
    });
}

// ─── Tty ────────────────────────────────────────────────────────────────────

/// A real terminal on a file descriptor.
///
/// Restores the original mode on drop if raw mode is still active.
pub struct Tty {
    #[cfg(unix)]
    fd: RawFd,

    /// Original termios saved before entering raw mode.
    #[cfg(unix)]
    original_termios: Option<libc::termios>,
}

impl Tty {
    /// Wrap a terminal file descriptor. The descriptor is not owned.
    #[cfg(unix)]
    #[must_use]
    pub const fn from_fd(fd: RawFd) -> Self {
        Self {
            fd,
            original_termios: None,
        }
    }

    /// The terminal on stdin, if both stdin and stdout are an ANSI-capable
    /// terminal.
    ///
    /// Returns `None` when either end is a pipe or a file, or `TERM` names a
    /// dumb terminal (see [`stdio_supports_editing`]). Callers then fall
    /// back to plain line reading, so redirected output never receives
    /// escape sequences.
    #[cfg(unix)]
    #[must_use]
    pub fn stdio() -> Option<Self> {
        let term = std::env::var("TERM").ok();
        let input = is_tty(libc::STDIN_FILENO);
        let output = is_tty(libc::STDOUT_FILENO);
        log::debug!("stdio: stdin tty={input} stdout tty={output} TERM={term:?}");
        stdio_supports_editing(input, output, term.as_deref())
            .then(|| Self::from_fd(libc::STDIN_FILENO))
    }

    #[cfg(not(unix))]
    #[must_use]
    pub fn stdio() -> Option<Self> {
        None
    }

    /// Whether raw mode is currently active.
    #[inline]
    #[must_use]
    #[cfg(unix)]
    pub const fn is_raw(&self) -> bool {
        self.original_termios.is_some()
    }

    #[inline]
    #[must_use]
    #[cfg(not(unix))]
    pub const fn is_raw(&self) -> bool {
        false
    }
}

#[cfg(unix)]
impl TermDriver for Tty {
    fn enable_raw(&mut self) -> io::Result<()> {
        if self.original_termios.is_some() {
            return Ok(());
        }

        install_panic_hook();

        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(self.fd, &raw mut termios) != 0 {
                return Err(io::Error::last_os_error());
            }

            self.original_termios = Some(termios);
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = Some((self.fd, termios));
            }

            // cfmakeraw equivalent: disable all line processing.
            termios.c_iflag &= !(libc::IGNBRK
                | libc::BRKINT
                | libc::PARMRK
                | libc::ISTRIP
                | libc::INLCR
                | libc::IGNCR
                | libc::ICRNL
                | libc::IXON);
            termios.c_oflag &= !libc::OPOST;
            termios.c_lflag &=
                !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
            termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
            termios.c_cflag |= libc::CS8;

            // VMIN=1, VTIME=0: read() blocks until at least 1 byte available.
            termios.c_cc[libc::VMIN] = 1;
            termios.c_cc[libc::VTIME] = 0;

            if libc::tcsetattr(self.fd, libc::TCSAFLUSH, &raw const termios) != 0 {
                return Err(io::Error::last_os_error());
            }
        }

        log::debug!("fd {}: raw mode on", self.fd);
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        if let Some(ref original) = self.original_termios {
            unsafe {
                if libc::tcsetattr(self.fd, libc::TCSAFLUSH, original) != 0 {
                    return Err(io::Error::last_os_error());
                }
            }

            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = None;
            }

            self.original_termios = None;
            log::debug!("fd {}: raw mode off", self.fd);
        }
        Ok(())
    }

    fn width(&mut self) -> io::Result<u16> {
        query_width(self.fd)
    }
}

#[cfg(not(unix))]
impl TermDriver for Tty {
    fn enable_raw(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "raw mode requires a unix tty"))
    }

    fn restore(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn width(&mut self) -> io::Result<u16> {
        Ok(FALLBACK_COLS)
    }
}

impl Drop for Tty {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

// ─── Headless ───────────────────────────────────────────────────────────────

/// A terminal driver with a fixed width and no device behind it.
///
/// Clones share their raw-mode flag, so a caller can keep one clone to
/// observe transitions made through another.
#[derive(Debug, Clone)]
pub struct Headless {
    cols: u16,
    raw: Rc<Cell<bool>>,
}

impl Headless {
    /// A headless terminal `cols` cells wide.
    #[must_use]
    pub fn new(cols: u16) -> Self {
        Self {
            cols,
            raw: Rc::new(Cell::new(false)),
        }
    }

    /// Whether raw mode is currently active.
    #[must_use]
    pub fn is_raw(&self) -> bool {
        self.raw.get()
    }
}

impl TermDriver for Headless {
    fn enable_raw(&mut self) -> io::Result<()> {
        self.raw.set(true);
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        self.raw.set(false);
        Ok(())
    }

    fn width(&mut self) -> io::Result<u16> {
        Ok(self.cols)
    }
}

// ─── RawMode guard ──────────────────────────────────────────────────────────

/// Scoped raw mode.
///
/// Acquired with [`acquire`](Self::acquire); the original mode is restored
/// by [`release`](Self::release) or, on any other exit path, on drop.
pub struct RawMode<'a> {
    driver: &'a mut dyn TermDriver,
    released: bool,
}

impl<'a> RawMode<'a> {
    /// Enter raw mode on `driver`.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if raw mode cannot be enabled. Nothing
    /// needs restoring in that case.
    pub fn acquire(driver: &'a mut dyn TermDriver) -> io::Result<Self> {
        install_panic_hook();
        driver.enable_raw()?;
        Ok(Self {
            driver,
            released: false,
        })
    }

    /// Terminal width, with a zero answer mapped to [`FALLBACK_COLS`].
    ///
    /// # Errors
    ///
    /// Returns the driver's error if the size query fails.
    pub fn width(&mut self) -> io::Result<u16> {
        let cols = self.driver.width()?;
        log::debug!("terminal width: {cols}");
        Ok(if cols == 0 { FALLBACK_COLS } else { cols })
    }

    /// Restore the original mode, reporting failure.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if the mode cannot be restored.
    pub fn release(mut self) -> io::Result<()> {
        self.released = true;
        self.driver.restore()
    }
}

impl Drop for RawMode<'_> {
    fn drop(&mut self) {
        if !self.released {
            let _ = self.driver.restore();
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
