// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation for single-line redraw.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about when to emit — that's the refresh renderer's job. This
// module just knows the byte-level encoding of the handful of commands a
// line editor needs: carriage return, erase to end of line, relative cursor
// motion, full clear, and the bell.
//
// All functions return `io::Result` propagated from the underlying writer.
// In practice they never fail when writing to `OutputBuffer` (backed by a Vec).
use std::io::{self, Write};

// ─── Raw sequences ───────────────────────────────────────────────────────────

/// Carriage return: move the cursor to column 0 of the current row.
pub const CURSOR_TO_LINE_START: &[u8] = b"\r";

/// EL 0: erase from the cursor to the end of the line.
pub const ERASE_TO_END_OF_LINE: &[u8] = b"\x1b[0K";

/// Home the cursor, then ED 2 (clear the entire screen).
pub const CLEAR_SCREEN: &[u8] = b"\x1b[H\x1b[2J";

/// BEL: audible (or visual) alert.
pub const BELL: &[u8] = b"\x07";

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to column 0 of the current row.
#[inline]
pub fn cursor_to_line_start(w: &mut impl Write) -> io::Result<()> {
    w.write_all(CURSOR_TO_LINE_START)
}

/// Move the cursor forward `n` columns (CUF).
///
/// Emits nothing for `n == 0`: most terminals treat `CSI 0 C` as `CSI 1 C`.
#[inline]
pub fn cursor_forward(w: &mut impl Write, n: usize) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}C")
}

/// Place the cursor on column `col` (0-indexed) of the current row.
///
/// Encoded as a carriage return followed by a relative forward motion, so it
/// works on terminals without absolute column addressing.
#[inline]
pub fn cursor_to_column(w: &mut impl Write, col: usize) -> io::Result<()> {
    cursor_to_line_start(w)?;
    cursor_forward(w, col)
}

// ─── Line / Screen ───────────────────────────────────────────────────────────

/// Erase from the cursor to the end of the current line (EL 0).
#[inline]
pub fn erase_to_end_of_line(w: &mut impl Write) -> io::Result<()> {
    w.write_all(ERASE_TO_END_OF_LINE)
}

/// Home the cursor and clear the entire screen.
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(CLEAR_SCREEN)
}

/// Ring the terminal bell.
#[inline]
pub fn bell(w: &mut impl Write) -> io::Result<()> {
    w.write_all(BELL)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn emit(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn line_start_is_carriage_return() {
        assert_eq!(emit(|w| cursor_to_line_start(w)), "\r");
    }

    #[test]
    fn forward_encodes_count() {
        assert_eq!(emit(|w| cursor_forward(w, 7)), "\x1b[7C");
        assert_eq!(emit(|w| cursor_forward(w, 120)), "\x1b[120C");
    }

    #[test]
    fn forward_zero_is_empty() {
        assert_eq!(emit(|w| cursor_forward(w, 0)), "");
    }

    #[test]
    fn to_column_returns_first() {
        assert_eq!(emit(|w| cursor_to_column(w, 3)), "\r\x1b[3C");
        assert_eq!(emit(|w| cursor_to_column(w, 0)), "\r");
    }

    #[test]
    fn erase_clear_bell() {
        assert_eq!(emit(|w| erase_to_end_of_line(w)), "\x1b[0K");
        assert_eq!(emit(|w| clear_screen(w)), "\x1b[H\x1b[2J");
        assert_eq!(emit(|w| bell(w)), "\x07");
    }
}
