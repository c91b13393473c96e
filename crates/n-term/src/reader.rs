// SPDX-License-Identifier: MIT
//
// Blocking input reader — one code point or one line at a time.
//
// The line editor is single-threaded: every action runs to completion
// before the next input unit is read, and the blocking read here is the
// only place the session ever waits. Two granularities are offered:
//
// - `read_char` for interactive mode: exactly one UTF-8 code point per
//   call. Malformed input yields U+FFFD for the offending lead byte and
//   resynchronizes on the next byte, so a stray continuation byte never
//   swallows the keypress that follows it.
// - `read_record` for fallback mode: one newline-delimited record with
//   the terminator (`\n` or `\r\n`) stripped, bytes otherwise verbatim.

use std::io::{self, BufRead, BufReader, Read};

/// Buffered reader over a terminal or any byte stream.
pub struct InputReader<R> {
    inner: BufReader<R>,
}

impl<R: Read> InputReader<R> {
    /// Wrap a byte source.
    pub fn new(inner: R) -> Self {
        Self {
            inner: BufReader::new(inner),
        }
    }

    /// Peek at the next byte without consuming it. `None` at end of input.
    fn peek(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    /// Read one raw byte. `None` at end of input.
    ///
    /// # Errors
    ///
    /// Propagates read errors from the underlying source.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek()?;
        if byte.is_some() {
            self.inner.consume(1);
        }
        Ok(byte)
    }

    /// Read one code point. `None` at end of input.
    ///
    /// # Errors
    ///
    /// Propagates read errors from the underlying source.
    pub fn read_char(&mut self) -> io::Result<Option<char>> {
        let Some(lead) = self.read_byte()? else {
            return Ok(None);
        };

        let expected = utf8_char_len(lead);
        if expected == 1 {
            return Ok(Some(char::from(lead)));
        }
        if expected == 0 {
            return Ok(Some(char::REPLACEMENT_CHARACTER));
        }

        let mut enc = [lead, 0, 0, 0];
        for slot in enc.iter_mut().take(expected).skip(1) {
            // Continuation bytes must start with 0b10xxxxxx; anything else
            // starts the next unit and is left unread.
            match self.peek()? {
                Some(b) if b & 0xC0 == 0x80 => {
                    *slot = b;
                    self.inner.consume(1);
                }
                _ => return Ok(Some(char::REPLACEMENT_CHARACTER)),
            }
        }

        Ok(Some(
            std::str::from_utf8(&enc[..expected])
                .ok()
                .and_then(|s| s.chars().next())
                .unwrap_or(char::REPLACEMENT_CHARACTER),
        ))
    }

    /// Read one newline-delimited record, without its terminator.
    ///
    /// A final record without a trailing newline is still returned.
    /// `None` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates read errors from the underlying source.
    pub fn read_record(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut record = Vec::new();
        if self.inner.read_until(b'\n', &mut record)? == 0 {
            return Ok(None);
        }
        if record.last() == Some(&b'\n') {
            record.pop();
            if record.last() == Some(&b'\r') {
                record.pop();
            }
        }
        Ok(Some(record))
    }
}

/// Expected byte length of a UTF-8 sequence from its lead byte.
/// Returns 0 for continuation bytes and invalid leads.
const fn utf8_char_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 0,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
