//! Cursor position inside a single line of text.
//!
//! A [`Position`] carries three measures of the same place at once:
//!
//! - `index` — code points before the cursor
//! - `byte` — UTF-8 bytes before the cursor
//! - `col` — terminal columns before the cursor
//!
//! A position is only meaningful together with the [`Text`](crate::text::Text)
//! it points into: it is valid when all three fields equal the prefix sums of
//! that text up to `index`. Positions move one character at a time, and the
//! caller always passes the exact character being crossed — the step size is
//! never inferred.

use std::fmt;

use crate::text::{Char, Text};

/// A location between two characters of a line.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Code points before this position.
    pub index: usize,
    /// UTF-8 bytes before this position.
    pub byte: usize,
    /// Terminal columns before this position.
    pub col: usize,
}

impl Position {
    /// The start of any text.
    pub const ZERO: Self = Self {
        index: 0,
        byte: 0,
        col: 0,
    };

    /// Create a position from its three measures.
    #[inline]
    #[must_use]
    pub const fn new(index: usize, byte: usize, col: usize) -> Self {
        Self { index, byte, col }
    }

    /// True at the start of the text.
    #[inline]
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.index == 0
    }

    /// Step forward over `c`.
    #[inline]
    #[must_use]
    pub const fn add(self, c: Char) -> Self {
        Self {
            index: self.index + 1,
            byte: self.byte + c.len_utf8(),
            col: self.col + c.width(),
        }
    }

    /// Step back over `c`.
    ///
    /// # Panics
    ///
    /// Panics (in debug builds) if `c` is larger than what lies before this
    /// position — the position and its text have desynchronized.
    #[inline]
    #[must_use]
    pub const fn sub(self, c: Char) -> Self {
        Self {
            index: self.index - 1,
            byte: self.byte - c.len_utf8(),
            col: self.col - c.width(),
        }
    }

    /// Step forward over every character of `text`.
    #[must_use]
    pub fn add_text(self, text: &Text) -> Self {
        Self {
            index: self.index + text.len(),
            byte: self.byte + text.byte_len(),
            col: self.col + text.width(),
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}/{}b/{}c)", self.index, self.byte, self.col)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
