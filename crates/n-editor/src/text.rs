//! Line text — characters, their encoding, and their display width.
//!
//! A [`Text`] is the content of one editable line. It keeps three parallel
//! measures in lockstep:
//!
//! - the character sequence (one [`Char`] per code point)
//! - the UTF-8 encoding (`as_bytes` is the concatenation of every char)
//! - the display width (sum of every char's column width)
//!
//! Every method restores all three before it returns, so a caller never
//! observes them out of sync. Operations are linear in line length, which is
//! fine for interactive lines.
//!
//! Column widths come from [`char_width`], a thin wrapper over the
//! `unicode-width` tables: 2 for East Asian wide and fullwidth glyphs, 0 for
//! combining marks and control characters, 1 for everything else.

use std::fmt;

use unicode_width::UnicodeWidthChar;

use crate::position::Position;

/// Terminal columns occupied by `ch`: 0, 1, or 2.
///
/// Control characters report 0.
#[inline]
#[must_use]
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Char
// ---------------------------------------------------------------------------

/// One code point with its display width.
///
/// The UTF-8 encoding is derived from the code point on demand.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Char {
    ch: char,
    width: usize,
}

impl Char {
    /// Classify `ch` with [`char_width`].
    #[must_use]
    pub fn new(ch: char) -> Self {
        Self {
            ch,
            width: char_width(ch),
        }
    }

    /// The code point.
    #[inline]
    #[must_use]
    pub const fn ch(self) -> char {
        self.ch
    }

    /// Length of the UTF-8 encoding in bytes.
    #[inline]
    #[must_use]
    pub const fn len_utf8(self) -> usize {
        self.ch.len_utf8()
    }

    /// Terminal columns occupied.
    #[inline]
    #[must_use]
    pub const fn width(self) -> usize {
        self.width
    }

    /// Whether this is Unicode whitespace (`White_Space` property).
    #[inline]
    #[must_use]
    pub fn is_whitespace(self) -> bool {
        self.ch.is_whitespace()
    }
}

impl From<char> for Char {
    fn from(ch: char) -> Self {
        Self::new(ch)
    }
}

impl fmt::Debug for Char {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{}", self.ch, self.width)
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// An ordered sequence of characters with derived byte and column totals.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Text {
    chars: Vec<Char>,
    /// Encoding of `chars`, in order.
    encoded: String,
    /// Sum of every char's width.
    width: usize,
}

impl Text {
    /// An empty text.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chars: Vec::new(),
            encoded: String::new(),
            width: 0,
        }
    }

    /// Number of characters (code points).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// True if there are no characters.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Length of the UTF-8 encoding in bytes.
    #[inline]
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.encoded.len()
    }

    /// Total display width in terminal columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// The characters, in order.
    #[inline]
    #[must_use]
    pub fn chars(&self) -> &[Char] {
        &self.chars
    }

    /// The character at `index`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Char> {
        self.chars.get(index).copied()
    }

    /// The UTF-8 encoding.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.encoded.as_bytes()
    }

    /// The text as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// The position after the last character.
    #[must_use]
    pub fn end(&self) -> Position {
        Position::new(self.chars.len(), self.encoded.len(), self.width)
    }

    /// The position before the character at `index`, computed by scanning.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    #[must_use]
    pub fn position_at(&self, index: usize) -> Position {
        self.chars[..index]
            .iter()
            .fold(Position::ZERO, |pos, &c| pos.add(c))
    }

    /// Whether `pos` equals the prefix sums of this text up to `pos.index`.
    #[must_use]
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.index <= self.chars.len() && self.position_at(pos.index) == pos
    }

    /// Whether the encoding and width agree with the character sequence.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let width: usize = self.chars.iter().map(|c| c.width()).sum();
        width == self.width && self.encoded.chars().eq(self.chars.iter().map(|c| c.ch()))
    }

    // -- Mutation ------------------------------------------------------------

    /// Append one character.
    pub fn push(&mut self, c: Char) {
        self.chars.push(c);
        self.encoded.push(c.ch());
        self.width += c.width();
    }

    /// Append every character of `other`.
    pub fn push_text(&mut self, other: &Self) {
        self.chars.extend_from_slice(&other.chars);
        self.encoded.push_str(&other.encoded);
        self.width += other.width;
    }

    /// Insert `c` before the character at `pos`.
    pub fn insert_char_at(&mut self, pos: Position, c: Char) {
        debug_assert!(self.is_valid_position(pos), "{pos:?} not in {self:?}");
        self.chars.insert(pos.index, c);
        self.encoded.insert(pos.byte, c.ch());
        self.width += c.width();
    }

    /// Insert all of `other` before the character at `pos`.
    pub fn insert_text_at(&mut self, pos: Position, other: &Self) {
        debug_assert!(self.is_valid_position(pos), "{pos:?} not in {self:?}");
        let tail = self.chars.split_off(pos.index);
        self.chars.extend_from_slice(&other.chars);
        self.chars.extend(tail);
        self.encoded.insert_str(pos.byte, &other.encoded);
        self.width += other.width;
    }

    /// Remove and return the character right after `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is at the end of the text.
    pub fn remove_char_at(&mut self, pos: Position) -> Char {
        debug_assert!(self.is_valid_position(pos), "{pos:?} not in {self:?}");
        let c = self.chars.remove(pos.index);
        self.encoded
            .replace_range(pos.byte..pos.byte + c.len_utf8(), "");
        self.width -= c.width();
        c
    }

    /// Exchange the character before `pos` with the character at `pos`.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < pos.index < len()`.
    pub fn swap_at(&mut self, pos: Position) {
        debug_assert!(self.is_valid_position(pos), "{pos:?} not in {self:?}");
        let before = self.chars[pos.index - 1];
        let at = self.chars[pos.index];
        let start = pos.byte - before.len_utf8();
        let end = pos.byte + at.len_utf8();

        let mut swapped = String::with_capacity(end - start);
        swapped.push(at.ch());
        swapped.push(before.ch());

        self.chars.swap(pos.index - 1, pos.index);
        self.encoded.replace_range(start..end, &swapped);
    }

    // -- Slicing -------------------------------------------------------------

    /// The characters in `[start, end)` as a new text.
    #[must_use]
    pub fn slice(&self, start: Position, end: Position) -> Self {
        debug_assert!(self.is_valid_position(start), "{start:?} not in {self:?}");
        debug_assert!(self.is_valid_position(end), "{end:?} not in {self:?}");
        debug_assert!(start.index <= end.index);
        Self {
            chars: self.chars[start.index..end.index].to_vec(),
            encoded: self.encoded[start.byte..end.byte].to_owned(),
            width: end.col - start.col,
        }
    }

    /// The characters from `start` to the end as a new text.
    #[must_use]
    pub fn slice_from(&self, start: Position) -> Self {
        self.slice(start, self.end())
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        let mut text = Self {
            chars: Vec::with_capacity(s.len()),
            encoded: String::with_capacity(s.len()),
            width: 0,
        };
        for ch in s.chars() {
            text.push(Char::new(ch));
        }
        text
    }
}

impl FromIterator<char> for Text {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut text = Self::new();
        for ch in iter {
            text.push(Char::new(ch));
        }
        text
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Text({:?}, {}r/{}b/{}c)",
            self.encoded,
            self.chars.len(),
            self.encoded.len(),
            self.width
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
