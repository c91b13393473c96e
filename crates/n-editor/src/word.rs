//! Word motions for a single line.
//!
//! A word is a maximal run of non-whitespace characters, with whitespace
//! decided by the Unicode `White_Space` property ([`char::is_whitespace`]).
//! There are no punctuation classes: `foo.bar` is one word.
//!
//! | Motion | Key | Lands on |
//! |--------|-----|----------|
//! | [`word_left`] | `M-b` | start of the word at or before the cursor |
//! | [`word_right`] | `M-f` | end of the word at or after the cursor |
//!
//! Both skip any whitespace between the cursor and the word first. At the
//! matching end of the line they return the position unchanged.

use crate::position::Position;
use crate::text::Text;

/// Start of the word left of `pos`, skipping whitespace before it.
#[must_use]
pub fn word_left(text: &Text, pos: Position) -> Position {
    debug_assert!(text.is_valid_position(pos));
    let mut pos = pos;
    let mut in_word = false;
    while let Some(c) = pos.index.checked_sub(1).and_then(|i| text.get(i)) {
        if c.is_whitespace() {
            if in_word {
                break;
            }
        } else {
            in_word = true;
        }
        pos = pos.sub(c);
    }
    pos
}

/// End of the word right of `pos`, skipping whitespace before it.
#[must_use]
pub fn word_right(text: &Text, pos: Position) -> Position {
    debug_assert!(text.is_valid_position(pos));
    let mut pos = pos;
    let mut in_word = false;
    while let Some(c) = text.get(pos.index) {
        if c.is_whitespace() {
            if in_word {
                break;
            }
        } else {
            in_word = true;
        }
        pos = pos.add(c);
    }
    pos
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn left(s: &str, at: usize) -> usize {
        let t = Text::from(s);
        word_left(&t, t.position_at(at)).index
    }

    fn right(s: &str, at: usize) -> usize {
        let t = Text::from(s);
        word_right(&t, t.position_at(at)).index
    }

    // -- word_left -----------------------------------------------------------

    #[test]
    fn left_from_end_of_word() {
        assert_eq!(left("foo bar", 7), 4);
    }

    #[test]
    fn left_from_middle_of_word() {
        assert_eq!(left("foo bar", 6), 4);
    }

    #[test]
    fn left_skips_trailing_whitespace() {
        assert_eq!(left("foo bar   ", 10), 4);
    }

    #[test]
    fn left_from_word_start_goes_to_previous() {
        assert_eq!(left("foo bar", 4), 0);
    }

    #[test]
    fn left_at_start_stays() {
        assert_eq!(left("foo", 0), 0);
    }

    #[test]
    fn left_all_whitespace_goes_to_start() {
        assert_eq!(left("   ", 3), 0);
    }

    #[test]
    fn left_treats_punctuation_as_word() {
        assert_eq!(left("a foo.bar", 9), 2);
    }

    #[test]
    fn left_unicode_whitespace() {
        // U+3000 IDEOGRAPHIC SPACE separates the words.
        assert_eq!(left("世界\u{3000}你好", 5), 3);
    }

    #[test]
    fn left_keeps_position_consistent() {
        let t = Text::from("ab 世界 cd");
        let p = word_left(&t, t.position_at(6));
        assert_eq!(p, t.position_at(3));
    }

    // -- word_right ----------------------------------------------------------

    #[test]
    fn right_from_start_of_word() {
        assert_eq!(right("foo bar", 0), 3);
    }

    #[test]
    fn right_skips_leading_whitespace() {
        assert_eq!(right("foo bar", 3), 7);
    }

    #[test]
    fn right_at_end_stays() {
        assert_eq!(right("foo", 3), 3);
    }

    #[test]
    fn right_all_whitespace_goes_to_end() {
        assert_eq!(right("  \t ", 0), 4);
    }

    #[test]
    fn right_keeps_position_consistent() {
        let t = Text::from("ab 世界 cd");
        let p = word_right(&t, t.position_at(2));
        assert_eq!(p, t.position_at(5));
    }
}
