//! Single-line redraw with horizontal scrolling.
//!
//! The whole prompt and line are rewritten on every refresh:
//!
//! ```text
//! \r  prompt  visible-slice  ESC[0K  \r ESC[nC
//! ```
//!
//! When the line is wider than the terminal, only a window of it is shown.
//! The window is found by trimming whole characters, so a wide glyph is
//! never split:
//!
//! 1. From the left, until the cursor column fits:
//!    `prompt + (cursor - start) < cols`.
//! 2. From the right, until the trailing edge fits:
//!    `prompt + (end - start) < cols`.
//!
//! The last terminal column stays empty so the terminal never wraps.

use n_term::ansi;
use n_term::output::OutputBuffer;

use crate::position::Position;
use crate::text::Text;

/// The visible part `[start, end)` of `text` for a cursor at `pos`.
///
/// The cursor is always inside `[start, end]`, even if the prompt alone
/// doesn't fit.
#[must_use]
pub fn visible_window(
    text: &Text,
    pos: Position,
    prompt_width: usize,
    cols: usize,
) -> (Position, Position) {
    debug_assert!(text.is_valid_position(pos), "{pos:?} not in {text:?}");

    let mut start = Position::ZERO;
    while prompt_width + (pos.col - start.col) >= cols && start.index < pos.index {
        let Some(c) = text.get(start.index) else { break };
        start = start.add(c);
    }

    let mut end = text.end();
    while prompt_width + (end.col - start.col) >= cols && end.index > pos.index {
        let Some(c) = text.get(end.index - 1) else { break };
        end = end.sub(c);
    }

    (start, end)
}

/// Redraw the prompt and the visible part of `text`, leaving the terminal
/// cursor on `pos`.
pub fn refresh(out: &mut OutputBuffer, prompt: &Text, text: &Text, pos: Position, cols: usize) {
    let (start, end) = visible_window(text, pos, prompt.width(), cols);
    log::trace!("refresh: window {start:?}..{end:?} cursor {pos:?} cols {cols}");

    ansi::cursor_to_line_start(out).ok();
    out.push_bytes(prompt.as_bytes());
    out.push_bytes(&text.as_bytes()[start.byte..end.byte]);
    ansi::erase_to_end_of_line(out).ok();
    ansi::cursor_to_column(out, prompt.width() + (pos.col - start.col)).ok();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
