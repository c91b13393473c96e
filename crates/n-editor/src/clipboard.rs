//! Clipboard — storage for cut text.
//!
//! The line editor has a single kill buffer. Cuts (`Ctrl-U`, `Ctrl-K`,
//! `Ctrl-W`) store into it and `Ctrl-Y` pastes it back. The clipboard is not
//! consumed by pasting, so the same text can be pasted repeatedly.
//!
//! ## Merging consecutive cuts
//!
//! A run of cuts with nothing else in between builds a single clipboard
//! entry instead of each cut overwriting the previous one. The `partial`
//! flag marks such an open run:
//!
//! - A cut made while the chain is open merges into the existing text —
//!   before it for cuts that extend leftwards, after it for cuts that extend
//!   rightwards — so the clipboard reads in buffer order.
//! - A cut made while the chain is closed replaces the clipboard.
//! - Every cut opens the chain; any other input closes it.

use crate::text::Text;

/// Which side of the existing clipboard text a merged cut lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The cut text came from left of the cursor: it goes first.
    Before,
    /// The cut text came from right of the cursor: it goes last.
    After,
}

/// The kill buffer.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    text: Text,
    partial: bool,
}

impl Clipboard {
    /// An empty clipboard with the chain closed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: Text::new(),
            partial: false,
        }
    }

    /// Store a cut: merge on `side` if the chain is open, replace otherwise.
    /// Either way the chain is open afterwards.
    pub fn cut(&mut self, mut cut: Text, side: Side) {
        if self.partial {
            match side {
                Side::Before => {
                    cut.push_text(&self.text);
                    self.text = cut;
                }
                Side::After => self.text.push_text(&cut),
            }
        } else {
            self.text = cut;
        }
        self.partial = true;
    }

    /// Close the chain: the next cut replaces instead of merging.
    #[inline]
    pub const fn close(&mut self) {
        self.partial = false;
    }

    /// Whether the next cut merges.
    #[inline]
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.partial
    }

    /// The stored text.
    #[inline]
    #[must_use]
    pub const fn text(&self) -> &Text {
        &self.text
    }

    /// True if there is nothing to paste.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
