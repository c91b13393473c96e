//! Key decoder — raw input units to actions.
//!
//! Input arrives one code point at a time. A printable character with nothing
//! pending is inserted as-is and never looked up. Anything else starts, or
//! extends, an accumulated key that is looked up in the [`Keymap`] after
//! every unit:
//!
//! - bound to an action: the key is complete, the action runs
//! - bound as a prefix: keep accumulating
//! - not bound: the key is complete but unknown, it is dropped
//!
//! Terminals send escape sequences as ASCII bytes, so mid-sequence each unit
//! is a single byte of the sequence.

use crate::keymap::{Action, Binding, Keymap};

/// What one input unit resolved to.
#[derive(Debug, Clone, Copy)]
pub enum Resolution {
    /// A printable character typed with nothing pending.
    Insert(char),
    /// A complete key: run this.
    Action(Action),
    /// A prefix: wait for more input.
    Pending,
    /// A complete key with no binding. Already dropped.
    Unbound,
}

/// Accumulates multi-byte keys between input units.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    pending: Vec<u8>,
}

impl Decoder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Whether a key is partially accumulated.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// The bytes accumulated so far.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Drop any accumulated bytes.
    pub fn reset(&mut self) {
        self.pending.clear();
    }

    /// Feed one input unit.
    pub fn feed(&mut self, ch: char, keymap: &Keymap) -> Resolution {
        if self.pending.is_empty() && !ch.is_control() {
            return Resolution::Insert(ch);
        }

        let mut utf8 = [0; 4];
        self.pending
            .extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());

        match keymap.get(&self.pending) {
            Some(Binding::Pending) => {
                log::trace!("key prefix {:?}", self.pending.escape_ascii().to_string());
                Resolution::Pending
            }
            Some(Binding::Action(action)) => {
                log::trace!(
                    "key {:?} -> {action:?}",
                    self.pending.escape_ascii().to_string()
                );
                self.pending.clear();
                Resolution::Action(action)
            }
            None => {
                log::debug!(
                    "discarding unbound key {:?}",
                    self.pending.escape_ascii().to_string()
                );
                self.pending.clear();
                Resolution::Unbound
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
