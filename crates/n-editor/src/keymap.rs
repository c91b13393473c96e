//! Keymap — byte sequences to editing actions.
//!
//! Every key the editor reacts to is an entry in a [`Keymap`]: the exact
//! bytes the terminal sends for it, mapped to a [`Binding`]. A binding is
//! either an [`Action`] to run or [`Binding::Pending`], which marks a proper
//! prefix of longer sequences (`ESC`, `ESC [`, …) so the decoder keeps
//! reading. Sequences with no entry at all are discarded.
//!
//! # Default bindings
//!
//! | Bytes | Action |
//! |-------|--------|
//! | `\n`, `\r` | [`Enter`](Action::Enter) |
//! | `C-c` | [`Interrupt`](Action::Interrupt) |
//! | `C-d` | [`DeleteOrEof`](Action::DeleteOrEof) |
//! | `C-h`, `DEL` | [`Backspace`](Action::Backspace) |
//! | `C-l` | [`Clear`](Action::Clear) |
//! | `C-t` | [`SwapChars`](Action::SwapChars) |
//! | `C-b` / `C-f`, `←` / `→` | [`MoveLeft`](Action::MoveLeft) / [`MoveRight`](Action::MoveRight) |
//! | `C-p` / `C-n`, `↑` / `↓` | [`HistoryBack`](Action::HistoryBack) / [`HistoryForward`](Action::HistoryForward) |
//! | `C-u` / `C-k` | [`CutLineLeft`](Action::CutLineLeft) / [`CutLineRight`](Action::CutLineRight) |
//! | `C-a` / `C-e` | [`MoveBeginning`](Action::MoveBeginning) / [`MoveEnd`](Action::MoveEnd) |
//! | `C-w` | [`CutPrevWord`](Action::CutPrevWord) |
//! | `C-y` | [`Paste`](Action::Paste) |
//! | `M-b`, `M-←` / `M-f`, `M-→` | [`MoveWordLeft`](Action::MoveWordLeft) / [`MoveWordRight`](Action::MoveWordRight) |
//! | `ESC [3~` | [`Delete`](Action::Delete) |
//!
//! # Threading
//!
//! A keymap is built once and then only read. Sharing one across threads is
//! fine after construction, as long as nothing binds or unbinds any more.

use std::collections::HashMap;
use std::fmt;

use crate::editor::{Editor, Status};

// ---------------------------------------------------------------------------
// Key sequences
// ---------------------------------------------------------------------------

pub const NEWLINE: &[u8] = b"\n";
pub const CARRIAGE_RETURN: &[u8] = b"\r";
pub const CTRL_A: &[u8] = b"\x01";
pub const CTRL_B: &[u8] = b"\x02";
pub const CTRL_C: &[u8] = b"\x03";
pub const CTRL_D: &[u8] = b"\x04";
pub const CTRL_E: &[u8] = b"\x05";
pub const CTRL_F: &[u8] = b"\x06";
pub const CTRL_H: &[u8] = b"\x08";
pub const CTRL_K: &[u8] = b"\x0b";
pub const CTRL_L: &[u8] = b"\x0c";
pub const CTRL_N: &[u8] = b"\x0e";
pub const CTRL_P: &[u8] = b"\x10";
pub const CTRL_T: &[u8] = b"\x14";
pub const CTRL_U: &[u8] = b"\x15";
pub const CTRL_W: &[u8] = b"\x17";
pub const CTRL_Y: &[u8] = b"\x19";
pub const BACKSPACE: &[u8] = b"\x7f";

pub const ESCAPE: &[u8] = b"\x1b";
pub const META_B: &[u8] = b"\x1bb";
pub const META_F: &[u8] = b"\x1bf";

pub const CSI: &[u8] = b"\x1b[";
pub const UP: &[u8] = b"\x1b[A";
pub const DOWN: &[u8] = b"\x1b[B";
pub const RIGHT: &[u8] = b"\x1b[C";
pub const LEFT: &[u8] = b"\x1b[D";
pub const DELETE_PREFIX: &[u8] = b"\x1b[3";
pub const DELETE: &[u8] = b"\x1b[3~";
pub const META_RIGHT: &[u8] = b"\x1b[1;3C";
pub const META_LEFT: &[u8] = b"\x1b[1;3D";

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// Something the editor can do in response to a key.
///
/// `Action` deliberately has no `PartialEq`: [`Custom`](Action::Custom)
/// holds a function pointer. Use `matches!` to test for a variant.
#[derive(Clone, Copy)]
pub enum Action {
    /// Insert a character at the cursor.
    Insert(char),
    /// Finish the line.
    Enter,
    /// Abandon the line and hand control to the interrupt policy.
    Interrupt,
    /// End of input on an empty line, `Delete` otherwise.
    DeleteOrEof,
    Backspace,
    Delete,
    MoveLeft,
    MoveRight,
    MoveWordLeft,
    MoveWordRight,
    MoveBeginning,
    MoveEnd,
    HistoryBack,
    HistoryForward,
    /// Cut from the start of the line to the cursor.
    CutLineLeft,
    /// Cut from the cursor to the end of the line.
    CutLineRight,
    /// Cut the word before the cursor.
    CutPrevWord,
    /// Transpose the characters around the cursor.
    SwapChars,
    Paste,
    /// Clear the screen and redraw the line.
    Clear,
    Bell,
    /// A caller-supplied action over the editor state.
    Custom(fn(&mut Editor) -> Status),
}

impl Action {
    /// Whether this action keeps an open chain of cuts open, so the next
    /// cut merges into the clipboard instead of replacing it.
    #[must_use]
    pub const fn continues_clipboard(&self) -> bool {
        matches!(self, Self::CutLineLeft | Self::CutLineRight | Self::CutPrevWord)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert(ch) => f.debug_tuple("Insert").field(ch).finish(),
            Self::Enter => f.write_str("Enter"),
            Self::Interrupt => f.write_str("Interrupt"),
            Self::DeleteOrEof => f.write_str("DeleteOrEof"),
            Self::Backspace => f.write_str("Backspace"),
            Self::Delete => f.write_str("Delete"),
            Self::MoveLeft => f.write_str("MoveLeft"),
            Self::MoveRight => f.write_str("MoveRight"),
            Self::MoveWordLeft => f.write_str("MoveWordLeft"),
            Self::MoveWordRight => f.write_str("MoveWordRight"),
            Self::MoveBeginning => f.write_str("MoveBeginning"),
            Self::MoveEnd => f.write_str("MoveEnd"),
            Self::HistoryBack => f.write_str("HistoryBack"),
            Self::HistoryForward => f.write_str("HistoryForward"),
            Self::CutLineLeft => f.write_str("CutLineLeft"),
            Self::CutLineRight => f.write_str("CutLineRight"),
            Self::CutPrevWord => f.write_str("CutPrevWord"),
            Self::SwapChars => f.write_str("SwapChars"),
            Self::Paste => f.write_str("Paste"),
            Self::Clear => f.write_str("Clear"),
            Self::Bell => f.write_str("Bell"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Keymap
// ---------------------------------------------------------------------------

/// What a key sequence is bound to.
#[derive(Debug, Clone, Copy)]
pub enum Binding {
    /// A prefix of longer sequences: keep reading.
    Pending,
    /// A complete sequence.
    Action(Action),
}

/// Mapping from raw key sequences to bindings.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<Vec<u8>, Binding>,
}

impl Keymap {
    /// A keymap with no bindings at all.
    ///
    /// Printable characters are still inserted: they never go through the
    /// keymap.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `key` to `action`, returning the previous binding.
    pub fn bind(&mut self, key: impl Into<Vec<u8>>, action: Action) -> Option<Binding> {
        self.bindings.insert(key.into(), Binding::Action(action))
    }

    /// Mark `key` as a prefix of longer sequences, returning the previous
    /// binding.
    pub fn bind_prefix(&mut self, key: impl Into<Vec<u8>>) -> Option<Binding> {
        self.bindings.insert(key.into(), Binding::Pending)
    }

    /// Remove the binding for `key`. Afterwards the sequence is discarded.
    pub fn unbind(&mut self, key: &[u8]) -> Option<Binding> {
        self.bindings.remove(key)
    }

    /// The binding for exactly `key`.
    #[must_use]
    pub fn get(&self, key: &[u8]) -> Option<Binding> {
        self.bindings.get(key).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Every bound sequence with its binding, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], Binding)> {
        self.bindings.iter().map(|(k, b)| (k.as_slice(), *b))
    }
}

impl Default for Keymap {
    /// The standard emacs-style bindings (see the module docs).
    fn default() -> Self {
        const ACTIONS: &[(&[u8], Action)] = &[
            (NEWLINE, Action::Enter),
            (CARRIAGE_RETURN, Action::Enter),
            (CTRL_C, Action::Interrupt),
            (CTRL_D, Action::DeleteOrEof),
            (CTRL_H, Action::Backspace),
            (BACKSPACE, Action::Backspace),
            (CTRL_L, Action::Clear),
            (CTRL_T, Action::SwapChars),
            (CTRL_B, Action::MoveLeft),
            (CTRL_F, Action::MoveRight),
            (CTRL_P, Action::HistoryBack),
            (CTRL_N, Action::HistoryForward),
            (CTRL_U, Action::CutLineLeft),
            (CTRL_K, Action::CutLineRight),
            (CTRL_A, Action::MoveBeginning),
            (CTRL_E, Action::MoveEnd),
            (CTRL_W, Action::CutPrevWord),
            (CTRL_Y, Action::Paste),
            (META_B, Action::MoveWordLeft),
            (META_LEFT, Action::MoveWordLeft),
            (META_F, Action::MoveWordRight),
            (META_RIGHT, Action::MoveWordRight),
            (LEFT, Action::MoveLeft),
            (RIGHT, Action::MoveRight),
            (UP, Action::HistoryBack),
            (DOWN, Action::HistoryForward),
            (DELETE, Action::Delete),
        ];
        // `ESC [1;3` leads to the meta-arrow sequences.
        const PREFIXES: &[&[u8]] = &[
            ESCAPE,
            CSI,
            DELETE_PREFIX,
            b"\x1b[1",
            b"\x1b[1;",
            b"\x1b[1;3",
        ];

        let mut map = Self::empty();
        for &(key, action) in ACTIONS {
            map.bind(key, action);
        }
        for &key in PREFIXES {
            map.bind_prefix(key);
        }
        map
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
