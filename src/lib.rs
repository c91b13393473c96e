// SPDX-License-Identifier: MIT
//
// n-line — interactive single-line editing for terminals.
//
// The public surface is small: build a `Scanner`, call `scan(prompt)` until
// it returns false, read each line with `text()` or `bytes()`. Editing is
// emacs-style (see `n_editor::keymap` for the bindings), Unicode-aware, and
// scrolls horizontally when the line outgrows the terminal. When input is
// not an ANSI terminal, lines are read verbatim instead.
//
// Crates:
//
//   n-term   → raw mode, width queries, ANSI output, blocking input
//   n-editor → text model, keymap, editing actions, redraw
//   n-line   → this crate: the scan loop, history files, errors
//
// Diagnostics go through the `log` facade. Nothing is logged unless the
// embedding program installs a logger.

mod error;
mod scanner;

pub use error::Error;
pub use scanner::{InterruptPolicy, Scanner, ScannerBuilder, default_interrupt};

pub use n_editor::{Action, Binding, Editor, Keymap, Status};
pub use n_term::terminal::{Headless, TermDriver};
