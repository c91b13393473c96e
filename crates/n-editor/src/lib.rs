//! # n-editor — Editing core for n-line
//!
//! Everything between "a key arrived" and "these bytes go to the terminal":
//!
//! - **[`text`]** — `Char` and `Text`, a line with its encoding and display width
//! - **[`position`]** — `Position` (char index, byte offset, column)
//! - **[`clipboard`]** — the kill buffer with its cut-merging chain
//! - **[`history`]** — saved and working history, file persistence
//! - **[`word`]** — whitespace-delimited word motions
//! - **[`keymap`]** — `Action`, `Binding`, and the default key table
//! - **[`decoder`]** — accumulates input units into keys
//! - **[`editor`]** — session state and every editing action
//! - **[`render`]** — single-line redraw with horizontal scrolling
//!
//! The crate does no I/O of its own beyond history files: output is
//! accumulated in an `n_term::output::OutputBuffer` and drained by the caller.

pub mod clipboard;
pub mod decoder;
pub mod editor;
pub mod history;
pub mod keymap;
pub mod position;
pub mod render;
pub mod text;
pub mod word;

pub use editor::{Editor, Status};
pub use keymap::{Action, Binding, Keymap};
