// SPDX-License-Identifier: MIT
//
// n-term — Terminal layer for n-line.
//
// Everything the line editor needs from a terminal and nothing more: raw
// mode as a scoped resource, a width query, a blocking code-point reader,
// and the five ANSI commands a single-line redraw is built from. Output is
// accumulated in memory and written once per keypress.
//
// No TUI framework sits underneath. The terminal is driven directly with
// termios and ANSI escape sequences, so every byte sent is accounted for.

pub mod ansi;
pub mod output;
pub mod reader;
pub mod terminal;
