// SPDX-License-Identifier: MIT
//
// Stream-level errors.
//
// Only failures of the input, the output or the terminal are errors. End of
// input and Ctrl-C are ordinary outcomes of a scan, and editing mistakes
// (moving past the end, pasting nothing) ring the bell instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// An error recorded by a [`Scanner`](crate::Scanner).
#[derive(Debug, Error)]
pub enum Error {
    /// Reading input or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Raw mode or the width query failed.
    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),

    /// A history file couldn't be read or written.
    #[error("history file {}: {source}", path.display())]
    History {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// The underlying I/O error.
    #[must_use]
    pub const fn io(&self) -> &io::Error {
        match self {
            Self::Io(e) | Self::Terminal(e) | Self::History { source: e, .. } => e,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
