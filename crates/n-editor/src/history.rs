//! Line history — committed lines plus a browsable working copy.
//!
//! Two parallel lists back the history:
//!
//! - **saved** — lines the caller committed with [`History::add`]. Nothing is
//!   ever committed implicitly: a line the user enters is lost unless the
//!   caller adds it.
//! - **working** — what `Ctrl-P` / `Ctrl-N` browse. While a line is being
//!   edited it is a copy of `saved` plus one live slot at the end for the
//!   in-progress line, and the user may edit any entry in place.
//!
//! Edits to browsed entries are scratch work. When a line is entered the
//! working list is rebuilt from `saved`, so those edits are discarded:
//!
//! ```text
//! > foo⏎            (caller adds "foo")
//! > bar⏎            (caller adds "bar")
//! > ↑ bar2          (edit the "bar" entry, don't enter it)
//! > ↑ foo42⏎        (edit "foo", enter it; caller adds "foo42")
//! saved = ["foo", "bar", "foo42"]  — "bar2" is gone, "bar" survives
//! ```
//!
//! # File format
//!
//! One entry per line, `\n`-terminated, no escaping. Only `saved` is ever
//! written.

use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Saved and working history with a browse index.
#[derive(Debug, Clone, Default)]
pub struct History {
    saved: Vec<String>,
    working: Vec<String>,
    index: usize,
    /// A line is being edited: `working` ends with its live slot.
    active: bool,
}

impl History {
    /// An empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            saved: Vec::new(),
            working: Vec::new(),
            index: 0,
            active: false,
        }
    }

    /// Committed lines, oldest first.
    #[inline]
    #[must_use]
    pub fn saved(&self) -> &[String] {
        &self.saved
    }

    /// Browsable lines, oldest first. Ends with the live slot while active.
    #[inline]
    #[must_use]
    pub fn working(&self) -> &[String] {
        &self.working
    }

    /// Index of the entry currently shown.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Whether a line is being edited.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    // -- Line lifecycle ------------------------------------------------------

    /// Start editing a new line: push an empty live slot and show it.
    pub fn begin(&mut self) {
        if self.active {
            self.working.pop();
        }
        self.working.push(String::new());
        self.index = self.working.len() - 1;
        self.active = true;
    }

    /// The line was entered: drop the live slot and discard every
    /// in-place edit by rebuilding `working` from `saved`.
    pub fn commit(&mut self) {
        self.working.clone_from(&self.saved);
        self.index = self.working.len();
        self.active = false;
    }

    /// The line was abandoned (interrupt, end of input): drop the live slot
    /// only.
    pub fn abandon(&mut self) {
        if self.active {
            self.working.pop();
            self.active = false;
        }
        self.index = self.working.len();
    }

    // -- Browsing ------------------------------------------------------------

    /// Step to the previous entry, storing `current` into the entry being
    /// left. Returns the entry to show, or `None` at the oldest entry.
    pub fn back(&mut self, current: &str) -> Option<&str> {
        if !self.active || self.index == 0 {
            return None;
        }
        current.clone_into(&mut self.working[self.index]);
        self.index -= 1;
        Some(&self.working[self.index])
    }

    /// Step to the next entry, storing `current` into the entry being left.
    /// Returns the entry to show, or `None` at the live slot.
    pub fn forward(&mut self, current: &str) -> Option<&str> {
        if !self.active || self.index + 1 >= self.working.len() {
            return None;
        }
        current.clone_into(&mut self.working[self.index]);
        self.index += 1;
        Some(&self.working[self.index])
    }

    // -- Committed lines -----------------------------------------------------

    /// Commit `line`. It becomes browsable immediately.
    pub fn add(&mut self, line: &str) {
        self.saved.push(line.to_owned());
        if self.active {
            // Keep the live slot last.
            let slot = self.working.len() - 1;
            self.working.insert(slot, line.to_owned());
            if self.index >= slot {
                self.index += 1;
            }
        } else {
            self.working.push(line.to_owned());
            self.index = self.working.len();
        }
    }

    /// Forget every line. A line being edited keeps an (empty) live slot.
    pub fn clear(&mut self) {
        self.saved.clear();
        self.working.clear();
        self.index = 0;
        if self.active {
            self.working.push(String::new());
        }
    }

    /// Replace the committed lines with `lines`.
    ///
    /// `working` becomes a copy of `lines`; while a line is being edited,
    /// `live` (its current content) is appended as the live slot and shown.
    pub fn replace(&mut self, lines: Vec<String>, live: &str) {
        self.saved = lines;
        self.working.clone_from(&self.saved);
        if self.active {
            self.working.push(live.to_owned());
            self.index = self.working.len() - 1;
        } else {
            self.index = self.working.len();
        }
    }

    // -- Persistence ---------------------------------------------------------

    /// Write the committed lines to `path`, one per line.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be created or written.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let mut out = BufWriter::new(fs::File::create(path)?);
        for line in &self.saved {
            out.write_all(line.as_bytes())?;
            out.write_all(b"\n")?;
        }
        out.flush()?;
        log::debug!("saved {} history lines to {}", self.saved.len(), path.display());
        Ok(())
    }

    /// Replace the committed lines with the contents of `path`.
    /// See [`replace`](Self::replace) for `live`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or isn't valid UTF-8.
    /// History is left untouched in that case.
    pub fn load(&mut self, path: &Path, live: &str) -> io::Result<()> {
        let reader = BufReader::new(fs::File::open(path)?);
        let lines = reader.lines().collect::<io::Result<Vec<_>>>()?;
        log::debug!("loaded {} history lines from {}", lines.len(), path.display());
        self.replace(lines, live);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
