// SPDX-License-Identifier: MIT
//
// Scanner — reads one edited line per call.
//
// A scanner is either interactive or in fallback mode, decided once when it
// is built. Interactive scanners own a terminal driver: each scan enters raw
// mode, feeds every code point through the keymap into the editor, and
// writes the editor's output after each one. Fallback scanners read plain
// newline-delimited records with no editing at all, which is what you want
// when input is a pipe, a file, or a dumb terminal.
//
//   input ─► InputReader ─► Editor::feed(ch, keymap) ─► OutputBuffer ─► output
//                                    │
//                                  Status ─► scan loop ─► interrupt policy
//
// Raw mode is held by a `RawMode` guard for the duration of the loop, so it
// is released on every exit path. The interrupt policy runs after release.

use std::borrow::Cow;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process;

use n_editor::text::Text;
use n_editor::{Editor, Keymap, Status};
use n_term::reader::InputReader;
use n_term::terminal::{RawMode, TermDriver, Tty};

use crate::error::Error;

/// Decides what happens after Ctrl-C. Returns whether scanning should go
/// on.
///
/// The policy runs once the terminal is back in its original mode. It may
/// inspect and change the line through [`Scanner::editor_mut`]; whatever
/// the editor holds afterwards is what [`Scanner::text`] reports.
pub type InterruptPolicy = fn(&mut Scanner) -> bool;

/// Echo `^C`. On an empty line exit the process with status 1, otherwise
/// clear the line and keep going.
pub fn default_interrupt(scanner: &mut Scanner) -> bool {
    scanner.editor.write_raw(b"^C");
    if scanner.editor.text().is_empty() {
        log::debug!("interrupt on an empty line: exiting");
        scanner.editor.write_raw(b"\n");
        scanner.editor.flush_to(&mut scanner.output).ok();
        process::exit(1);
    }
    scanner.editor.clear_line();
    true
}

/// How an interactive scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ending {
    Line,
    /// Input ran out (or failed) before Enter.
    Exhausted,
    EndOfStream,
    Interrupted,
}

// ─── Builder ────────────────────────────────────────────────────────────────

/// Construction-time configuration for a [`Scanner`].
///
/// Without an explicit input the scanner reads stdin and is interactive iff
/// stdin and stdout are both an ANSI-capable terminal. With an explicit input it is in
/// fallback mode unless a terminal driver is supplied too.
#[derive(Default)]
pub struct ScannerBuilder {
    input: Option<Box<dyn Read>>,
    output: Option<Box<dyn Write>>,
    driver: Option<Box<dyn TermDriver>>,
    keymap: Option<Keymap>,
    on_interrupt: Option<InterruptPolicy>,
}

impl ScannerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read from `input` instead of stdin.
    #[must_use]
    pub fn input(mut self, input: impl Read + 'static) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    /// Write to `output` instead of stdout.
    #[must_use]
    pub fn output(mut self, output: impl Write + 'static) -> Self {
        self.output = Some(Box::new(output));
        self
    }

    /// Drive `driver` for raw mode and width. Makes the scanner interactive.
    #[must_use]
    pub fn terminal(mut self, driver: impl TermDriver + 'static) -> Self {
        self.driver = Some(Box::new(driver));
        self
    }

    /// Use `keymap` instead of [`Keymap::default`].
    #[must_use]
    pub fn keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = Some(keymap);
        self
    }

    /// Use `policy` instead of [`default_interrupt`].
    #[must_use]
    pub fn on_interrupt(mut self, policy: InterruptPolicy) -> Self {
        self.on_interrupt = Some(policy);
        self
    }

    #[must_use]
    pub fn build(self) -> Scanner {
        let driver = match self.driver {
            Some(driver) => Some(driver),
            None if self.input.is_none() => {
                Tty::stdio().map(|tty| Box::new(tty) as Box<dyn TermDriver>)
            }
            None => None,
        };
        log::debug!(
            "scanner: {} mode",
            if driver.is_some() { "interactive" } else { "fallback" }
        );

        Scanner {
            input: InputReader::new(self.input.unwrap_or_else(|| Box::new(io::stdin()))),
            output: self.output.unwrap_or_else(|| Box::new(io::stdout())),
            driver,
            keymap: self.keymap.unwrap_or_default(),
            on_interrupt: self.on_interrupt.unwrap_or(default_interrupt),
            editor: Editor::new(),
            line: Vec::new(),
            err: None,
        }
    }
}

// ─── Scanner ────────────────────────────────────────────────────────────────

/// An interactive line reader.
///
/// ```no_run
/// let mut scanner = n_line::Scanner::stdio();
/// while scanner.scan("> ") {
///     let line = scanner.text().into_owned();
///     scanner.add_to_history(&line);
///     println!("{line}");
/// }
/// if let Some(err) = scanner.err() {
///     eprintln!("{err}");
/// }
/// ```
pub struct Scanner {
    input: InputReader<Box<dyn Read>>,
    output: Box<dyn Write>,
    /// `None` in fallback mode.
    driver: Option<Box<dyn TermDriver>>,
    keymap: Keymap,
    on_interrupt: InterruptPolicy,
    editor: Editor,
    /// The last line produced, verbatim.
    line: Vec<u8>,
    err: Option<Error>,
}

impl Scanner {
    #[must_use]
    pub fn builder() -> ScannerBuilder {
        ScannerBuilder::new()
    }

    /// stdin and stdout, default keymap and interrupt policy.
    #[must_use]
    pub fn stdio() -> Self {
        ScannerBuilder::new().build()
    }

    /// Whether lines are edited in place (as opposed to read verbatim).
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.driver.is_some()
    }

    /// Read one line after writing `prompt`.
    ///
    /// Returns `false` when there are no more lines: input ended, the user
    /// pressed Ctrl-D on an empty line, or an error was recorded (see
    /// [`err`](Self::err)). Input that ends in the middle of a line still
    /// produces that line, and `false`.
    pub fn scan(&mut self, prompt: &str) -> bool {
        self.err = None;
        if self.driver.is_none() {
            return self.scan_fallback(prompt);
        }

        let more = match self.scan_interactive(prompt) {
            Ok(Ending::Line) => true,
            Ok(Ending::Exhausted | Ending::EndOfStream) => false,
            Ok(Ending::Interrupted) => {
                let policy = self.on_interrupt;
                policy(self)
            }
            Err(e) => {
                log::warn!("scan failed: {e}");
                self.editor.history_mut().abandon();
                self.err = Some(e);
                false
            }
        };
        self.line = self.editor.text().as_bytes().to_vec();

        // The cursor is still on the prompt row.
        self.editor.write_raw(b"\n");
        if let Err(e) = self.editor.flush_to(&mut self.output) {
            if self.err.is_none() {
                self.err = Some(Error::Io(e));
            }
        }
        more && self.err.is_none()
    }

    fn scan_interactive(&mut self, prompt: &str) -> Result<Ending, Error> {
        let Some(driver) = self.driver.as_deref_mut() else {
            return Ok(Ending::Exhausted);
        };
        let mut raw = RawMode::acquire(driver).map_err(Error::Terminal)?;
        let cols = raw.width().map_err(Error::Terminal)?;
        self.editor.begin_line(prompt, usize::from(cols));

        let ending = loop {
            self.editor.flush_to(&mut self.output)?;
            let ch = match self.input.read_char() {
                Ok(Some(ch)) => ch,
                Ok(None) => {
                    log::debug!("input ended mid-line");
                    self.editor.enter();
                    break Ending::Exhausted;
                }
                Err(e) => {
                    log::warn!("read failed: {e}");
                    self.err = Some(Error::Io(e));
                    self.editor.enter();
                    break Ending::Exhausted;
                }
            };
            match self.editor.feed(ch, &self.keymap) {
                Status::Continue => {}
                Status::LineReady => break Ending::Line,
                Status::EndOfStream => break Ending::EndOfStream,
                Status::Interrupted => break Ending::Interrupted,
            }
        };

        self.editor.flush_to(&mut self.output)?;
        raw.release().map_err(Error::Terminal)?;
        Ok(ending)
    }

    fn scan_fallback(&mut self, prompt: &str) -> bool {
        self.editor.set_prompt(prompt);
        let prompted = self
            .output
            .write_all(prompt.as_bytes())
            .and_then(|()| self.output.flush());
        if let Err(e) = prompted {
            self.err = Some(Error::Io(e));
            return false;
        }

        match self.input.read_record() {
            Ok(Some(record)) => {
                self.editor
                    .set_text(Text::from(String::from_utf8_lossy(&record).as_ref()));
                self.line = record;
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::warn!("read failed: {e}");
                self.err = Some(Error::Io(e));
                false
            }
        }
    }

    // ── Results ─────────────────────────────────────────────────────

    /// The last line produced, decoded lossily.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.line)
    }

    /// The last line produced, verbatim.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.line
    }

    /// The error that ended the last scan, if any.
    #[must_use]
    pub const fn err(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    // ── State ───────────────────────────────────────────────────────

    #[must_use]
    pub const fn editor(&self) -> &Editor {
        &self.editor
    }

    pub const fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    #[must_use]
    pub const fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    // ── History ─────────────────────────────────────────────────────

    /// Commit `line` to history. Entered lines are never committed
    /// automatically.
    pub fn add_to_history(&mut self, line: &str) {
        self.editor.history_mut().add(line);
    }

    pub fn clear_history(&mut self) {
        self.editor.history_mut().clear();
    }

    /// Write committed history to `path`, one line per entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::History`] if the file can't be written.
    pub fn save_history(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        self.editor
            .history()
            .save(path)
            .map_err(|source| Error::History {
                path: path.to_owned(),
                source,
            })
    }

    /// Replace committed history with the lines in `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::History`] if the file can't be read. History is
    /// unchanged in that case.
    pub fn load_history(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        self.editor
            .load_history(path)
            .map_err(|source| Error::History {
                path: path.to_owned(),
                source,
            })
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use n_term::terminal::Headless;
    use pretty_assertions::assert_eq;

    #[derive(Clone, Default)]
    struct Sink(Rc<RefCell<Vec<u8>>>);

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Sink {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    /// Yields its bytes, then fails.
    struct FailAfter(&'static [u8]);

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() {
                return Err(io::Error::other("input broke"));
            }
            let n = buf.len().min(self.0.len());
            buf[..n].copy_from_slice(&self.0[..n]);
            self.0 = &self.0[n..];
            Ok(n)
        }
    }

    struct Refuses;

    impl TermDriver for Refuses {
        fn enable_raw(&mut self) -> io::Result<()> {
            Err(io::Error::other("not a tty"))
        }

        fn restore(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn width(&mut self) -> io::Result<u16> {
            Ok(80)
        }
    }

    fn interactive(input: &'static [u8]) -> (Scanner, Sink, Headless) {
        let sink = Sink::default();
        let term = Headless::new(80);
        let scanner = Scanner::builder()
            .input(input)
            .output(sink.clone())
            .terminal(term.clone())
            .build();
        (scanner, sink, term)
    }

    fn fallback(input: &'static [u8]) -> (Scanner, Sink) {
        let sink = Sink::default();
        let scanner = Scanner::builder().input(input).output(sink.clone()).build();
        (scanner, sink)
    }

    // ── Fallback mode ───────────────────────────────────────────────

    #[test]
    fn fallback_reads_records() {
        let (mut s, sink) = fallback(b"hello\nworld\r\n");
        assert!(!s.is_interactive());
        assert!(s.scan("> "));
        assert_eq!(s.text(), "hello");
        assert!(s.scan("> "));
        assert_eq!(s.text(), "world");
        assert!(!s.scan("> "));
        assert!(s.err().is_none());
        assert_eq!(sink.contents(), "> > > ");
    }

    #[test]
    fn fallback_keeps_bytes_verbatim() {
        let (mut s, _) = fallback(b"\xffab\x1b[D\n");
        assert!(s.scan(""));
        assert_eq!(s.bytes(), b"\xffab\x1b[D");
        assert_eq!(s.text(), "\u{fffd}ab\x1b[D");
    }

    #[test]
    fn fallback_read_error() {
        let sink = Sink::default();
        let mut s = Scanner::builder()
            .input(FailAfter(b""))
            .output(sink)
            .build();
        assert!(!s.scan("> "));
        assert!(matches!(s.err(), Some(Error::Io(_))));
    }

    // ── Interactive mode ────────────────────────────────────────────

    #[test]
    fn edits_and_enters_line() {
        let (mut s, sink, term) = interactive(b"ab\x02c\r");
        assert!(s.is_interactive());
        assert!(s.scan("> "));
        assert_eq!(s.text(), "acb");
        assert_eq!(s.editor().pos().index, 2);
        assert!(!term.is_raw());
        assert_eq!(
            sink.contents(),
            "> ab\r> ab\x1b[0K\r\x1b[3C\r> acb\x1b[0K\r\x1b[4C\n"
        );
    }

    #[test]
    fn consecutive_scans() {
        let (mut s, _, _) = interactive(b"one\rtwo\n");
        assert!(s.scan("> "));
        assert_eq!(s.text(), "one");
        assert!(s.scan("> "));
        assert_eq!(s.text(), "two");
        assert!(!s.scan("> "));
        assert_eq!(s.text(), "");
        assert!(s.err().is_none());
    }

    #[test]
    fn exhausted_input_is_implicit_enter() {
        let (mut s, _, term) = interactive(b"abc");
        assert!(!s.scan("> "));
        assert_eq!(s.text(), "abc");
        assert!(s.err().is_none());
        assert!(!term.is_raw());
        assert!(!s.editor().history().is_active());
    }

    #[test]
    fn ctrl_d_on_empty_line_ends() {
        let (mut s, _, _) = interactive(b"\x04more");
        assert!(!s.scan("> "));
        assert!(s.err().is_none());
        assert_eq!(s.text(), "");
        assert!(s.editor().history().working().is_empty());
    }

    #[test]
    fn read_error_is_reported() {
        let sink = Sink::default();
        let term = Headless::new(80);
        let mut s = Scanner::builder()
            .input(FailAfter(b"ab"))
            .output(sink)
            .terminal(term.clone())
            .build();
        assert!(!s.scan("> "));
        assert_eq!(s.text(), "ab");
        assert!(matches!(s.err(), Some(Error::Io(_))));
        assert!(!term.is_raw());
    }

    #[test]
    fn raw_mode_failure_is_reported() {
        let mut s = Scanner::builder()
            .input(&b"abc\r"[..])
            .output(Sink::default())
            .terminal(Refuses)
            .build();
        assert!(!s.scan("> "));
        assert!(matches!(s.err(), Some(Error::Terminal(_))));
    }

    #[test]
    fn zero_width_means_eighty() {
        let mut s = Scanner::builder()
            .input(&b"\r"[..])
            .output(Sink::default())
            .terminal(Headless::new(0))
            .build();
        assert!(s.scan(""));
        assert_eq!(s.editor().cols(), 80);
    }

    // ── Interrupts ──────────────────────────────────────────────────

    #[test]
    fn default_interrupt_clears_line() {
        let (mut s, sink, term) = interactive(b"abc\x03");
        s.add_to_history("old");
        assert!(s.scan("> "));
        assert_eq!(s.text(), "");
        assert!(sink.contents().ends_with("^C\n"));
        assert!(!term.is_raw());
        assert_eq!(s.editor().history().working(), ["old"]);
    }

    #[test]
    fn custom_interrupt_policy() {
        fn stop(s: &mut Scanner) -> bool {
            s.editor_mut().write_raw(b"[interrupted]");
            false
        }
        let sink = Sink::default();
        let mut s = Scanner::builder()
            .input(&b"abc\x03"[..])
            .output(sink.clone())
            .terminal(Headless::new(80))
            .on_interrupt(stop)
            .build();
        assert!(!s.scan("> "));
        assert_eq!(s.text(), "abc");
        assert!(sink.contents().ends_with("[interrupted]\n"));
    }

    // ── History ─────────────────────────────────────────────────────

    #[test]
    fn entered_lines_need_explicit_commit() {
        let (mut s, sink, _) = interactive(b"x\r\x10\r");
        assert!(s.scan("> "));
        assert_eq!(s.text(), "x");
        assert!(s.scan("> "));
        assert_eq!(s.text(), "");
        assert!(sink.contents().contains('\x07'));
    }

    #[test]
    fn committed_lines_are_browsable() {
        let (mut s, _, _) = interactive(b"x\r\x10\r");
        assert!(s.scan("> "));
        let line = s.text().into_owned();
        s.add_to_history(&line);
        assert!(s.scan("> "));
        assert_eq!(s.text(), "x");
    }

    #[test]
    fn clear_history_forgets() {
        let (mut s, _, _) = interactive(b"\x10\r");
        s.add_to_history("gone");
        s.clear_history();
        assert!(s.scan("> "));
        assert_eq!(s.text(), "");
    }

    #[test]
    fn save_and_load_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");

        let (mut s, _, _) = interactive(b"");
        s.add_to_history("first");
        s.add_to_history("second");
        s.save_history(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");

        let (mut s, _, _) = interactive(b"\x10\x10\r");
        s.load_history(&path).unwrap();
        assert!(s.scan("> "));
        assert_eq!(s.text(), "first");
    }

    #[test]
    fn load_missing_history_names_path() {
        let (mut s, _, _) = interactive(b"");
        let err = s.load_history("/nonexistent/n-line/history").unwrap_err();
        assert!(matches!(err, Error::History { .. }));
        assert!(err.to_string().contains("/nonexistent/n-line/history"));
    }

    // ── Custom keymaps ──────────────────────────────────────────────

    #[test]
    fn custom_keymap_is_used() {
        let mut keymap = Keymap::default();
        keymap.bind(b"\x0f".to_vec(), n_editor::Action::Enter);
        let mut s = Scanner::builder()
            .input(&b"hi\x0f"[..])
            .output(Sink::default())
            .terminal(Headless::new(80))
            .keymap(keymap)
            .build();
        assert!(s.scan("> "));
        assert_eq!(s.text(), "hi");
    }
}
