//! Editor — the state of one editing session and every action over it.
//!
//! An [`Editor`] owns the line being edited, the cursor, the clipboard, the
//! history, the prompt, and the terminal width. Actions mutate that state
//! and append whatever the terminal needs to see to an in-memory
//! [`OutputBuffer`]; the caller drains it with [`Editor::flush_to`] after
//! each input unit. No action touches I/O directly, so none can fail:
//! an action that can't apply (moving past either end, cutting nothing)
//! rings the bell and leaves the state alone.
//!
//! Actions that end the line report it through [`Status`] rather than
//! unwinding: the session loop switches on the status of every unit.

use std::io::{self, Write};
use std::path::Path;

use n_term::ansi;
use n_term::output::OutputBuffer;
use n_term::terminal::FALLBACK_COLS;

use crate::clipboard::{Clipboard, Side};
use crate::decoder::{Decoder, Resolution};
use crate::history::History;
use crate::keymap::{Action, Keymap};
use crate::position::Position;
use crate::render;
use crate::text::{Char, Text};
use crate::word;

/// How the session loop should proceed after an input unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Keep reading.
    Continue,
    /// The line is finished; [`Editor::text`] holds it.
    LineReady,
    /// The user signalled end of input on an empty line.
    EndOfStream,
    /// The user interrupted the line.
    Interrupted,
}

/// Session state for an interactive line editor.
#[derive(Debug)]
pub struct Editor {
    text: Text,
    pos: Position,
    prompt: Text,
    cols: usize,
    clipboard: Clipboard,
    history: History,
    decoder: Decoder,
    out: OutputBuffer,
    stop: bool,
}

impl Editor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: Text::new(),
            pos: Position::ZERO,
            prompt: Text::new(),
            cols: usize::from(FALLBACK_COLS),
            clipboard: Clipboard::new(),
            history: History::new(),
            decoder: Decoder::new(),
            out: OutputBuffer::new(),
            stop: false,
        }
    }

    // -- Accessors -----------------------------------------------------------

    /// The line being edited, or the last line produced.
    #[inline]
    #[must_use]
    pub const fn text(&self) -> &Text {
        &self.text
    }

    #[inline]
    #[must_use]
    pub const fn pos(&self) -> Position {
        self.pos
    }

    #[inline]
    #[must_use]
    pub const fn prompt(&self) -> &Text {
        &self.prompt
    }

    /// Terminal width in columns.
    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    #[must_use]
    pub const fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    #[inline]
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    #[inline]
    pub const fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Whether the current line has been entered.
    #[inline]
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stop
    }

    /// Output accumulated since the last flush.
    #[inline]
    #[must_use]
    pub const fn output(&self) -> &OutputBuffer {
        &self.out
    }

    /// Append raw bytes to the pending output.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.out.push_bytes(bytes);
    }

    /// Write pending output to `w`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails. The pending output is
    /// dropped either way.
    pub fn flush_to(&mut self, w: &mut (impl Write + ?Sized)) -> io::Result<()> {
        self.out.flush_to(w)
    }

    // -- Session -------------------------------------------------------------

    /// Set the prompt without starting an interactive line.
    pub fn set_prompt(&mut self, prompt: &str) {
        self.prompt = Text::from(prompt);
        self.stop = false;
    }

    /// Start editing a fresh line: empty text, cursor at the start, a live
    /// history slot, and the prompt written out.
    pub fn begin_line(&mut self, prompt: &str, cols: usize) {
        self.set_prompt(prompt);
        self.cols = cols;
        self.text = Text::new();
        self.pos = Position::ZERO;
        self.decoder.reset();
        self.history.begin();
        self.out.push_bytes(self.prompt.as_bytes());
        log::debug!("begin line: prompt {prompt:?}, {cols} columns");
    }

    /// Replace the line with `text`, cursor at the end.
    pub fn set_text(&mut self, text: Text) {
        self.text = text;
        self.pos = self.text.end();
    }

    /// Empty the line. Nothing is redrawn.
    pub fn clear_line(&mut self) {
        self.set_text(Text::new());
    }

    /// Feed one input unit through `keymap` and apply whatever it resolves
    /// to.
    ///
    /// A key resolved through the keymap that isn't a cut closes the
    /// clipboard's merge chain. Typed characters and pending prefixes leave
    /// it alone.
    pub fn feed(&mut self, ch: char, keymap: &Keymap) -> Status {
        match self.decoder.feed(ch, keymap) {
            Resolution::Insert(ch) => {
                self.insert(Char::new(ch));
                Status::Continue
            }
            Resolution::Pending => Status::Continue,
            Resolution::Unbound => {
                self.clipboard.close();
                Status::Continue
            }
            Resolution::Action(action) => {
                let status = self.run(action);
                if !action.continues_clipboard() {
                    self.clipboard.close();
                }
                status
            }
        }
    }

    /// Apply a single action.
    pub fn run(&mut self, action: Action) -> Status {
        match action {
            Action::Insert(ch) => self.insert(Char::new(ch)),
            Action::Enter => return self.enter(),
            Action::Interrupt => return self.interrupt(),
            Action::DeleteOrEof => return self.delete_or_eof(),
            Action::Backspace => self.backspace(),
            Action::Delete => self.delete(),
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::MoveWordLeft => self.move_word_left(),
            Action::MoveWordRight => self.move_word_right(),
            Action::MoveBeginning => self.move_beginning(),
            Action::MoveEnd => self.move_end(),
            Action::HistoryBack => self.history_back(),
            Action::HistoryForward => self.history_forward(),
            Action::CutLineLeft => self.cut_line_left(),
            Action::CutLineRight => self.cut_line_right(),
            Action::CutPrevWord => self.cut_prev_word(),
            Action::SwapChars => self.swap_chars(),
            Action::Paste => self.paste(),
            Action::Clear => self.clear_screen(),
            Action::Bell => self.bell(),
            Action::Custom(f) => return f(self),
        }
        Status::Continue
    }

    // -- Line termination ----------------------------------------------------

    /// Finish the line. The live history slot and any edits to browsed
    /// entries are discarded; only [`History::add`] commits a line.
    pub fn enter(&mut self) -> Status {
        self.history.commit();
        self.stop = true;
        Status::LineReady
    }

    /// Abandon the line.
    pub fn interrupt(&mut self) -> Status {
        self.history.abandon();
        Status::Interrupted
    }

    /// End of input on an empty line, otherwise [`delete`](Self::delete).
    pub fn delete_or_eof(&mut self) -> Status {
        if self.text.is_empty() {
            self.history.abandon();
            return Status::EndOfStream;
        }
        self.delete();
        Status::Continue
    }

    // -- Insertion and deletion ----------------------------------------------

    /// Insert `c` at the cursor.
    ///
    /// Typing at the end of a line that still fits echoes the character
    /// instead of redrawing.
    pub fn insert(&mut self, c: Char) {
        if self.pos == self.text.end() {
            self.text.push(c);
            self.pos = self.pos.add(c);
            if self.prompt.width() + self.text.width() < self.cols {
                self.out.push_char(c.ch());
            } else {
                self.refresh();
            }
        } else {
            self.text.insert_char_at(self.pos, c);
            self.pos = self.pos.add(c);
            self.refresh();
        }
    }

    pub fn backspace(&mut self) {
        let Some(c) = self.char_before() else {
            return self.bell();
        };
        self.pos = self.pos.sub(c);
        self.text.remove_char_at(self.pos);
        self.refresh();
    }

    pub fn delete(&mut self) {
        if self.char_at().is_none() {
            return self.bell();
        }
        self.text.remove_char_at(self.pos);
        self.refresh();
    }

    // -- Motion --------------------------------------------------------------

    pub fn move_left(&mut self) {
        let Some(c) = self.char_before() else {
            return self.bell();
        };
        self.pos = self.pos.sub(c);
        self.refresh();
    }

    pub fn move_right(&mut self) {
        let Some(c) = self.char_at() else {
            return self.bell();
        };
        self.pos = self.pos.add(c);
        self.refresh();
    }

    pub fn move_word_left(&mut self) {
        if self.pos.is_zero() {
            return;
        }
        self.pos = word::word_left(&self.text, self.pos);
        self.refresh();
    }

    pub fn move_word_right(&mut self) {
        if self.pos.index == self.text.len() {
            return;
        }
        self.pos = word::word_right(&self.text, self.pos);
        self.refresh();
    }

    pub fn move_beginning(&mut self) {
        self.pos = Position::ZERO;
        self.refresh();
    }

    pub fn move_end(&mut self) {
        self.pos = self.text.end();
        self.refresh();
    }

    // -- History -------------------------------------------------------------

    pub fn history_back(&mut self) {
        match self.history.back(self.text.as_str()) {
            Some(line) => {
                self.text = Text::from(line);
                self.pos = self.text.end();
                self.refresh();
            }
            None => self.bell(),
        }
    }

    pub fn history_forward(&mut self) {
        match self.history.forward(self.text.as_str()) {
            Some(line) => {
                self.text = Text::from(line);
                self.pos = self.text.end();
                self.refresh();
            }
            None => self.bell(),
        }
    }

    /// Replace the committed history with the lines in `path`. A line being
    /// edited stays live at the end of the working history.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read.
    pub fn load_history(&mut self, path: &Path) -> io::Result<()> {
        self.history.load(path, self.text.as_str())
    }

    // -- Clipboard -----------------------------------------------------------

    /// Cut from the start of the line to the cursor.
    pub fn cut_line_left(&mut self) {
        if self.pos.is_zero() {
            return self.bell();
        }
        self.clipboard
            .cut(self.text.slice(Position::ZERO, self.pos), Side::Before);
        self.text = self.text.slice_from(self.pos);
        self.pos = Position::ZERO;
        self.refresh();
    }

    /// Cut from the cursor to the end of the line.
    pub fn cut_line_right(&mut self) {
        if self.pos.index == self.text.len() {
            return self.bell();
        }
        self.clipboard.cut(self.text.slice_from(self.pos), Side::After);
        self.text = self.text.slice(Position::ZERO, self.pos);
        self.refresh();
    }

    /// Cut the word before the cursor, along with any whitespace between
    /// the word and the cursor.
    pub fn cut_prev_word(&mut self) {
        if self.pos.is_zero() {
            return self.bell();
        }
        let start = word::word_left(&self.text, self.pos);
        self.clipboard
            .cut(self.text.slice(start, self.pos), Side::Before);
        let mut rest = self.text.slice(Position::ZERO, start);
        rest.push_text(&self.text.slice_from(self.pos));
        self.text = rest;
        self.pos = start;
        self.refresh();
    }

    /// Insert the clipboard at the cursor. The clipboard keeps its text.
    pub fn paste(&mut self) {
        if self.clipboard.is_empty() {
            return self.bell();
        }
        let pasted = self.clipboard.text();
        self.text.insert_text_at(self.pos, pasted);
        self.pos = self.pos.add_text(pasted);
        self.refresh();
    }

    // -- Transposition -------------------------------------------------------

    /// Swap the character before the cursor with the one under it, then step
    /// past both. At the end of the line the last two characters swap.
    pub fn swap_chars(&mut self) {
        if self.pos.is_zero() || self.text.len() < 2 {
            return self.bell();
        }
        let mut at = self.pos;
        if at.index == self.text.len() {
            let Some(last) = self.char_before() else {
                return self.bell();
            };
            at = at.sub(last);
        }
        let (Some(before), Some(under)) = (self.text.get(at.index - 1), self.text.get(at.index))
        else {
            return self.bell();
        };
        self.text.swap_at(at);
        self.pos = at.sub(before).add(under).add(before);
        self.refresh();
    }

    // -- Screen --------------------------------------------------------------

    /// Clear the screen and redraw the line at the top.
    pub fn clear_screen(&mut self) {
        ansi::clear_screen(&mut self.out).ok();
        self.refresh();
    }

    pub fn bell(&mut self) {
        ansi::bell(&mut self.out).ok();
    }

    /// Redraw the prompt and line.
    pub fn refresh(&mut self) {
        render::refresh(&mut self.out, &self.prompt, &self.text, self.pos, self.cols);
    }

    // -- Internal helpers ----------------------------------------------------

    fn char_before(&self) -> Option<Char> {
        self.pos.index.checked_sub(1).and_then(|i| self.text.get(i))
    }

    fn char_at(&self) -> Option<Char> {
        self.text.get(self.pos.index)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BELL: &[u8] = b"\x07";

    fn editor() -> Editor {
        let mut ed = Editor::new();
        ed.begin_line("> ", 80);
        drain(&mut ed);
        ed
    }

    fn drain(ed: &mut Editor) -> Vec<u8> {
        let mut sink = Vec::new();
        ed.flush_to(&mut sink).unwrap();
        sink
    }

    fn feed_str(ed: &mut Editor, s: &str) -> Status {
        let map = Keymap::default();
        let mut status = Status::Continue;
        for ch in s.chars() {
            status = ed.feed(ch, &map);
        }
        status
    }

    fn typed(s: &str) -> Editor {
        let mut ed = editor();
        feed_str(&mut ed, s);
        drain(&mut ed);
        ed
    }

    fn assert_consistent(ed: &Editor) {
        assert!(ed.text().is_consistent(), "{:?}", ed.text());
        assert!(ed.text().is_valid_position(ed.pos()), "{:?}", ed.pos());
    }

    // -- Insertion -----------------------------------------------------------

    #[test]
    fn insert_and_move_left() {
        let ed = typed("ab\x02c");
        assert_eq!(ed.text().as_str(), "acb");
        assert_eq!(ed.pos().index, 2);
        assert_consistent(&ed);
    }

    #[test]
    fn insert_at_end_echoes() {
        let mut ed = editor();
        feed_str(&mut ed, "h世");
        assert_eq!(drain(&mut ed), "h世".as_bytes());
    }

    #[test]
    fn insert_at_full_width_redraws() {
        let mut ed = Editor::new();
        ed.begin_line("> ", 5);
        drain(&mut ed);
        feed_str(&mut ed, "ab");
        assert_eq!(drain(&mut ed), b"ab");
        feed_str(&mut ed, "c");
        // 2 + 3 == 5: no longer fits, full redraw with "a" scrolled away.
        assert_eq!(drain(&mut ed), b"\r> bc\x1b[0K\r\x1b[4C");
    }

    #[test]
    fn insert_in_middle_redraws() {
        let mut ed = typed("ac\x02");
        feed_str(&mut ed, "b");
        assert_eq!(drain(&mut ed), b"\r> abc\x1b[0K\r\x1b[4C");
    }

    #[test]
    fn insert_then_delete_round_trips() {
        let mut ed = typed("héllo");
        let before = ed.text().clone();
        let at = ed.text().position_at(2);
        ed.pos = at;
        ed.insert(Char::new('x'));
        ed.pos = at;
        ed.delete();
        assert_eq!(ed.text(), &before);
        assert_eq!(ed.text().as_bytes(), "héllo".as_bytes());
    }

    // -- Deletion ------------------------------------------------------------

    #[test]
    fn backspace_removes_before_cursor() {
        let ed = typed("ab世\x7f");
        assert_eq!(ed.text().as_str(), "ab");
        assert_consistent(&ed);
    }

    #[test]
    fn backspace_at_start_rings() {
        let mut ed = editor();
        feed_str(&mut ed, "\x08");
        assert_eq!(drain(&mut ed), BELL);
    }

    #[test]
    fn delete_at_end_rings() {
        let mut ed = typed("a");
        feed_str(&mut ed, "\x1b[3~");
        assert_eq!(drain(&mut ed), BELL);
        assert_eq!(ed.text().as_str(), "a");
    }

    #[test]
    fn delete_under_cursor() {
        let ed = typed("abc\x01\x1b[3~");
        assert_eq!(ed.text().as_str(), "bc");
        assert_eq!(ed.pos(), Position::ZERO);
    }

    #[test]
    fn ctrl_d_on_empty_line_ends_stream() {
        let mut ed = editor();
        assert_eq!(feed_str(&mut ed, "\x04"), Status::EndOfStream);
        assert!(!ed.history().is_active());
        assert!(ed.history().working().is_empty());
    }

    #[test]
    fn ctrl_d_with_text_deletes() {
        let mut ed = typed("ab\x01");
        assert_eq!(feed_str(&mut ed, "\x04"), Status::Continue);
        assert_eq!(ed.text().as_str(), "b");
    }

    // -- Motion --------------------------------------------------------------

    #[test]
    fn move_past_ends_rings() {
        let mut ed = typed("a");
        feed_str(&mut ed, "\x06");
        assert_eq!(drain(&mut ed), BELL);
        feed_str(&mut ed, "\x01\x02");
        assert!(drain(&mut ed).ends_with(BELL));
    }

    #[test]
    fn arrow_keys_move() {
        let ed = typed("abc\x1b[D\x1b[D\x1b[C");
        assert_eq!(ed.pos().index, 2);
    }

    #[test]
    fn word_motions() {
        let mut ed = typed("foo bar baz");
        feed_str(&mut ed, "\x1bb");
        assert_eq!(ed.pos().index, 8);
        feed_str(&mut ed, "\x1b[1;3D");
        assert_eq!(ed.pos().index, 4);
        feed_str(&mut ed, "\x1bf");
        assert_eq!(ed.pos().index, 7);
    }

    #[test]
    fn word_motion_at_end_is_silent() {
        let mut ed = typed("foo");
        feed_str(&mut ed, "\x1bf");
        assert!(drain(&mut ed).is_empty());
        feed_str(&mut ed, "\x01\x1bb");
        assert!(!drain(&mut ed).ends_with(BELL));
    }

    #[test]
    fn beginning_and_end() {
        let mut ed = typed("a世b");
        feed_str(&mut ed, "\x01");
        assert_eq!(ed.pos(), Position::ZERO);
        feed_str(&mut ed, "\x05");
        assert_eq!(ed.pos(), ed.text().end());
    }

    // -- Clipboard -----------------------------------------------------------

    #[test]
    fn consecutive_word_cuts_merge_newest_first() {
        let mut ed = typed("foo bar ");
        feed_str(&mut ed, "\x17\x17");
        assert_eq!(ed.clipboard().text().as_str(), "foo bar ");
        assert!(ed.text().is_empty());
    }

    #[test]
    fn cut_line_left_keeps_tail() {
        let ed = typed("hello world\x1bb\x15");
        assert_eq!(ed.text().as_str(), "world");
        assert_eq!(ed.pos(), Position::ZERO);
        assert_eq!(ed.clipboard().text().as_str(), "hello ");
        assert!(ed.clipboard().is_partial());
    }

    #[test]
    fn cut_left_then_right_merge() {
        let ed = typed("abcdef\x02\x02\x02\x15\x0b");
        assert_eq!(ed.clipboard().text().as_str(), "abcdef");
        assert!(ed.text().is_empty());
    }

    #[test]
    fn cut_line_right_at_end_rings() {
        let mut ed = typed("abc");
        feed_str(&mut ed, "\x0b");
        assert_eq!(drain(&mut ed), BELL);
    }

    #[test]
    fn other_key_closes_chain() {
        let mut ed = typed("one two");
        feed_str(&mut ed, "\x17");
        feed_str(&mut ed, "\x02");
        feed_str(&mut ed, "\x17");
        assert_eq!(ed.clipboard().text().as_str(), "one");
    }

    #[test]
    fn typing_keeps_chain() {
        let ed = typed("abc def\x17x\x17");
        assert!(ed.clipboard().is_partial());
        assert_eq!(ed.clipboard().text().as_str(), "xdef");
        assert_eq!(ed.text().as_str(), "abc ");
    }

    #[test]
    fn pending_prefix_keeps_chain() {
        let mut ed = typed("one two\x17");
        feed_str(&mut ed, "\x1b[");
        assert!(ed.clipboard().is_partial());
        feed_str(&mut ed, "D");
        assert!(!ed.clipboard().is_partial());
    }

    #[test]
    fn paste_is_repeatable() {
        let ed = typed("ab\x15\x19\x19");
        assert_eq!(ed.text().as_str(), "abab");
        assert_eq!(ed.pos(), ed.text().end());
        assert_eq!(ed.clipboard().text().as_str(), "ab");
    }

    #[test]
    fn paste_empty_rings() {
        let mut ed = editor();
        feed_str(&mut ed, "\x19");
        assert_eq!(drain(&mut ed), BELL);
    }

    // -- Transposition -------------------------------------------------------

    #[test]
    fn swap_at_end() {
        let ed = typed("ab\x14");
        assert_eq!(ed.text().as_str(), "ba");
        assert_eq!(ed.pos().index, 2);
    }

    #[test]
    fn swap_in_middle_advances() {
        let ed = typed("abc\x01\x06\x14");
        assert_eq!(ed.text().as_str(), "bac");
        assert_eq!(ed.pos().index, 2);
    }

    #[test]
    fn swap_multibyte() {
        let ed = typed("a世é\x14");
        assert_eq!(ed.text().as_str(), "aé世");
        assert_consistent(&ed);
        assert_eq!(ed.pos(), ed.text().end());
    }

    #[test]
    fn swap_at_start_rings() {
        let mut ed = typed("ab\x01");
        feed_str(&mut ed, "\x14");
        assert_eq!(drain(&mut ed), BELL);
        assert_eq!(ed.text().as_str(), "ab");
    }

    #[test]
    fn swap_single_char_rings() {
        let mut ed = typed("a");
        feed_str(&mut ed, "\x14");
        assert_eq!(drain(&mut ed), BELL);
    }

    // -- History -------------------------------------------------------------

    #[test]
    fn entered_line_is_not_in_history() {
        let mut ed = editor();
        assert_eq!(feed_str(&mut ed, "x\r"), Status::LineReady);
        assert!(ed.is_stopped());
        ed.begin_line("> ", 80);
        drain(&mut ed);
        feed_str(&mut ed, "\x10");
        assert_eq!(drain(&mut ed), BELL);
        assert!(ed.text().is_empty());
    }

    #[test]
    fn browse_history() {
        let mut ed = Editor::new();
        ed.history_mut().add("first");
        ed.history_mut().add("second");
        ed.begin_line("> ", 80);
        feed_str(&mut ed, "draft\x10");
        assert_eq!(ed.text().as_str(), "second");
        feed_str(&mut ed, "\x1b[A");
        assert_eq!(ed.text().as_str(), "first");
        assert_eq!(ed.pos(), ed.text().end());
        feed_str(&mut ed, "\x0e\x0e");
        assert_eq!(ed.text().as_str(), "draft");
    }

    #[test]
    fn interrupt_drops_live_slot() {
        let mut ed = Editor::new();
        ed.history_mut().add("old");
        ed.begin_line("> ", 80);
        assert_eq!(feed_str(&mut ed, "abc\x03"), Status::Interrupted);
        assert_eq!(ed.history().working(), ["old"]);
        assert_eq!(ed.text().as_str(), "abc");
    }

    // -- Screen --------------------------------------------------------------

    #[test]
    fn clear_screen_then_redraw() {
        let mut ed = typed("hi");
        feed_str(&mut ed, "\x0c");
        assert_eq!(drain(&mut ed), b"\x1b[H\x1b[2J\r> hi\x1b[0K\r\x1b[4C");
    }

    #[test]
    fn begin_line_writes_prompt() {
        let mut ed = Editor::new();
        ed.begin_line("$ ", 80);
        assert_eq!(drain(&mut ed), b"$ ");
    }

    #[test]
    fn unbound_key_is_ignored() {
        let mut ed = typed("ab");
        assert_eq!(feed_str(&mut ed, "\x1f\x1b[Z"), Status::Continue);
        assert_eq!(ed.text().as_str(), "ab");
        assert!(drain(&mut ed).is_empty());
    }

    // -- Custom actions ------------------------------------------------------

    #[test]
    fn custom_action_runs() {
        fn shout(ed: &mut Editor) -> Status {
            let upper: String = ed.text().as_str().to_uppercase();
            ed.set_text(Text::from(upper.as_str()));
            ed.refresh();
            Status::Continue
        }
        let mut map = Keymap::default();
        map.bind(b"\x1bu".to_vec(), Action::Custom(shout));

        let mut ed = editor();
        for ch in "hey\x1bu".chars() {
            ed.feed(ch, &map);
        }
        assert_eq!(ed.text().as_str(), "HEY");
        assert_eq!(ed.pos(), ed.text().end());
    }

    #[test]
    fn custom_action_can_finish_line() {
        fn done(ed: &mut Editor) -> Status {
            ed.enter()
        }
        let mut map = Keymap::default();
        map.bind(b"\x1b\r".to_vec(), Action::Custom(done));

        let mut ed = editor();
        let mut status = Status::Continue;
        for ch in "ok\x1b\r".chars() {
            status = ed.feed(ch, &map);
        }
        assert_eq!(status, Status::LineReady);
        assert_eq!(ed.text().as_str(), "ok");
    }
}
