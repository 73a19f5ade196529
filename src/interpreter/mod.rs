//! The dictation command interpreter.
//!
//! [`CommandInterpreter`] accumulates characters one at a time and, on every
//! [`parse`](CommandInterpreter::parse), checks the buffer against a fixed
//! grammar of phrases.  Matching is by substring containment, first match
//! wins:
//!
//! ```text
//! "speech type on"   → activate,   scrub buffered text
//! "speech type off"  → deactivate, scrub buffered text
//! "clear"            → forget buffer, leave text
//! "scrub"            → scrub buffered text
//! ── inactive: stop here ──
//! "repeat"           → scrub, re-insert last command
//! <trigger word> ... → translate buffered text via the binding table
//! ```
//!
//! # Example
//!
//! ```rust
//! use speech_type::interpreter::{BindingTable, CommandInterpreter, EditOperation};
//!
//! let mut interp = CommandInterpreter::new(BindingTable::python_defaults());
//! for ch in "speech type on".chars() {
//!     interp.add_char(ch);
//! }
//! assert_eq!(interp.parse(), Some(vec![EditOperation::scrub(14)]));
//! assert!(interp.is_active());
//! ```

pub mod bindings;
pub mod command;
pub mod history;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use bindings::{BindingProfile, BindingTable, SubstitutionTable};
pub use command::{EditOperation, InsertCommand, ScrubCommand, TranslateCommand};
pub use history::{CommandHistory, DEFAULT_HISTORY_SIZE};

use std::sync::Arc;

use log::{debug, trace};

const ACTIVATE_PHRASE: &str = "speech type on";
const DEACTIVATE_PHRASE: &str = "speech type off";
const CLEAR_PHRASE: &str = "clear";
const SCRUB_PHRASE: &str = "scrub";
const REPEAT_PHRASE: &str = "repeat";
const LETTERS_WORD: &str = "letters";

// ---------------------------------------------------------------------------
// CommandInterpreter
// ---------------------------------------------------------------------------

/// Buffer / parser state machine for dictated editor commands.
///
/// Two states, inactive (the initial state) and active, toggled only by the
/// "speech type on/off" phrases.  "clear" and "scrub" work in both states.
#[derive(Debug, Clone)]
pub struct CommandInterpreter {
    buffer: String,
    active: bool,
    history: CommandHistory,
    bindings: Arc<BindingTable>,
}

impl CommandInterpreter {
    /// Inactive interpreter with an empty buffer and the default history size.
    pub fn new(bindings: impl Into<Arc<BindingTable>>) -> Self {
        Self::with_history_capacity(bindings, DEFAULT_HISTORY_SIZE)
    }

    /// Like [`new`](Self::new) with a custom history capacity.
    pub fn with_history_capacity(bindings: impl Into<Arc<BindingTable>>, capacity: usize) -> Self {
        Self {
            buffer: String::new(),
            active: false,
            history: CommandHistory::with_capacity(capacity),
            bindings: bindings.into(),
        }
    }

    /// Append one typed character.  A newline resets the buffer instead.
    pub fn add_char(&mut self, ch: char) {
        if ch == '\n' {
            self.buffer.clear();
        } else {
            // One buffered char per typed char so lengths match the document.
            self.buffer.push(ch.to_lowercase().next().unwrap_or(ch));
        }
        trace!("buffer: {:?}", self.buffer);
    }

    /// Evaluate the buffer.
    ///
    /// Returns `None` when nothing was recognised (the buffer is left as-is),
    /// otherwise the edit operations to apply, in order.  An empty list means
    /// the buffer was consumed without touching the document.
    pub fn parse(&mut self) -> Option<Vec<EditOperation>> {
        if self.buffer.contains(ACTIVATE_PHRASE) {
            debug!("speech type activating");
            self.active = true;
            return Some(vec![self.take_scrub()]);
        }
        if self.buffer.contains(DEACTIVATE_PHRASE) {
            debug!("speech type deactivating");
            self.active = false;
            return Some(vec![self.take_scrub()]);
        }
        if self.buffer.contains(CLEAR_PHRASE) {
            debug!("cleared buffer, left text");
            self.buffer.clear();
            return Some(Vec::new());
        }
        if self.buffer.contains(SCRUB_PHRASE) {
            debug!("cleared buffer, removed text");
            return Some(vec![self.take_scrub()]);
        }

        if !self.active {
            return None;
        }

        if self.buffer.contains(REPEAT_PHRASE) {
            let ops = match self.history.latest().cloned() {
                Some(last) => {
                    debug!("repeating last command: {:?}", last.replacement);
                    vec![self.take_scrub(), EditOperation::Insert(last)]
                }
                None => {
                    debug!("repeat requested with empty history; ignoring");
                    self.buffer.clear();
                    Vec::new()
                }
            };
            return Some(ops);
        }

        self.translate().map(|op| vec![op])
    }

    /// Current buffer contents (lowercase).
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Buffer length in characters.
    pub fn buffer_len(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Whether translation commands are honoured.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Recorded inserts, most recent first.
    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// The binding table currently in use.
    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// Switch to another binding table.  Buffer, state and history are kept.
    pub fn set_bindings(&mut self, bindings: Arc<BindingTable>) {
        self.bindings = bindings;
    }

    /// Forget the buffered characters.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Scrub of the whole buffer; clears it.
    fn take_scrub(&mut self) -> EditOperation {
        let op = EditOperation::scrub(self.buffer_len());
        self.buffer.clear();
        op
    }

    fn translate(&mut self) -> Option<EditOperation> {
        let word = self.bindings.find_trigger(&self.buffer)?;
        let remainder = self.buffer.replacen(word, "", 1);

        let replacement = if remainder.contains(LETTERS_WORD) {
            debug!("spelling letters: {:?}", remainder);
            self.bindings
                .letters
                .apply(&remainder.replacen(LETTERS_WORD, "", 1))
                .split_whitespace()
                .collect::<String>()
        } else {
            debug!("translating: {:?}", remainder);
            self.bindings
                .keymaps
                .apply(&remainder)
                // Newlines produced by keymaps are kept.
                .trim_matches(|c: char| c.is_whitespace() && c != '\n')
                .to_owned()
        };
        debug!("with: {:?}", replacement);

        let op = EditOperation::translate(replacement.clone(), self.buffer_len());
        self.history.push(InsertCommand {
            replacement: replacement.replace('\n', ""),
        });
        self.buffer.clear();
        Some(op)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> BindingTable {
        BindingTable {
            trigger_words: vec!["parse".into(), "horse".into()],
            letters: [("alpha", "a"), ("bravo", "b"), ("charlie", "c")]
                .into_iter()
                .collect(),
            keymaps: [("equals", "="), ("open paren", "("), ("new line", "\n")]
                .into_iter()
                .collect(),
        }
    }

    fn feed(interp: &mut CommandInterpreter, text: &str) {
        for ch in text.chars() {
            interp.add_char(ch);
        }
    }

    fn active() -> CommandInterpreter {
        let mut interp = CommandInterpreter::new(table());
        feed(&mut interp, "speech type on");
        interp.parse();
        interp
    }

    // ---- add_char ---

    #[test]
    fn add_char_lowercases() {
        let mut interp = CommandInterpreter::new(table());
        feed(&mut interp, "HeLLo");
        assert_eq!(interp.buffer(), "hello");
    }

    #[test]
    fn newline_resets_buffer() {
        let mut interp = CommandInterpreter::new(table());
        feed(&mut interp, "some text");
        interp.add_char('\n');
        assert_eq!(interp.buffer(), "");
    }

    #[test]
    fn buffer_len_counts_chars() {
        let mut interp = CommandInterpreter::new(table());
        feed(&mut interp, "ÉTÉ");
        assert_eq!(interp.buffer(), "été");
        assert_eq!(interp.buffer_len(), 3);
    }

    // ---- activation ---

    #[test]
    fn starts_inactive() {
        let interp = CommandInterpreter::new(table());
        assert!(!interp.is_active());
    }

    #[test]
    fn on_then_off_toggles_and_scrubs() {
        let mut interp = CommandInterpreter::new(table());
        feed(&mut interp, "ok speech type on");
        assert_eq!(interp.parse(), Some(vec![EditOperation::scrub(17)]));
        assert!(interp.is_active());
        assert_eq!(interp.buffer(), "");

        feed(&mut interp, "speech type off");
        assert_eq!(interp.parse(), Some(vec![EditOperation::scrub(15)]));
        assert!(!interp.is_active());
        assert_eq!(interp.buffer(), "");
    }

    // ---- clear / scrub ---

    #[test]
    fn clear_forgets_buffer_without_edits() {
        let mut interp = CommandInterpreter::new(table());
        feed(&mut interp, "oops clear");
        assert_eq!(interp.parse(), Some(vec![]));
        assert_eq!(interp.buffer(), "");
    }

    #[test]
    fn scrub_works_while_inactive() {
        let mut interp = CommandInterpreter::new(table());
        feed(&mut interp, "wrong scrub");
        assert_eq!(interp.parse(), Some(vec![EditOperation::scrub(11)]));
        assert_eq!(interp.buffer(), "");
    }

    // ---- inactive ---

    #[test]
    fn inactive_ignores_triggers_and_keeps_buffer() {
        let mut interp = CommandInterpreter::new(table());
        feed(&mut interp, "parse x equals one");
        assert_eq!(interp.parse(), None);
        assert_eq!(interp.buffer(), "parse x equals one");
    }

    #[test]
    fn unmatched_text_accumulates() {
        let mut interp = active();
        let text = "just some words";
        for (i, ch) in text.chars().enumerate() {
            interp.add_char(ch);
            assert_eq!(interp.parse(), None);
            assert_eq!(interp.buffer(), &text[..=i]);
        }
    }

    // ---- translate ---

    #[test]
    fn keymaps_are_applied_and_trimmed() {
        let mut interp = active();
        feed(&mut interp, "parse x equals y");
        assert_eq!(
            interp.parse(),
            Some(vec![EditOperation::translate("x = y", 16)])
        );
        assert_eq!(interp.buffer(), "");
    }

    #[test]
    fn letters_are_spelled() {
        let mut interp = active();
        feed(&mut interp, "parse alpha bravo letters");
        assert_eq!(
            interp.parse(),
            Some(vec![EditOperation::translate("ab", 25)])
        );
    }

    #[test]
    fn letters_skip_keymaps() {
        let mut interp = active();
        feed(&mut interp, "horse letters charlie equals");
        assert_eq!(
            interp.parse(),
            Some(vec![EditOperation::translate("cequals", 28)])
        );
    }

    #[test]
    fn letter_keys_may_span_words() {
        let mut interp = CommandInterpreter::new(BindingTable {
            trigger_words: vec!["parse".into()],
            letters: [("capital alpha", "A"), ("bravo", "b")].into_iter().collect(),
            ..BindingTable::default()
        });
        feed(&mut interp, "speech type on");
        interp.parse();
        feed(&mut interp, "parse capital alpha bravo letters");
        assert_eq!(
            interp.parse(),
            Some(vec![EditOperation::translate("Ab", 33)])
        );
    }

    #[test]
    fn trim_strips_tabs_around_keymap_output() {
        let mut interp = active();
        feed(&mut interp, "\tx equals y\t parse");
        assert_eq!(
            interp.parse(),
            Some(vec![EditOperation::translate("x = y", 18)])
        );
    }

    #[test]
    fn only_first_trigger_occurrence_is_removed() {
        let mut interp = active();
        feed(&mut interp, "parse parse");
        assert_eq!(
            interp.parse(),
            Some(vec![EditOperation::translate("parse", 11)])
        );
    }

    #[test]
    fn trim_keeps_keymap_newlines() {
        let mut interp = active();
        feed(&mut interp, "parse open paren new line");
        assert_eq!(
            interp.parse(),
            Some(vec![EditOperation::translate("( \n", 25)])
        );
        // History drops the newline.
        assert_eq!(interp.history().latest().unwrap().replacement, "( ");
    }

    #[test]
    fn translate_records_history() {
        let mut interp = active();
        feed(&mut interp, "parse x equals y");
        interp.parse();
        assert_eq!(interp.history().len(), 1);
        assert_eq!(interp.history().latest().unwrap().replacement, "x = y");
    }

    #[test]
    fn chars_to_delete_never_exceeds_buffer() {
        let mut interp = active();
        feed(&mut interp, "héllo parse équals");
        let len = interp.buffer_len();
        let ops = interp.parse().unwrap();
        assert!(ops.iter().all(|op| op.chars_to_delete() <= len));
    }

    // ---- repeat ---

    #[test]
    fn repeat_replays_latest_command() {
        let mut interp = active();
        feed(&mut interp, "parse x equals y");
        interp.parse();
        feed(&mut interp, "parse open paren");
        interp.parse();

        feed(&mut interp, "repeat");
        assert_eq!(
            interp.parse(),
            Some(vec![EditOperation::scrub(6), EditOperation::insert("(")])
        );
        assert_eq!(interp.buffer(), "");
    }

    #[test]
    fn repeat_with_empty_history_is_noop() {
        let mut interp = active();
        feed(&mut interp, "repeat");
        assert_eq!(interp.parse(), Some(vec![]));
        assert_eq!(interp.buffer(), "");
    }

    #[test]
    fn repeat_is_ignored_while_inactive() {
        let mut interp = CommandInterpreter::new(table());
        feed(&mut interp, "repeat");
        assert_eq!(interp.parse(), None);
    }

    // ---- history bound ---

    #[test]
    fn history_evicts_oldest_after_capacity() {
        let mut interp = active();
        for i in 1..=21 {
            feed(&mut interp, &format!("parse cmd{i}"));
            assert!(interp.parse().is_some());
        }
        assert_eq!(interp.history().len(), 20);
        assert_eq!(interp.history().latest().unwrap().replacement, "cmd21");
        assert!(interp.history().iter().all(|c| c.replacement != "cmd1"));
    }

    // ---- bindings ---

    #[test]
    fn set_bindings_keeps_state() {
        let mut interp = active();
        feed(&mut interp, "zap");
        interp.set_bindings(Arc::new(BindingTable {
            trigger_words: vec!["zap".into()],
            ..BindingTable::default()
        }));
        assert!(interp.is_active());
        feed(&mut interp, " it");
        assert_eq!(interp.parse(), Some(vec![EditOperation::translate("it", 6)]));
    }
}
