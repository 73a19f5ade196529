//! In-memory [`EditSurface`] — a string plus a set of selections.
//!
//! Used by the command-line driver and throughout the tests.

use crate::edit::{EditApplier, EditError, EditSurface, Region};
use crate::interpreter::EditOperation;

/// A plain-text document with one or more selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    text: String,
    selections: Vec<Region>,
}

impl TextDocument {
    /// Document containing `text` with a single caret at offset 0.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selections: vec![Region::caret(0)],
        }
    }

    /// Document containing `text` with a single caret after the last char.
    pub fn with_cursor_at_end(text: impl Into<String>) -> Self {
        let mut doc = Self::new(text);
        doc.selections = vec![Region::caret(doc.len_chars())];
        doc
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Type `text` at every cursor, as a user would.
    pub fn type_str(&mut self, text: &str) -> Result<(), EditError> {
        EditApplier::default()
            .apply(self, &EditOperation::insert(text))
            .map(|_| ())
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(byte, _)| byte)
    }
}

impl Default for TextDocument {
    fn default() -> Self {
        Self::new("")
    }
}

impl EditSurface for TextDocument {
    fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    fn selections(&self) -> Vec<Region> {
        self.selections.clone()
    }

    fn replace(&mut self, region: Region, text: &str) {
        let start = self.byte_offset(region.begin());
        let end = self.byte_offset(region.end());
        self.text.replace_range(start..end, text);
    }

    fn set_selections(&mut self, selections: Vec<Region>) {
        self.selections = selections;
    }
}
