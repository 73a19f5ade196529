//! Applying edit operations to a text surface.
//!
//! # Overview
//!
//! The interpreter only says *what* to change ("delete the last 12
//! characters, write `x = 1`").  This module performs the change against an
//! [`EditSurface`] for every cursor it has:
//!
//! 1. **Validate** the replacement's cursor placeholder (at most one).
//! 2. **Compute** a deletion span of `chars_to_delete` characters ending at
//!    each selection.
//! 3. **Replace** the spans in descending position order so earlier edits do
//!    not shift the offsets of later ones.
//! 4. **Reposition** each cursor at the placeholder, or after the inserted
//!    text.
//!
//! All validation happens before the first mutation, so a failed apply
//! leaves the surface untouched.
//!
//! # Usage
//!
//! ```rust
//! use speech_type::edit::{EditApplier, TextDocument};
//! use speech_type::interpreter::EditOperation;
//!
//! let mut doc = TextDocument::with_cursor_at_end("x parse print hi");
//! let applier = EditApplier::new(Some("$0".to_owned()));
//! applier
//!     .apply(&mut doc, &EditOperation::translate("print($0)", 14))
//!     .unwrap();
//! assert_eq!(doc.text(), "x print()");
//! ```

pub mod applier;
pub mod document;

pub use applier::EditApplier;
pub use document::TextDocument;

use thiserror::Error;

// ---------------------------------------------------------------------------
// EditError
// ---------------------------------------------------------------------------

/// Errors surfaced while applying an edit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    /// The replacement contains the cursor placeholder more than once.
    #[error("more than one cursor placeholder ({count}) in {replacement:?}")]
    MultiplePlaceholders { count: usize, replacement: String },

    /// A region ends before it begins, runs past the end of the document, or
    /// overlaps another region being replaced.
    #[error("malformed region {begin}..{end}")]
    MalformedRegion { begin: usize, end: usize },
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A half-open `[begin, end)` span of character offsets.  A caret is an empty
/// region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Region {
    begin: usize,
    end: usize,
}

impl Region {
    /// Build a region, rejecting `end < begin`.
    pub fn new(begin: usize, end: usize) -> Result<Self, EditError> {
        if end < begin {
            return Err(EditError::MalformedRegion { begin, end });
        }
        Ok(Self { begin, end })
    }

    /// An empty region at `pos`.
    pub fn caret(pos: usize) -> Self {
        Self {
            begin: pos,
            end: pos,
        }
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

// ---------------------------------------------------------------------------
// EditSurface
// ---------------------------------------------------------------------------

/// The host text view, as far as the applier needs it.
///
/// Offsets are character offsets.
pub trait EditSurface {
    /// Total document length in characters.
    fn len_chars(&self) -> usize;

    /// Current selections / carets, in any order.
    fn selections(&self) -> Vec<Region>;

    /// Replace `region` with `text`.  An empty region is a pure insert.
    fn replace(&mut self, region: Region, text: &str);

    /// Replace all selections.
    fn set_selections(&mut self, selections: Vec<Region>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_rejects_negative_length() {
        assert_eq!(
            Region::new(5, 2),
            Err(EditError::MalformedRegion { begin: 5, end: 2 })
        );
    }

    #[test]
    fn caret_is_empty() {
        let caret = Region::caret(3);
        assert!(caret.is_empty());
        assert_eq!(caret.len(), 0);
        assert_eq!((caret.begin(), caret.end()), (3, 3));
    }

    #[test]
    fn error_messages_are_readable() {
        let err = EditError::MultiplePlaceholders {
            count: 2,
            replacement: "a$0b$0".into(),
        };
        assert_eq!(
            err.to_string(),
            "more than one cursor placeholder (2) in \"a$0b$0\""
        );
    }
}
