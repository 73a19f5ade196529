//! [`EditApplier`] — performs an [`EditOperation`] on every cursor of an
//! [`EditSurface`].

use log::{debug, error, warn};

use crate::edit::{EditError, EditSurface, Region};
use crate::interpreter::EditOperation;

/// Applies edit operations, honouring an optional cursor placeholder.
#[derive(Debug, Clone, Default)]
pub struct EditApplier {
    /// Marker that, when present exactly once in a replacement, is removed
    /// and becomes the new cursor position (e.g. `"$0"`).
    pub cursor_placeholder: Option<String>,
}

impl EditApplier {
    pub fn new(cursor_placeholder: Option<String>) -> Self {
        Self { cursor_placeholder }
    }

    /// Apply `op` at every selection of `surface`.
    ///
    /// Returns the number of regions replaced.
    ///
    /// # Errors
    ///
    /// [`EditError::MultiplePlaceholders`] or [`EditError::MalformedRegion`];
    /// the surface is unchanged in both cases.
    pub fn apply<S: EditSurface + ?Sized>(
        &self,
        surface: &mut S,
        op: &EditOperation,
    ) -> Result<usize, EditError> {
        let (text, placeholder_at) = self.prepare_replacement(op.replacement())?;
        let spans = Self::deletion_spans(surface, op.chars_to_delete())?;

        let text_len = text.chars().count();
        let cursor_in_text = placeholder_at.unwrap_or(text_len);

        // Descending order: each replacement only shifts cursors above it.
        let mut cursors: Vec<usize> = Vec::with_capacity(spans.len());
        for span in &spans {
            surface.replace(*span, &text);
            for cursor in cursors.iter_mut() {
                *cursor = *cursor - span.len() + text_len;
            }
            cursors.push(span.begin() + cursor_in_text);
        }

        cursors.reverse();
        surface.set_selections(cursors.into_iter().map(Region::caret).collect());

        debug!(
            "applied edit: {} region(s), deleted {} char(s), inserted {} char(s)",
            spans.len(),
            op.chars_to_delete(),
            text_len
        );
        Ok(spans.len())
    }

    /// Apply a whole parse result in order, stopping at the first error.
    pub fn apply_all<S: EditSurface + ?Sized>(
        &self,
        surface: &mut S,
        ops: &[EditOperation],
    ) -> Result<usize, EditError> {
        let mut regions = 0;
        for op in ops {
            regions += self.apply(surface, op)?;
        }
        Ok(regions)
    }

    /// Strip the placeholder from `replacement`, returning the text and the
    /// placeholder's char offset when it occurred once.
    fn prepare_replacement(&self, replacement: &str) -> Result<(String, Option<usize>), EditError> {
        let Some(placeholder) = self.cursor_placeholder.as_deref().filter(|p| !p.is_empty()) else {
            return Ok((replacement.to_owned(), None));
        };

        match replacement.matches(placeholder).count() {
            0 => Ok((replacement.to_owned(), None)),
            1 => {
                let byte_idx = replacement.find(placeholder).unwrap_or(replacement.len());
                let char_idx = replacement[..byte_idx].chars().count();
                Ok((replacement.replacen(placeholder, "", 1), Some(char_idx)))
            }
            count => {
                error!("more than one cursor placeholder in {:?}", replacement);
                Err(EditError::MultiplePlaceholders {
                    count,
                    replacement: replacement.to_owned(),
                })
            }
        }
    }

    /// One deletion span per distinct selection, sorted by descending begin.
    fn deletion_spans<S: EditSurface + ?Sized>(
        surface: &S,
        chars_to_delete: usize,
    ) -> Result<Vec<Region>, EditError> {
        let doc_len = surface.len_chars();
        let mut spans = Vec::new();

        for sel in surface.selections() {
            if sel.end() > doc_len {
                return Err(EditError::MalformedRegion {
                    begin: sel.begin(),
                    end: sel.end(),
                });
            }
            let begin = sel.begin().checked_sub(chars_to_delete).unwrap_or_else(|| {
                warn!(
                    "deletion of {} char(s) before offset {} clamped to document start",
                    chars_to_delete,
                    sel.begin()
                );
                0
            });
            spans.push(Region::new(begin, sel.end())?);
        }

        spans.sort_by(|a, b| b.cmp(a));
        spans.dedup();

        for pair in spans.windows(2) {
            let (upper, lower) = (pair[0], pair[1]);
            if lower.end() > upper.begin() {
                return Err(EditError::MalformedRegion {
                    begin: lower.begin(),
                    end: lower.end(),
                });
            }
        }

        Ok(spans)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::TextDocument;

    fn applier() -> EditApplier {
        EditApplier::new(Some("$0".to_owned()))
    }

    #[test]
    fn translate_replaces_tail() {
        let mut doc = TextDocument::with_cursor_at_end("a = parse x equals y");
        applier()
            .apply(&mut doc, &EditOperation::translate("x = y", 16))
            .unwrap();
        assert_eq!(doc.text(), "a = x = y");
        assert_eq!(doc.selections(), vec![Region::caret(9)]);
    }

    #[test]
    fn scrub_deletes_tail() {
        let mut doc = TextDocument::with_cursor_at_end("keep this scrub");
        applier().apply(&mut doc, &EditOperation::scrub(6)).unwrap();
        assert_eq!(doc.text(), "keep this");
    }

    #[test]
    fn insert_does_not_delete() {
        let mut doc = TextDocument::with_cursor_at_end("abc");
        applier().apply(&mut doc, &EditOperation::insert("def")).unwrap();
        assert_eq!(doc.text(), "abcdef");
        assert_eq!(doc.selections(), vec![Region::caret(6)]);
    }

    #[test]
    fn single_placeholder_moves_cursor() {
        let mut doc = TextDocument::with_cursor_at_end("parse print");
        applier()
            .apply(&mut doc, &EditOperation::translate("print($0)", 11))
            .unwrap();
        assert_eq!(doc.text(), "print()");
        assert_eq!(doc.selections(), vec![Region::caret(6)]);
    }

    #[test]
    fn two_placeholders_abort_without_mutation() {
        let mut doc = TextDocument::with_cursor_at_end("before parse pair");
        let before = doc.clone();

        let err = applier()
            .apply(&mut doc, &EditOperation::translate("f($0, $0)", 10))
            .unwrap_err();
        assert!(matches!(err, EditError::MultiplePlaceholders { count: 2, .. }));
        assert_eq!(doc, before);

        // Failing again changes nothing either.
        assert!(applier()
            .apply(&mut doc, &EditOperation::translate("f($0, $0)", 10))
            .is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn no_placeholder_configured_keeps_marker_text() {
        let mut doc = TextDocument::with_cursor_at_end("");
        EditApplier::default()
            .apply(&mut doc, &EditOperation::insert("$0$0"))
            .unwrap();
        assert_eq!(doc.text(), "$0$0");
    }

    #[test]
    fn multiple_cursors_edit_in_descending_order() {
        let mut doc = TextDocument::new("ab parse x\ncd parse x");
        doc.set_selections(vec![Region::caret(10), Region::caret(21)]);

        let regions = applier()
            .apply(&mut doc, &EditOperation::translate("y($0)", 7))
            .unwrap();
        assert_eq!(regions, 2);
        assert_eq!(doc.text(), "ab y()\ncd y()");
        assert_eq!(doc.selections(), vec![Region::caret(5), Region::caret(12)]);
    }

    #[test]
    fn selection_is_replaced_with_its_prefix() {
        let mut doc = TextDocument::new("one two three");
        doc.set_selections(vec![Region::new(4, 7).unwrap()]);
        applier().apply(&mut doc, &EditOperation::translate("2", 1)).unwrap();
        assert_eq!(doc.text(), "one2 three");
    }

    #[test]
    fn deletion_before_start_is_clamped() {
        let mut doc = TextDocument::with_cursor_at_end("abc");
        applier().apply(&mut doc, &EditOperation::scrub(10)).unwrap();
        assert_eq!(doc.text(), "");
        assert_eq!(doc.selections(), vec![Region::caret(0)]);
    }

    #[test]
    fn overlapping_spans_are_rejected() {
        let mut doc = TextDocument::new("abcdef");
        doc.set_selections(vec![Region::caret(3), Region::caret(5)]);
        let before = doc.clone();

        let err = applier().apply(&mut doc, &EditOperation::scrub(3)).unwrap_err();
        assert!(matches!(err, EditError::MalformedRegion { .. }));
        assert_eq!(doc, before);
    }

    #[test]
    fn selection_past_end_is_rejected() {
        let mut doc = TextDocument::new("abc");
        doc.set_selections(vec![Region::caret(10)]);
        assert!(matches!(
            applier().apply(&mut doc, &EditOperation::insert("x")),
            Err(EditError::MalformedRegion { begin: 10, end: 10 })
        ));
        assert_eq!(doc.text(), "abc");
    }

    #[test]
    fn apply_all_runs_in_order() {
        let mut doc = TextDocument::with_cursor_at_end("x = 1repeat");
        let ops = vec![EditOperation::scrub(6), EditOperation::insert("x = 1")];
        applier().apply_all(&mut doc, &ops).unwrap();
        assert_eq!(doc.text(), "x = 1x = 1");
    }

    #[test]
    fn unicode_offsets_are_chars() {
        let mut doc = TextDocument::with_cursor_at_end("café parse é");
        applier()
            .apply(&mut doc, &EditOperation::translate("e", 8))
            .unwrap();
        assert_eq!(doc.text(), "cafée");
        assert_eq!(doc.selections(), vec![Region::caret(5)]);
    }
}
