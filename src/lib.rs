//! speech-type: turns dictated phrases into editor commands.
//!
//! Characters arrive one at a time from a host editor.  The
//! [`interpreter`] accumulates them and recognises command phrases, the
//! [`edit`] module applies the resulting operations to a text surface, and
//! [`session`] wires the two together behind a language-scope gate.

/// Settings persistence (`settings.toml`, `bindings.json`).
pub mod config;
/// Edit operations applied to an [`edit::EditSurface`].
pub mod edit;
/// Buffer / parser state machine and binding tables.
pub mod interpreter;
/// Source-scope extraction and syntax-name lookup.
pub mod scope;
/// Host glue: modification events to applied edits.
pub mod session;
