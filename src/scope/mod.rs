//! Scope gate — decides which binding profile, if any, applies to an edit.
//!
//! The source scopes of an edit are the `source.*` / `text.*` tokens found in
//! the scope names at each cursor, plus the names of the file's syntax.  A
//! profile applies when its `syntax_list` shares at least one entry with
//! that set.

pub mod syntax;

pub use syntax::{find_syntax_name, SyntaxCache, SyntaxInfo};

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::interpreter::BindingProfile;

static SOURCE_SCOPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:source|text)\.[^\s]+").unwrap());

/// Collect the source scopes for an edit.
///
/// ```rust
/// use speech_type::scope::source_scopes;
///
/// let scopes = source_scopes(&["source.python meta.function.python"], None);
/// assert!(scopes.contains("source.python"));
/// assert!(!scopes.contains("meta.function.python"));
/// ```
pub fn source_scopes<S: AsRef<str>>(scope_names: &[S], syntax: Option<&SyntaxInfo>) -> BTreeSet<String> {
    let mut scopes: BTreeSet<String> = scope_names
        .iter()
        .flat_map(|name| {
            SOURCE_SCOPE_RE
                .find_iter(name.as_ref())
                .map(|m| m.as_str().to_owned())
                .collect::<Vec<_>>()
        })
        .collect();

    if let Some(info) = syntax {
        scopes.extend(info.names().map(str::to_owned));
    }
    scopes
}

/// Index of the first profile applying to `scopes`.
pub fn select_profile(profiles: &[BindingProfile], scopes: &BTreeSet<String>) -> Option<usize> {
    profiles.iter().position(|profile| profile.matches(scopes))
}
