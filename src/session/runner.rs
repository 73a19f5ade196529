//! [`Session`] — one editing context's interpreter plus the glue that feeds
//! it and applies its output.

use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, error};

use crate::config::AppConfig;
use crate::edit::{EditApplier, EditError, EditSurface};
use crate::interpreter::{BindingProfile, BindingTable, CommandInterpreter};
use crate::scope::{select_profile, source_scopes, SyntaxCache};
use crate::session::ModificationEvent;

/// Drives a [`CommandInterpreter`] from host modification events.
pub struct Session {
    interpreter: CommandInterpreter,
    profiles: Vec<BindingProfile>,
    tables: Vec<Arc<BindingTable>>,
    current_profile: Option<usize>,
    applier: EditApplier,
    syntax_cache: SyntaxCache,
}

impl Session {
    /// Build a session from the loaded configuration.
    pub fn new(config: &AppConfig) -> Self {
        let profiles = config.profiles.clone();
        let tables: Vec<Arc<BindingTable>> = profiles
            .iter()
            .map(|profile| Arc::new(profile.table.clone()))
            .collect();

        let initial = tables.first().cloned().unwrap_or_default();
        let current_profile = if tables.is_empty() { None } else { Some(0) };

        Self {
            interpreter: CommandInterpreter::with_history_capacity(initial, config.history_size),
            profiles,
            tables,
            current_profile,
            applier: EditApplier::new(config.cursor_placeholder.clone()),
            syntax_cache: SyntaxCache::new(),
        }
    }

    pub fn interpreter(&self) -> &CommandInterpreter {
        &self.interpreter
    }

    pub fn profiles(&self) -> &[BindingProfile] {
        &self.profiles
    }

    /// Source scopes for an edit: cursor scope names plus the file's syntax,
    /// the latter loaded through `load_syntax` at most once per path.
    pub fn scopes_for<S, F>(
        &mut self,
        scope_names: &[S],
        syntax_path: Option<&str>,
        load_syntax: F,
    ) -> BTreeSet<String>
    where
        S: AsRef<str>,
        F: FnOnce(&str) -> Option<String>,
    {
        let syntax = match syntax_path {
            Some(path) => Some(self.syntax_cache.get_or_insert_with(path, load_syntax)),
            None => None,
        };
        source_scopes(scope_names, syntax)
    }

    /// Handle one modification of `surface`.
    ///
    /// Returns `Ok(true)` when the document was edited.
    ///
    /// # Errors
    ///
    /// Propagates [`EditError`] from applying the interpreter's output; the
    /// error is also logged.
    pub fn on_modified<S: EditSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        event: &ModificationEvent,
        scopes: &BTreeSet<String>,
    ) -> Result<bool, EditError> {
        let Some(ch) = event.newest_char() else {
            return Ok(false);
        };

        // Outside every profile the interpreter never sees the character.
        let Some(index) = select_profile(&self.profiles, scopes) else {
            return Ok(false);
        };
        if self.current_profile != Some(index) {
            debug!("switching to binding profile {:?}", self.profiles[index].syntax_list);
            self.interpreter.set_bindings(Arc::clone(&self.tables[index]));
            self.current_profile = Some(index);
        }

        self.interpreter.add_char(ch);

        let Some(ops) = self.interpreter.parse() else {
            return Ok(false);
        };
        if ops.is_empty() {
            return Ok(false);
        }

        self.applier.apply_all(surface, &ops).map(|_| true).map_err(|e| {
            error!("failed to apply speech command: {e}");
            e
        })
    }

    /// Type `text` into `surface` one character at a time, running the
    /// interpreter after each, as a host would.
    pub fn dictate<S: EditSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        text: &str,
        scopes: &BTreeSet<String>,
        type_char: impl Fn(&mut S, char) -> Result<(), EditError>,
    ) -> Result<usize, EditError> {
        let mut edits = 0;
        for ch in text.chars() {
            type_char(surface, ch)?;
            if self.on_modified(surface, &ModificationEvent::typed(ch), scopes)? {
                edits += 1;
            }
        }
        Ok(edits)
    }
}
