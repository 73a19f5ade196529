//! Edit operations emitted by [`CommandInterpreter::parse`].
//!
//! [`CommandInterpreter::parse`]: crate::interpreter::CommandInterpreter::parse

/// Delete the last `chars_to_delete` characters typed before the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrubCommand {
    pub chars_to_delete: usize,
}

/// Replace the last `chars_to_delete` characters with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateCommand {
    pub replacement: String,
    pub chars_to_delete: usize,
}

/// Insert `replacement` at the cursor without deleting anything.
///
/// These are what the command history records and "repeat" replays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertCommand {
    pub replacement: String,
}

/// One edit the host should perform, in the order returned by `parse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOperation {
    Scrub(ScrubCommand),
    Translate(TranslateCommand),
    Insert(InsertCommand),
}

impl EditOperation {
    /// Shorthand for a [`ScrubCommand`].
    pub fn scrub(chars_to_delete: usize) -> Self {
        Self::Scrub(ScrubCommand { chars_to_delete })
    }

    /// Shorthand for a [`TranslateCommand`].
    pub fn translate(replacement: impl Into<String>, chars_to_delete: usize) -> Self {
        Self::Translate(TranslateCommand {
            replacement: replacement.into(),
            chars_to_delete,
        })
    }

    /// Shorthand for an [`InsertCommand`].
    pub fn insert(replacement: impl Into<String>) -> Self {
        Self::Insert(InsertCommand {
            replacement: replacement.into(),
        })
    }

    /// Characters to delete before the cursor (`0` for inserts).
    pub fn chars_to_delete(&self) -> usize {
        match self {
            Self::Scrub(cmd) => cmd.chars_to_delete,
            Self::Translate(cmd) => cmd.chars_to_delete,
            Self::Insert(_) => 0,
        }
    }

    /// Text written in place of the deleted span (empty for scrubs).
    pub fn replacement(&self) -> &str {
        match self {
            Self::Scrub(_) => "",
            Self::Translate(cmd) => &cmd.replacement,
            Self::Insert(cmd) => &cmd.replacement,
        }
    }
}

impl From<InsertCommand> for EditOperation {
    fn from(cmd: InsertCommand) -> Self {
        Self::Insert(cmd)
    }
}
