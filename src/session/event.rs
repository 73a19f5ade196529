//! Modification events reported by the host editor.

/// What the host saw change in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModificationEvent {
    /// The user typed (or dictation inserted) `characters`.  Only the last
    /// character is fed to the interpreter; the host reports one event per
    /// insertion.
    Insert { characters: String },

    /// Undo/redo of an edit this crate made.  Must not be fed back into the
    /// interpreter.
    OwnCommandReplay,

    /// Any other modification (paste, delete, another plugin).
    Other,
}

impl ModificationEvent {
    /// Convenience constructor for a single typed character.
    pub fn typed(ch: char) -> Self {
        Self::Insert {
            characters: ch.to_string(),
        }
    }

    /// The character the interpreter should see, if any.
    pub fn newest_char(&self) -> Option<char> {
        match self {
            Self::Insert { characters } => characters.chars().last(),
            Self::OwnCommandReplay | Self::Other => None,
        }
    }
}
