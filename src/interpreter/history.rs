//! Bounded, most-recent-first command history.
//!
//! Every successful translate command records a plain [`InsertCommand`] here
//! so that "repeat" can replay it.  The history never grows beyond its
//! capacity; the oldest entry is evicted first.

use std::collections::VecDeque;

use crate::interpreter::command::InsertCommand;

/// Default number of commands kept.
pub const DEFAULT_HISTORY_SIZE: usize = 20;

/// Rolling window of recently inserted commands.
///
/// # Example
/// ```rust
/// use speech_type::interpreter::{CommandHistory, InsertCommand};
///
/// let mut history = CommandHistory::with_capacity(2);
/// for text in ["a", "b", "c"] {
///     history.push(InsertCommand { replacement: text.to_owned() });
/// }
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.latest().unwrap().replacement, "c");
/// ```
#[derive(Debug, Clone)]
pub struct CommandHistory {
    entries: VecDeque<InsertCommand>,
    capacity: usize,
}

impl CommandHistory {
    /// History with [`DEFAULT_HISTORY_SIZE`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_SIZE)
    }

    /// History with `capacity` slots.  A capacity of `0` is raised to `1` so
    /// "repeat" always has something to work with after a translate.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Record `cmd` as the most recent entry, evicting the oldest entries
    /// beyond capacity.
    pub fn push(&mut self, cmd: InsertCommand) {
        self.entries.push_front(cmd);
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// The most recently recorded command, or `None` when nothing has been
    /// recorded yet.
    pub fn latest(&self) -> Option<&InsertCommand> {
        self.entries.front()
    }

    /// Entries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &InsertCommand> {
        self.entries.iter()
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(text: &str) -> InsertCommand {
        InsertCommand {
            replacement: text.to_owned(),
        }
    }

    #[test]
    fn starts_empty() {
        let history = CommandHistory::new();
        assert!(history.is_empty());
        assert!(history.latest().is_none());
        assert_eq!(history.capacity(), DEFAULT_HISTORY_SIZE);
    }

    #[test]
    fn newest_entry_is_first() {
        let mut history = CommandHistory::new();
        history.push(cmd("first"));
        history.push(cmd("second"));

        let order: Vec<_> = history.iter().map(|c| c.replacement.as_str()).collect();
        assert_eq!(order, vec!["second", "first"]);
    }

    #[test]
    fn caps_at_default_size() {
        let mut history = CommandHistory::new();
        for i in 1..=21 {
            history.push(cmd(&format!("cmd{i}")));
        }
        assert_eq!(history.len(), 20);
        assert_eq!(history.latest().unwrap().replacement, "cmd21");
        // cmd1 was evicted; cmd2 is now the oldest.
        assert_eq!(history.iter().last().unwrap().replacement, "cmd2");
    }

    #[test]
    fn zero_capacity_still_keeps_one() {
        let mut history = CommandHistory::with_capacity(0);
        history.push(cmd("a"));
        history.push(cmd("b"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().unwrap().replacement, "b");
    }

    #[test]
    fn clear_empties_history() {
        let mut history = CommandHistory::new();
        history.push(cmd("a"));
        history.clear();
        assert!(history.is_empty());
    }
}
