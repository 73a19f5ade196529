//! Binding tables — the trigger words and substitution maps the interpreter
//! looks up while parsing.
//!
//! A [`BindingTable`] is supplied once per session and is read-only
//! afterwards.  Substitution maps are kept in **document order** because
//! replacements are applied one key after another: a later key sees the
//! output of every earlier key.
//!
//! ```text
//! [[profiles]]
//! syntax_list   = ["source.python", "Python"]
//! trigger_words = ["parse", "horse", "parts"]
//!
//! [profiles.letters]
//! alpha = "a"
//! bravo = "b"
//!
//! [profiles.keymaps]
//! "open paren" = "("
//! ```

use std::collections::BTreeSet;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// SubstitutionTable
// ---------------------------------------------------------------------------

/// An ordered list of `(key, replacement)` pairs.
///
/// Serialised as a plain map; deserialisation keeps the order in which the
/// keys appear in the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionTable {
    entries: Vec<(String, String)>,
}

impl SubstitutionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.  An existing key keeps its position and takes the new
    /// replacement.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Look up the replacement for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every occurrence of every key, one key at a time in table
    /// order.  Empty keys are skipped.
    pub fn apply(&self, text: &str) -> String {
        self.entries
            .iter()
            .filter(|(key, _)| !key.is_empty())
            .fold(text.to_owned(), |acc, (key, value)| acc.replace(key.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SubstitutionTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}

impl Serialize for SubstitutionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SubstitutionTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = SubstitutionTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of phrase to replacement text")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut table = SubstitutionTable::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    table.insert(key, value);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

// ---------------------------------------------------------------------------
// BindingTable
// ---------------------------------------------------------------------------

/// Trigger words plus the two substitution maps used by
/// [`CommandInterpreter`](crate::interpreter::CommandInterpreter).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindingTable {
    /// Phrases that begin a parseable command (homophones included).
    #[serde(default, alias = "parse_words")]
    pub trigger_words: Vec<String>,
    /// Spoken letter name → character(s); only used by "letters" commands.
    #[serde(default)]
    pub letters: SubstitutionTable,
    /// Spoken phrase → literal replacement text.
    #[serde(default, alias = "python_keymaps")]
    pub keymaps: SubstitutionTable,
}

impl BindingTable {
    /// The first configured trigger word contained in `text`.
    pub fn find_trigger(&self, text: &str) -> Option<&str> {
        self.trigger_words
            .iter()
            .map(String::as_str)
            .find(|word| !word.is_empty() && text.contains(word))
    }

    /// Bindings tuned for dictating Python.
    pub fn python_defaults() -> Self {
        let trigger_words = ["parse", "horse", "parts"]
            .iter()
            .map(|w| (*w).to_owned())
            .collect();

        let letters = [
            ("alpha", "a"),
            ("bravo", "b"),
            ("charlie", "c"),
            ("delta", "d"),
            ("echo", "e"),
            ("foxtrot", "f"),
            ("golf", "g"),
            ("hotel", "h"),
            ("india", "i"),
            ("juliet", "j"),
            ("kilo", "k"),
            ("lima", "l"),
            ("mike", "m"),
            ("november", "n"),
            ("oscar", "o"),
            ("papa", "p"),
            ("quebec", "q"),
            ("romeo", "r"),
            ("sierra", "s"),
            ("tango", "t"),
            ("uniform", "u"),
            ("victor", "v"),
            ("whiskey", "w"),
            ("x-ray", "x"),
            ("yankee", "y"),
            ("zulu", "z"),
            ("underscore", "_"),
        ]
        .into_iter()
        .collect();

        // Longer phrases first so "open paren" is consumed before "paren".
        let keymaps = [
            ("open paren", "("),
            ("close paren", ")"),
            ("open bracket", "["),
            ("close bracket", "]"),
            ("open brace", "{"),
            ("close brace", "}"),
            ("new line", "\n"),
            ("define", "def "),
            ("print", "print($0)"),
            ("equals", "="),
            ("colon", ":"),
            ("comma", ","),
        ]
        .into_iter()
        .collect();

        Self {
            trigger_words,
            letters,
            keymaps,
        }
    }
}

// ---------------------------------------------------------------------------
// BindingProfile
// ---------------------------------------------------------------------------

/// A [`BindingTable`] together with the scopes / syntax names it applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingProfile {
    /// Source scopes (`source.python`) or syntax names (`Python`) this profile
    /// is enabled for.
    #[serde(default)]
    pub syntax_list: Vec<String>,
    /// The bindings themselves.
    #[serde(flatten)]
    pub table: BindingTable,
}

impl BindingProfile {
    /// Returns `true` when any entry of `syntax_list` is in `scopes`.
    pub fn matches(&self, scopes: &BTreeSet<String>) -> bool {
        self.syntax_list.iter().any(|s| scopes.contains(s))
    }

    /// The default Python profile.
    pub fn python_default() -> Self {
        Self {
            syntax_list: vec!["source.python".to_owned(), "Python".to_owned()],
            table: BindingTable::python_defaults(),
        }
    }
}

impl Default for BindingProfile {
    fn default() -> Self {
        Self::python_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
