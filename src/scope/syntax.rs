//! Syntax metadata: the file stem and display name of a syntax definition.
//!
//! Syntax definitions come in two formats:
//!
//! | Format            | Name lookup                                   |
//! |-------------------|-----------------------------------------------|
//! | `.tmLanguage`     | `<key>name</key> <string>…</string>` (XML)    |
//! | `.sublime-syntax` | `name: …` at the start of a line (YAML)       |
//!
//! [`SyntaxCache`] memoises the result per syntax path; entries are written
//! once and never updated.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

static NAME_XML_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<key>name</key>\s*<string>(.*?)</string>").unwrap());
static NAME_YAML_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^name\s*:(.*)$").unwrap());

// ---------------------------------------------------------------------------
// SyntaxInfo
// ---------------------------------------------------------------------------

/// What we know about one syntax definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxInfo {
    /// File stem, e.g. `"Python"` for `Packages/Python/Python.sublime-syntax`.
    pub file_name: String,
    /// `name` declared inside the definition, when present.
    pub syntax_name: Option<String>,
}

impl SyntaxInfo {
    /// Build from a syntax path and the definition's contents.
    pub fn from_resource(path: &str, content: &str) -> Self {
        let file_name = Path::new(path)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file_name,
            syntax_name: find_syntax_name(content),
        }
    }

    /// The non-empty names usable as scopes.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.file_name.as_str())
            .chain(self.syntax_name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

/// The `name` declared in a syntax definition, XML or YAML.
pub fn find_syntax_name(content: &str) -> Option<String> {
    let content = content.trim();
    let re = if content.starts_with('<') {
        &*NAME_XML_RE
    } else {
        &*NAME_YAML_RE
    };

    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_owned())
}

// ---------------------------------------------------------------------------
// SyntaxCache
// ---------------------------------------------------------------------------

/// Write-once map from syntax path to [`SyntaxInfo`].
#[derive(Debug, Default)]
pub struct SyntaxCache {
    entries: HashMap<String, SyntaxInfo>,
}

impl SyntaxCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached info for `path`, computing it with `load` on first use.
    ///
    /// `load` receives the path and returns the definition contents; `None`
    /// (resource unavailable) still caches the file stem.
    pub fn get_or_insert_with<F>(&mut self, path: &str, load: F) -> &SyntaxInfo
    where
        F: FnOnce(&str) -> Option<String>,
    {
        self.entries.entry(path.to_owned()).or_insert_with(|| {
            let content = load(path).unwrap_or_default();
            SyntaxInfo::from_resource(path, &content)
        })
    }

    pub fn get(&self, path: &str) -> Option<&SyntaxInfo> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
