//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (settings + bindings):
//!   Windows: %APPDATA%\speech-type\
//!   macOS:   ~/Library/Application Support/speech-type/
//!   Linux:   ~/.config/speech-type/

use std::path::{Path, PathBuf};

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml` and `bindings.json`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Full path to `bindings.json`.
    pub bindings_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "speech-type";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);
        Self::in_dir(config_dir)
    }

    /// Paths rooted at an explicit directory (useful for tests).
    pub fn in_dir(config_dir: impl AsRef<Path>) -> Self {
        let config_dir = config_dir.as_ref().to_path_buf();
        Self {
            settings_file: config_dir.join("settings.toml"),
            bindings_file: config_dir.join("bindings.json"),
            config_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
