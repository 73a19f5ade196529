//! Application settings structs, defaults and persistence.
//!
//! `settings.toml` holds the application settings including the binding
//! profiles.  An optional `bindings.json` next to it — shaped like an editor
//! settings file, `{ "cursor_placeholder": ..., "bindings": [...] }` — takes
//! precedence for the profiles and placeholder when present.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::interpreter::{BindingProfile, DEFAULT_HISTORY_SIZE};

// ---------------------------------------------------------------------------
// LogConfig
// ---------------------------------------------------------------------------

/// Logging settings for the command-line driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default `env_logger` filter, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// BindingsFile
// ---------------------------------------------------------------------------

/// Contents of `bindings.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingsFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor_placeholder: Option<String>,
    pub bindings: Vec<BindingProfile>,
}

impl BindingsFile {
    /// Parse a bindings file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Write a bindings file, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use speech_type::config::AppConfig;
///
/// // Load (returns Default when no file exists)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Marker in replacement text that positions the cursor, e.g. `"$0"`.
    pub cursor_placeholder: Option<String>,
    /// Number of commands kept for "repeat".
    pub history_size: usize,
    /// Logging settings.
    pub log: LogConfig,
    /// Binding profiles, tried in order against the edit's scopes.
    pub profiles: Vec<BindingProfile>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cursor_placeholder: Some("$0".into()),
            history_size: DEFAULT_HISTORY_SIZE,
            log: LogConfig::default(),
            profiles: vec![BindingProfile::python_default()],
        }
    }
}

impl AppConfig {
    /// Load configuration from the platform-appropriate directory.
    ///
    /// Returns `Ok(AppConfig::default())` when no file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_with(&AppPaths::new())
    }

    /// Load `settings.toml`, then apply `bindings.json` when present.
    pub fn load_with(paths: &AppPaths) -> Result<Self> {
        let mut config = Self::load_from(&paths.settings_file)?;
        if paths.bindings_file.exists() {
            let file = BindingsFile::load_from(&paths.bindings_file)?;
            log::info!(
                "loaded {} binding profile(s) from {}",
                file.bindings.len(),
                paths.bindings_file.display()
            );
            config.apply_bindings_file(file);
        }
        Ok(config)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Replace profiles (and the placeholder, when set) with a bindings file.
    pub fn apply_bindings_file(&mut self, file: BindingsFile) {
        if file.cursor_placeholder.is_some() {
            self.cursor_placeholder = file.cursor_placeholder;
        }
        self.profiles = file.bindings;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
