//! Configuration module for speech-type.
//!
//! Provides `AppConfig` (top-level settings including binding profiles),
//! `BindingsFile` (JSON binding settings), `AppPaths` for cross-platform
//! config directories, and persistence via `AppConfig::load` /
//! `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, BindingsFile, LogConfig};
