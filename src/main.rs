//! Command-line driver for speech-type.
//!
//! Reads dictated text from stdin, feeds it to a [`Session`] one character at
//! a time as an editor would, and prints the resulting document.
//!
//! ```text
//! echo "speech type on x equals one parse" | speech-type source.python
//! ```
//!
//! # Startup sequence
//!
//! 1. Load [`AppConfig`] from disk (defaults on first run).
//! 2. Initialise logging with the configured filter.
//! 3. Build the [`Session`] and an empty [`TextDocument`].
//! 4. Replay stdin through the session, then print the document.

use std::collections::BTreeSet;
use std::io::Read;

use anyhow::Context;
use speech_type::{
    config::AppConfig,
    edit::TextDocument,
    session::{ModificationEvent, Session},
};

const DEFAULT_SCOPE: &str = "source.python";

fn main() -> anyhow::Result<()> {
    // --- Config + logging ----------------------------------------------------
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log.filter.as_str()),
    )
    .init();
    log::info!("speech-type starting up");

    if let Some(e) = load_error {
        log::warn!("Failed to load config ({e:#}); using defaults");
    }

    // --- Scope ---------------------------------------------------------------
    let scopes: BTreeSet<String> = {
        let names: Vec<String> = std::env::args().skip(1).collect();
        if names.is_empty() {
            [DEFAULT_SCOPE.to_owned()].into()
        } else {
            names.into_iter().collect()
        }
    };
    log::debug!("scopes: {scopes:?}");

    // --- Replay stdin ----------------------------------------------------------
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let mut session = Session::new(&config);
    let mut doc = TextDocument::default();

    for ch in input.chars() {
        doc.type_str(&ch.to_string())?;
        // Keep going like an editor would; the session already logged the error.
        if let Err(e) = session.on_modified(&mut doc, &ModificationEvent::typed(ch), &scopes) {
            log::debug!("skipping failed edit at {ch:?}: {e}");
        }
    }

    print!("{}", doc.text());
    Ok(())
}
