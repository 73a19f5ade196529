//! Editor glue for speech-type.
//!
//! A [`Session`] owns one [`CommandInterpreter`] and connects it to the host:
//!
//! ```text
//! ModificationEvent
//!        │
//!        ├─ OwnCommandReplay / Other ──▶ ignored
//!        │
//!        └─ Insert { characters }
//!              │
//!              ├─ add_char(newest char)
//!              ├─ scope gate: first BindingProfile matching the scopes
//!              ├─ parse()
//!              └─ EditApplier::apply_all(surface, ops)
//! ```
//!
//! [`CommandInterpreter`]: crate::interpreter::CommandInterpreter

pub mod event;
pub mod runner;

pub use event::ModificationEvent;
pub use runner::Session;
