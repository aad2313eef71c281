//! Ports - interfaces the dialogue application depends on.
//!
//! The only outbound dependency of this system is text generation: a backend
//! that can rephrase scripted replies in natural language. Everything else is
//! deterministic and lives in the domain.

mod text_generator;

pub use text_generator::{GenerationError, HistoryEntry, Role, TextGenerator};
