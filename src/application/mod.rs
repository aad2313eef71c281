//! Application layer - session orchestration over the dialogue domain.

mod orchestrator;

pub use orchestrator::{Orchestrator, PolicyKind, TurnOutcome};
