//! Shared value objects and error types.

mod completion;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use completion::CompletionRate;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::SessionId;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
