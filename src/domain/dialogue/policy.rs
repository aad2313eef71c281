//! The common contract both dialogue policies satisfy.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CompletionRate, DomainError};
use crate::domain::slots::SlotId;

use super::{NextAction, Sentiment, TurnLog};

/// Outcome of feeding one user turn to a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnDecision {
    pub action: NextAction,
    /// True once the policy considers the conversation closed; no further
    /// question will be asked.
    pub done: bool,
}

impl TurnDecision {
    /// An ongoing-conversation decision.
    pub fn continuing(action: NextAction) -> Self {
        Self { action, done: false }
    }

    /// A closing decision.
    pub fn closing(action: NextAction) -> Self {
        Self { action, done: true }
    }
}

/// Snapshot of a policy's externally visible state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateInfo {
    /// Machine-readable state name (snake_case).
    pub state: String,
    /// Human-readable Japanese label.
    pub state_label: String,
    pub completion_rate: CompletionRate,
    pub next_required_slot: Option<SlotId>,
    pub sentiment: Sentiment,
}

/// A slot-filling dialogue state machine.
///
/// Both the qualification funnel and the phone permission/collect machine
/// implement this, sharing the slot store and entity extractor underneath.
/// One instance owns the state of exactly one conversation and is driven by
/// a single logical turn-processing call at a time.
pub trait DialoguePolicy: Send {
    /// Processes one user turn: extraction, state transition, next action.
    fn next_turn(&mut self, user_text: &str) -> TurnDecision;

    /// Current externally visible state.
    fn state_info(&self) -> StateInfo;

    /// Externally assigns a slot value, e.g. from an operator UI.
    ///
    /// Returns `Ok(false)` when the validator rejects the value or the slot
    /// is already filled; unknown slots are an error.
    fn fill_slot(&mut self, slot_id: &SlotId, value: &str) -> Result<bool, DomainError>;

    /// Required slots still missing, in ask-priority order.
    fn missing_slots(&self) -> Vec<SlotId>;

    /// Completion of the required slot set.
    fn completion_rate(&self) -> CompletionRate;

    /// The bounded turn history.
    fn turn_log(&self) -> &TurnLog;

    /// Exports the conversation state and retained history as pretty JSON.
    fn export_json(&self) -> Result<String, DomainError>;

    /// Returns true once the conversation is closed.
    fn is_done(&self) -> bool;

    /// Restores the policy to its initial state, clearing slots and history.
    fn reset(&mut self);
}
