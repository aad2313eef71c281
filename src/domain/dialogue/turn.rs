//! Append-only turn history with bounded retention.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::extraction::ExtractedEntities;
use crate::domain::foundation::Timestamp;

/// Maximum turns retained per conversation; the oldest entry is evicted
/// beyond this. The only resource bound the core enforces itself.
pub const MAX_RETAINED_TURNS: usize = 20;

/// One processed user turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub timestamp: Timestamp,
    pub user_text: String,
    /// Policy state name at the time the turn was received.
    pub state_label: String,
    pub entities: ExtractedEntities,
}

impl ConversationTurn {
    /// Records a turn at the current moment.
    pub fn now(user_text: impl Into<String>, state_label: impl Into<String>, entities: ExtractedEntities) -> Self {
        Self {
            timestamp: Timestamp::now(),
            user_text: user_text.into(),
            state_label: state_label.into(),
            entities,
        }
    }
}

/// Append-only log of conversation turns, capped at [`MAX_RETAINED_TURNS`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnLog {
    turns: VecDeque<ConversationTurn>,
}

impl TurnLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn, evicting the oldest when the cap is exceeded.
    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push_back(turn);
        while self.turns.len() > MAX_RETAINED_TURNS {
            self.turns.pop_front();
        }
    }

    /// Number of retained turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns true if no turn has been recorded.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Oldest retained turn.
    pub fn first(&self) -> Option<&ConversationTurn> {
        self.turns.front()
    }

    /// Most recent turn.
    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.back()
    }

    /// Iterates oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }

    /// Drops all retained turns.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
