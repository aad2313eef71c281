//! Next-action decisions emitted by the dialogue policies.

use serde::{Deserialize, Serialize};

use crate::domain::slots::SlotId;

/// Why a conversation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// All required information was collected (or the funnel completed).
    Success,
    /// The user declined or sentiment turned negative.
    UserRejected,
    /// The user never gave a usable answer to the permission question.
    Unresponsive,
}

/// What the conversation should do next, decided after each turn.
///
/// `ContinueConversation` is the only variant whose message is expected to be
/// rephrased by the text-generation fallback; every other variant carries
/// final user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action_type", rename_all = "snake_case")]
pub enum NextAction {
    /// Close the conversation with a parting message.
    EndConversation { message: String, reason: EndReason },
    /// Ask for a specific slot, or re-ask for permission when `slot_id`
    /// is `None` (phone permission phase targets no slot).
    AskQuestion {
        slot_id: Option<SlotId>,
        question: String,
    },
    /// Offer the fixed candidate appointment times.
    BookAppointment {
        message: String,
        candidate_slots: Vec<String>,
    },
    /// Keep talking; the message is a state-transition hint for the
    /// text-generation fallback.
    ContinueConversation { message: String },
}

impl NextAction {
    /// Returns true if this action closes the conversation.
    pub fn ends_conversation(&self) -> bool {
        matches!(self, Self::EndConversation { .. })
    }

    /// The user-facing text carried by this action, before any
    /// text-generation naturalization.
    pub fn message(&self) -> &str {
        match self {
            Self::EndConversation { message, .. } => message,
            Self::AskQuestion { question, .. } => question,
            Self::BookAppointment { message, .. } => message,
            Self::ContinueConversation { message } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_end_conversation_ends_the_conversation() {
        let end = NextAction::EndConversation {
            message: "ありがとうございました。".to_string(),
            reason: EndReason::Success,
        };
        let ask = NextAction::AskQuestion {
            slot_id: Some("email".into()),
            question: "メールアドレスを教えていただけますか？".to_string(),
        };
        assert!(end.ends_conversation());
        assert!(!ask.ends_conversation());
    }

    #[test]
    fn message_returns_the_carried_text() {
        let action = NextAction::ContinueConversation {
            message: "まずは、現在の状況についてお聞かせください。".to_string(),
        };
        assert_eq!(action.message(), "まずは、現在の状況についてお聞かせください。");
    }

    #[test]
    fn serializes_with_action_type_tag() {
        let action = NextAction::BookAppointment {
            message: "アポイントの調整をさせていただきたいのですが、".to_string(),
            candidate_slots: vec!["明日の午前中".to_string()],
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["action_type"], "book_appointment");
    }

    #[test]
    fn end_reason_serializes_snake_case() {
        let json = serde_json::to_string(&EndReason::UserRejected).unwrap();
        assert_eq!(json, "\"user_rejected\"");
    }
}
