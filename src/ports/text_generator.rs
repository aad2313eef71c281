//! Text Generator Port - outbound port for LLM-backed reply naturalization.
//!
//! The orchestrator hands this port a scripted hint plus recent history and
//! gets back conversational Japanese. Implementations wrap whatever backend
//! a deployment uses; a failing backend never breaks a conversation because
//! the caller falls back to the scripted hint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Who said a history line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One line of recent conversation handed to the generator as context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

impl HistoryEntry {
    /// A user line.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// An assistant line.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Errors a text-generation backend can produce.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation backend unavailable: {0}")]
    Unavailable(String),

    #[error("generation request failed: {0}")]
    RequestFailed(String),

    #[error("generation response was empty")]
    EmptyResponse,
}

/// Outbound port for naturalizing scripted replies.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Rewrites `prompt` as a natural conversational reply, given recent
    /// history (oldest first).
    ///
    /// # Errors
    /// Returns `GenerationError` when the backend cannot produce text; the
    /// caller is expected to fall back to the scripted prompt.
    async fn generate(
        &self,
        prompt: &str,
        history: &[HistoryEntry],
    ) -> Result<String, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_constructors_set_roles() {
        let user = HistoryEntry::user("こんにちは");
        let assistant = HistoryEntry::assistant("いらっしゃいませ");
        assert_eq!(user.role, Role::User);
        assert_eq!(assistant.role, Role::Assistant);
    }

    #[test]
    fn role_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    }

    #[test]
    fn errors_render_their_context() {
        let err = GenerationError::Unavailable("timeout".to_string());
        assert!(err.to_string().contains("timeout"));
    }
}
