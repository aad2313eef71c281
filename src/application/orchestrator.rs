//! Session orchestration: rule table first, then the policy, then the
//! text-generation fallback for conversational polish.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::config::GenerationConfig;
use crate::domain::dialogue::{
    DialoguePolicy, NextAction, PhonePolicy, QualificationPolicy, StateInfo, MAX_RETAINED_TURNS,
};
use crate::domain::foundation::{CompletionRate, DomainError, ErrorCode, SessionId};
use crate::domain::rules::{RuleAction, RuleSet};
use crate::domain::slots::SlotId;
use crate::ports::{HistoryEntry, TextGenerator};

/// Reply used when neither the policy nor the generator produced text.
const FALLBACK_REPLY: &str = "恐れ入りますが、もう少し詳しくお聞かせいただけますでしょうか？";

/// History lines handed to the generator per call, unless configured.
const GENERATOR_HISTORY_WINDOW: usize = 5;

/// Retained history entries per session; the oldest are evicted beyond
/// this, matching the turn-log bound.
const SESSION_HISTORY_CAP: usize = MAX_RETAINED_TURNS;

/// Which dialogue policy a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    /// The chat qualification funnel.
    Qualification,
    /// The voice-call permission/collect machine.
    Phone,
}

impl PolicyKind {
    fn build(&self) -> Box<dyn DialoguePolicy> {
        match self {
            Self::Qualification => Box::new(QualificationPolicy::new()),
            Self::Phone => Box::new(PhonePolicy::new()),
        }
    }
}

/// Result of processing one user turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub reply_text: String,
    pub state: StateInfo,
    pub done: bool,
    pub missing_slots: Vec<SlotId>,
    pub completion_rate: CompletionRate,
}

struct Session {
    policy: Box<dyn DialoguePolicy>,
    history: Vec<HistoryEntry>,
    closed_by_rule: bool,
}

impl Session {
    fn new(kind: PolicyKind) -> Self {
        Self {
            policy: kind.build(),
            history: Vec::new(),
            closed_by_rule: false,
        }
    }

    fn is_done(&self) -> bool {
        self.closed_by_rule || self.policy.is_done()
    }

    /// Appends a history line, evicting the oldest beyond the cap.
    fn push_history(&mut self, entry: HistoryEntry) {
        self.history.push(entry);
        if self.history.len() > SESSION_HISTORY_CAP {
            let excess = self.history.len() - SESSION_HISTORY_CAP;
            self.history.drain(..excess);
        }
    }

    fn history_tail(&self, window: usize) -> &[HistoryEntry] {
        let start = self.history.len().saturating_sub(window);
        &self.history[start..]
    }
}

/// Drives many concurrent conversations over one rule table and one
/// text-generation backend.
///
/// Per turn: the rule table answers FAQ-style keywords outright, otherwise
/// the session's policy decides the next action, and only plain
/// continue-conversation replies are handed to the generator for
/// naturalization. A generator failure degrades to the scripted text, never
/// to an error reaching the caller.
pub struct Orchestrator<G> {
    sessions: HashMap<SessionId, Session>,
    rules: RuleSet,
    generator: G,
    history_window: usize,
}

impl<G: TextGenerator> Orchestrator<G> {
    /// Creates an orchestrator with an empty rule table.
    pub fn new(generator: G) -> Self {
        Self::with_rules(generator, RuleSet::default())
    }

    /// Creates an orchestrator with a pre-loaded rule table.
    pub fn with_rules(generator: G, rules: RuleSet) -> Self {
        Self {
            sessions: HashMap::new(),
            rules,
            generator,
            history_window: GENERATOR_HISTORY_WINDOW,
        }
    }

    /// Creates an orchestrator tuned from generation settings.
    pub fn with_config(generator: G, rules: RuleSet, config: &GenerationConfig) -> Self {
        Self {
            history_window: config.history_window,
            ..Self::with_rules(generator, rules)
        }
    }

    /// Opens a new session and returns its id.
    pub fn start_session(&mut self, kind: PolicyKind) -> SessionId {
        let session_id = SessionId::new();
        self.sessions.insert(session_id, Session::new(kind));
        info!(session = %session_id, "session started");
        session_id
    }

    /// Opens a session under a caller-chosen id if none exists yet.
    ///
    /// Telephony callers arrive with their own call id; the first turn of a
    /// call creates the session in place. Returns true when a new session
    /// was created.
    pub fn ensure_session(&mut self, session_id: SessionId, kind: PolicyKind) -> bool {
        if self.sessions.contains_key(&session_id) {
            return false;
        }
        self.sessions.insert(session_id, Session::new(kind));
        info!(session = %session_id, "session started");
        true
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Processes one user turn for a session.
    ///
    /// # Errors
    /// `SessionNotFound` for an unknown id, `ConversationEnded` when the
    /// session has already closed.
    pub async fn process_turn(
        &mut self,
        session_id: &SessionId,
        user_text: &str,
    ) -> Result<TurnOutcome, DomainError> {
        let session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| DomainError::session_not_found(session_id))?;
        if session.is_done() {
            return Err(
                DomainError::new(ErrorCode::ConversationEnded, "Conversation already ended")
                    .with_detail("session_id", session_id.to_string()),
            );
        }

        session.push_history(HistoryEntry::user(user_text));

        let (reply_text, done) = if let Some(matched) = self.rules.respond(user_text) {
            info!(session = %session_id, rule = matched.rule_id, "rule matched");
            let done = matched.action == RuleAction::EndConversation;
            session.closed_by_rule = done;
            (matched.response.to_string(), done)
        } else {
            let decision = session.policy.next_turn(user_text);
            let reply = match decision.action {
                NextAction::ContinueConversation { message } => {
                    match self
                        .generator
                        .generate(&message, session.history_tail(self.history_window))
                        .await
                    {
                        Ok(text) if !text.trim().is_empty() => text,
                        Ok(_) => scripted_or_fallback(message),
                        Err(error) => {
                            warn!(session = %session_id, %error, "text generation failed, using scripted reply");
                            scripted_or_fallback(message)
                        }
                    }
                }
                other => other.message().to_string(),
            };
            (reply, decision.done)
        };

        session.push_history(HistoryEntry::assistant(&reply_text));

        Ok(TurnOutcome {
            reply_text,
            done,
            state: session.policy.state_info(),
            missing_slots: session.policy.missing_slots(),
            completion_rate: session.policy.completion_rate(),
        })
    }

    /// Externally assigns a slot value in a session, e.g. from an operator
    /// UI. Returns `Ok(false)` when the value was rejected or the slot was
    /// already filled.
    pub fn fill_slot(
        &mut self,
        session_id: &SessionId,
        slot_id: &SlotId,
        value: &str,
    ) -> Result<bool, DomainError> {
        self.sessions
            .get_mut(session_id)
            .ok_or_else(|| DomainError::session_not_found(session_id))?
            .policy
            .fill_slot(slot_id, value)
    }

    /// Current externally visible state of a session.
    pub fn status(&self, session_id: &SessionId) -> Result<StateInfo, DomainError> {
        self.sessions
            .get(session_id)
            .map(|session| session.policy.state_info())
            .ok_or_else(|| DomainError::session_not_found(session_id))
    }

    /// Exports a session's conversation data as pretty JSON.
    pub fn export_session_json(&self, session_id: &SessionId) -> Result<String, DomainError> {
        self.sessions
            .get(session_id)
            .ok_or_else(|| DomainError::session_not_found(session_id))?
            .policy
            .export_json()
    }

    /// Restores a session to its initial state.
    pub fn reset_session(&mut self, session_id: &SessionId) -> Result<(), DomainError> {
        let session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| DomainError::session_not_found(session_id))?;
        session.policy.reset();
        session.history.clear();
        session.closed_by_rule = false;
        Ok(())
    }

    /// Closes and removes a session.
    pub fn end_session(&mut self, session_id: &SessionId) -> Result<(), DomainError> {
        self.sessions
            .remove(session_id)
            .map(|_| info!(session = %session_id, "session ended"))
            .ok_or_else(|| DomainError::session_not_found(session_id))
    }

    /// Canned operator-assist suggestions keyed off the user utterance.
    pub fn suggested_responses(&self, user_input: &str) -> Vec<String> {
        let contains_any = |words: &[&str]| words.iter().any(|word| user_input.contains(word));

        if contains_any(&["忙しい", "時間がない"]) {
            vec![
                "お忙しい中、お時間をいただきありがとうございます。簡潔にご説明いたします。".to_string(),
                "お時間がないとのことですので、要点のみお伝えいたします。".to_string(),
            ]
        } else if contains_any(&["興味", "詳しく"]) {
            vec![
                "ご興味を持っていただきありがとうございます。詳しくご説明いたします。".to_string(),
                "ぜひ詳しくお聞かせください。弊社の解決策をご紹介いたします。".to_string(),
            ]
        } else if contains_any(&["価格", "いくら"]) {
            vec![
                "価格について詳しくご説明いたします。まず現在の状況をお聞かせください。".to_string(),
                "価格は数量や条件によって変わります。現在の仕入量を教えていただけますか？".to_string(),
            ]
        } else {
            Vec::new()
        }
    }
}

fn scripted_or_fallback(message: String) -> String {
    if message.trim().is_empty() {
        FALLBACK_REPLY.to_string()
    } else {
        message
    }
}
