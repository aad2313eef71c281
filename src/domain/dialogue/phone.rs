//! Voice-call policy: permission check, then contact slot collection.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::extraction::{EntityExtractor, ExtractedEntities};
use crate::domain::foundation::{CompletionRate, DomainError, ErrorCode};
use crate::domain::slots::{contact_form, SlotId, SlotStore};

use super::{
    ConversationTurn, DialoguePolicy, EndReason, NextAction, ResponseComposer, Sentiment,
    StateInfo, TurnDecision, TurnLog,
};

/// Phases of the phone policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhonePhase {
    /// Waiting for permission to pitch.
    Permission,
    /// Collecting the contact form, name then company then address.
    Collect,
}

impl PhonePhase {
    /// Machine-readable snake_case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Permission => "permission",
            Self::Collect => "collect",
        }
    }

    /// Human-readable Japanese label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Permission => "許可確認",
            Self::Collect => "情報収集",
        }
    }
}

/// How a permission answer is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionIntent {
    Accept,
    Decline,
    Unclear,
}

/// Keyword tables for reading the permission answer.
///
/// Decline keywords are checked before accept keywords, so a hedged answer
/// like はい、今はちょっと reads as a decline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentLexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl Default for IntentLexicon {
    fn default() -> Self {
        Self {
            positive: to_strings(&["はい", "お願いします", "大丈夫", "構いません", "どうぞ", "いいですよ"]),
            negative: to_strings(&[
                "いいえ", "今は", "忙しい", "また今度", "後で", "不要", "結構", "間に合って",
                "嫌です", "いりません",
            ]),
        }
    }
}

impl IntentLexicon {
    /// Classifies a permission answer, declines taking precedence.
    pub fn classify(&self, text: &str) -> PermissionIntent {
        if self.negative.iter().any(|word| text.contains(word.as_str())) {
            PermissionIntent::Decline
        } else if self.positive.iter().any(|word| text.contains(word.as_str())) {
            PermissionIntent::Accept
        } else {
            PermissionIntent::Unclear
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}

const DECLINE_MESSAGE: &str =
    "承知いたしました。本日は失礼いたします。お時間をいただき、ありがとうございました。";
const ACCEPT_MESSAGE: &str =
    "ありがとうございます。では、まずご担当者様のお名前をお伺いしてもよろしいでしょうか？";
const REASK_MESSAGE: &str = "30秒ほどで要点だけご案内いたします。今お時間よろしいでしょうか？";
const GIVE_UP_MESSAGE: &str =
    "また改めてご案内いたします。お時間をいただき、ありがとうございました。";

/// The permission-then-collect machine for voice calls.
///
/// One unclear permission answer earns exactly one re-ask; a second unclear
/// answer ends the call politely. Once in the collect phase every turn runs
/// entity extraction and the reply recaps what is already known before
/// asking for the next missing slot.
#[derive(Debug, Clone)]
pub struct PhonePolicy {
    phase: PhonePhase,
    slots: SlotStore,
    extractor: EntityExtractor,
    composer: ResponseComposer,
    intents: IntentLexicon,
    reasked: bool,
    log: TurnLog,
    outcome: Option<TurnDecision>,
}

impl PhonePolicy {
    /// Creates a fresh policy in the permission phase.
    pub fn new() -> Self {
        Self {
            phase: PhonePhase::Permission,
            slots: contact_form(),
            extractor: EntityExtractor::new(),
            composer: ResponseComposer::new(),
            intents: IntentLexicon::default(),
            reasked: false,
            log: TurnLog::new(),
            outcome: None,
        }
    }

    /// Creates a policy with a custom intent lexicon.
    pub fn with_intents(intents: IntentLexicon) -> Self {
        Self {
            intents,
            ..Self::new()
        }
    }

    /// Current phase.
    pub fn phase(&self) -> PhonePhase {
        self.phase
    }

    fn close(&mut self, decision: TurnDecision) -> TurnDecision {
        self.outcome = Some(decision.clone());
        decision
    }

    fn permission_turn(&mut self, user_text: &str) -> TurnDecision {
        match self.intents.classify(user_text) {
            PermissionIntent::Decline => self.close(TurnDecision::closing(
                NextAction::EndConversation {
                    message: DECLINE_MESSAGE.to_string(),
                    reason: EndReason::UserRejected,
                },
            )),
            PermissionIntent::Accept => {
                info!("permission granted, moving to collect phase");
                self.phase = PhonePhase::Collect;
                TurnDecision::continuing(NextAction::AskQuestion {
                    slot_id: Some("contact_name".into()),
                    question: ACCEPT_MESSAGE.to_string(),
                })
            }
            PermissionIntent::Unclear => {
                if !self.reasked {
                    self.reasked = true;
                    TurnDecision::continuing(NextAction::AskQuestion {
                        slot_id: None,
                        question: REASK_MESSAGE.to_string(),
                    })
                } else {
                    self.close(TurnDecision::closing(NextAction::EndConversation {
                        message: GIVE_UP_MESSAGE.to_string(),
                        reason: EndReason::Unresponsive,
                    }))
                }
            }
        }
    }

    fn collect_turn(&mut self, entities: &ExtractedEntities) -> TurnDecision {
        if let Some(contact_name) = &entities.contact_name {
            self.slots.set(&"contact_name".into(), contact_name);
        }
        if let Some(shop_name) = &entities.shop_name {
            self.slots.set(&"shop_name".into(), shop_name);
        }
        if let Some(address) = &entities.address {
            self.slots.set(&"address".into(), address);
        }

        if let Some(next_missing) = self.slots.next_missing().cloned() {
            let prefix = self.composer.join_known(&self.known_parts());
            let label = self
                .slots
                .slot(&next_missing)
                .map(|slot| slot.display_name.as_str())
                .unwrap_or_default();
            TurnDecision::continuing(NextAction::AskQuestion {
                slot_id: Some(next_missing),
                question: format!("{prefix}差し支えなければ、{label}を教えていただけますか？"),
            })
        } else {
            let message = self.closing_message();
            self.close(TurnDecision::closing(NextAction::EndConversation {
                message,
                reason: EndReason::Success,
            }))
        }
    }

    /// Recap fragments for what is already known, company first.
    fn known_parts(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(shop_name) = self.slots.get(&"shop_name".into()) {
            parts.push(format!("会社名は『{}』", self.composer.with_sama(shop_name)));
        }
        if let Some(contact_name) = self.slots.get(&"contact_name".into()) {
            parts.push(format!("ご担当者様は『{}』", self.composer.with_sama(contact_name)));
        }
        if let Some(address) = self.slots.get(&"address".into()) {
            parts.push(format!("ご住所は『{address}』"));
        }
        parts
    }

    fn closing_message(&self) -> String {
        let contact = self
            .slots
            .get(&"contact_name".into())
            .map(|name| self.composer.with_sama(name))
            .unwrap_or_default();
        let shop = self
            .slots
            .get(&"shop_name".into())
            .map(|name| self.composer.with_sama(name))
            .unwrap_or_default();
        let address = self.slots.get(&"address".into()).unwrap_or_default();
        format!(
            "ありがとうございます。ご担当者様は『{contact}』、会社名は『{shop}』、ご住所は『{address}』ですね。本日はありがとうございました。"
        )
    }
}

impl Default for PhonePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl DialoguePolicy for PhonePolicy {
    fn next_turn(&mut self, user_text: &str) -> TurnDecision {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }

        let entities = match self.phase {
            PhonePhase::Permission => Default::default(),
            PhonePhase::Collect => self.extractor.extract(user_text),
        };
        self.log.push(ConversationTurn::now(
            user_text,
            self.phase.name(),
            entities.clone(),
        ));

        match self.phase {
            PhonePhase::Permission => self.permission_turn(user_text),
            PhonePhase::Collect => self.collect_turn(&entities),
        }
    }

    fn state_info(&self) -> StateInfo {
        StateInfo {
            state: self.phase.name().to_string(),
            state_label: self.phase.label().to_string(),
            completion_rate: self.slots.completion_rate(),
            next_required_slot: self.slots.next_missing().cloned(),
            sentiment: Sentiment::Neutral,
        }
    }

    fn fill_slot(&mut self, slot_id: &SlotId, value: &str) -> Result<bool, DomainError> {
        if self.slots.slot(slot_id).is_none() {
            return Err(DomainError::unknown_slot(slot_id));
        }
        Ok(self.slots.set(slot_id, value))
    }

    fn missing_slots(&self) -> Vec<SlotId> {
        self.slots.missing()
    }

    fn completion_rate(&self) -> CompletionRate {
        self.slots.completion_rate()
    }

    fn turn_log(&self) -> &TurnLog {
        &self.log
    }

    fn export_json(&self) -> Result<String, DomainError> {
        let filled: std::collections::BTreeMap<String, String> = self
            .slots
            .filled()
            .into_iter()
            .map(|(id, value)| (id.to_string(), value.to_string()))
            .collect();
        let export = serde_json::json!({
            "phase": self.phase.name(),
            "done": self.is_done(),
            "filled_slots": filled,
            "missing_slots": self.slots.missing(),
            "conversation_history": self.log,
        });
        serde_json::to_string_pretty(&export).map_err(|error| {
            DomainError::new(ErrorCode::InternalError, "Failed to serialize conversation export")
                .with_detail("cause", error.to_string())
        })
    }

    fn is_done(&self) -> bool {
        self.outcome.is_some()
    }

    fn reset(&mut self) {
        self.phase = PhonePhase::Permission;
        self.slots.reset();
        self.reasked = false;
        self.log.clear();
        self.outcome = None;
        info!("phone policy reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod permission {
        use super::*;

        #[test]
        fn decline_ends_the_call_politely() {
            let mut policy = PhonePolicy::new();
            let decision = policy.next_turn("いいえ、結構です");
            assert!(decision.done);
            match decision.action {
                NextAction::EndConversation { message, reason } => {
                    assert_eq!(message, DECLINE_MESSAGE);
                    assert_eq!(reason, EndReason::UserRejected);
                }
                other => panic!("expected EndConversation, got {:?}", other),
            }
        }

        #[test]
        fn decline_wins_over_accept_in_a_hedged_answer() {
            let mut policy = PhonePolicy::new();
            let decision = policy.next_turn("はい、でも今はちょっと");
            assert!(decision.done);
            assert!(matches!(
                decision.action,
                NextAction::EndConversation { reason: EndReason::UserRejected, .. }
            ));
        }

        #[test]
        fn accept_moves_to_collect_and_asks_for_the_name() {
            let mut policy = PhonePolicy::new();
            let decision = policy.next_turn("はい、どうぞ");
            assert!(!decision.done);
            assert_eq!(policy.phase(), PhonePhase::Collect);
            match decision.action {
                NextAction::AskQuestion { slot_id, question } => {
                    assert_eq!(slot_id, Some("contact_name".into()));
                    assert_eq!(question, ACCEPT_MESSAGE);
                }
                other => panic!("expected AskQuestion, got {:?}", other),
            }
        }

        #[test]
        fn unclear_answer_earns_exactly_one_reask() {
            let mut policy = PhonePolicy::new();
            let first = policy.next_turn("えっと…");
            assert!(!first.done);
            match first.action {
                NextAction::AskQuestion { slot_id, question } => {
                    assert_eq!(slot_id, None);
                    assert_eq!(question, REASK_MESSAGE);
                }
                other => panic!("expected AskQuestion, got {:?}", other),
            }

            let second = policy.next_turn("うーん…");
            assert!(second.done);
            match second.action {
                NextAction::EndConversation { message, reason } => {
                    assert_eq!(message, GIVE_UP_MESSAGE);
                    assert_eq!(reason, EndReason::Unresponsive);
                }
                other => panic!("expected EndConversation, got {:?}", other),
            }
        }

        #[test]
        fn accept_after_reask_still_moves_to_collect() {
            let mut policy = PhonePolicy::new();
            policy.next_turn("えっと…");
            let decision = policy.next_turn("はい、お願いします");
            assert!(!decision.done);
            assert_eq!(policy.phase(), PhonePhase::Collect);
        }
    }

    mod collect {
        use super::*;

        #[test]
        fn recaps_known_facts_before_asking_for_the_next_slot() {
            let mut policy = PhonePolicy::new();
            policy.next_turn("はい");
            let decision = policy.next_turn("田中です");
            match decision.action {
                NextAction::AskQuestion { slot_id, question } => {
                    assert_eq!(slot_id, Some("shop_name".into()));
                    assert_eq!(
                        question,
                        "ご担当者様は『田中様』。差し支えなければ、会社名（店名）を教えていただけますか？"
                    );
                }
                other => panic!("expected AskQuestion, got {:?}", other),
            }
        }

        #[test]
        fn no_known_facts_asks_without_a_recap_prefix() {
            let mut policy = PhonePolicy::new();
            policy.next_turn("はい");
            let decision = policy.next_turn("よろしくお願いしますね");
            match decision.action {
                NextAction::AskQuestion { question, .. } => {
                    assert!(question.starts_with("差し支えなければ、"));
                }
                other => panic!("expected AskQuestion, got {:?}", other),
            }
        }

        #[test]
        fn full_call_collects_all_slots_and_closes_with_a_recap() {
            let mut policy = PhonePolicy::new();
            let turns = ["はい", "田中です", "サンプル商店です", "東京都渋谷区1-1"];
            let mut last = None;
            for turn in turns {
                last = Some(policy.next_turn(turn));
            }
            let decision = last.unwrap();
            assert!(decision.done);
            assert!(policy.is_done());
            match decision.action {
                NextAction::EndConversation { message, reason } => {
                    assert_eq!(reason, EndReason::Success);
                    assert!(message.contains("田中様"));
                    assert!(message.contains("サンプル商店様"));
                    assert!(message.contains("東京都渋谷区1-1"));
                    assert!(message.ends_with("本日はありがとうございました。"));
                }
                other => panic!("expected EndConversation, got {:?}", other),
            }
            assert_eq!(policy.completion_rate(), CompletionRate::FULL);
        }

        #[test]
        fn compound_introduction_fills_name_and_company_in_one_turn() {
            let mut policy = PhonePolicy::new();
            policy.next_turn("はい");
            let decision = policy.next_turn("株式会社サンプルの田中です");
            match decision.action {
                NextAction::AskQuestion { slot_id, question } => {
                    assert_eq!(slot_id, Some("address".into()));
                    assert!(question.contains("会社名は『株式会社サンプル様』"));
                    assert!(question.contains("ご担当者様は『田中様』"));
                }
                other => panic!("expected AskQuestion, got {:?}", other),
            }
        }

        #[test]
        fn first_extraction_wins_over_a_later_one() {
            let mut policy = PhonePolicy::new();
            policy.next_turn("はい");
            policy.next_turn("田中です");
            // サンプル商店です also matches the bare-person pattern, but the
            // contact slot keeps its first value.
            policy.next_turn("サンプル商店です");
            let info = policy.state_info();
            assert_eq!(info.next_required_slot, Some("address".into()));
            assert!(policy.turn_log().last().unwrap().entities.shop_name.is_some());
        }
    }

    mod lifecycle {
        use super::*;

        #[test]
        fn closed_call_repeats_its_outcome() {
            let mut policy = PhonePolicy::new();
            policy.next_turn("いいえ");
            let decision = policy.next_turn("やっぱりはい");
            assert!(decision.done);
            assert!(matches!(
                decision.action,
                NextAction::EndConversation { reason: EndReason::UserRejected, .. }
            ));
        }

        #[test]
        fn reset_returns_to_permission_phase() {
            let mut policy = PhonePolicy::new();
            policy.next_turn("はい");
            policy.next_turn("田中です");
            policy.reset();
            assert_eq!(policy.phase(), PhonePhase::Permission);
            assert!(!policy.is_done());
            assert_eq!(policy.completion_rate(), CompletionRate::ZERO);
            assert!(policy.turn_log().is_empty());
        }

        #[test]
        fn state_info_reports_the_phase() {
            let mut policy = PhonePolicy::new();
            let info = policy.state_info();
            assert_eq!(info.state, "permission");
            assert_eq!(info.state_label, "許可確認");
            policy.next_turn("はい");
            assert_eq!(policy.state_info().state, "collect");
        }
    }
}
