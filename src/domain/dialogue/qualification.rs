//! The 8-state sales funnel policy driven by slot completion and sentiment.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::extraction::EntityExtractor;
use crate::domain::foundation::{
    CompletionRate, DomainError, ErrorCode, StateMachine, Timestamp,
};
use crate::domain::slots::{qualification_form, SlotId, SlotStore};

use super::{
    ConversationTurn, DialoguePolicy, EndReason, NextAction, ResponseComposer, Sentiment,
    SentimentAnalyzer, StateInfo, TurnDecision, TurnLog,
};

/// Completion threshold below which the funnel keeps asking slot questions.
const ASK_THRESHOLD: f64 = 0.8;

/// Completion threshold required to move from booking to confirmation.
const CONFIRM_THRESHOLD: f64 = 0.9;

/// States of the sales funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunnelState {
    Greeting,
    PainPointDiscovery,
    SolutionIntroduction,
    Qualification,
    AppointmentBooking,
    Confirmation,
    Completed,
    Rejected,
}

impl FunnelState {
    /// Machine-readable snake_case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::PainPointDiscovery => "pain_point_discovery",
            Self::SolutionIntroduction => "solution_introduction",
            Self::Qualification => "qualification",
            Self::AppointmentBooking => "appointment_booking",
            Self::Confirmation => "confirmation",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable Japanese label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Greeting => "挨拶・自己紹介",
            Self::PainPointDiscovery => "課題・不満点の把握",
            Self::SolutionIntroduction => "解決策の提案",
            Self::Qualification => "条件確認・ヒアリング",
            Self::AppointmentBooking => "アポイント調整",
            Self::Confirmation => "確認・締め",
            Self::Completed => "完了",
            Self::Rejected => "拒否・終了",
        }
    }

    /// Fixed transition hint handed to the text-generation fallback when the
    /// funnel moves into this state. Empty for states with no scripted hint.
    fn transition_message(&self) -> &'static str {
        match self {
            Self::PainPointDiscovery => "まずは、現在の状況についてお聞かせください。",
            Self::SolutionIntroduction => "その課題について、弊社の解決策をご紹介させていただきます。",
            Self::Qualification => "より具体的なご提案をさせていただくために、いくつかお聞かせください。",
            Self::AppointmentBooking => "詳細についてお話しさせていただきたいのですが、",
            Self::Confirmation => "最後に、お聞かせいただいた内容を確認させてください。",
            _ => "",
        }
    }
}

impl StateMachine for FunnelState {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use FunnelState::*;
        match self {
            Greeting => vec![PainPointDiscovery, SolutionIntroduction, Rejected],
            PainPointDiscovery => vec![Qualification, SolutionIntroduction, Rejected],
            SolutionIntroduction => vec![Qualification, AppointmentBooking, Rejected],
            Qualification => vec![AppointmentBooking, Rejected],
            AppointmentBooking => vec![Confirmation, Qualification, Rejected],
            Confirmation => vec![Completed, Rejected],
            Completed | Rejected => vec![],
        }
    }
}

impl FromStr for FunnelState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greeting" => Ok(Self::Greeting),
            "pain_point_discovery" => Ok(Self::PainPointDiscovery),
            "solution_introduction" => Ok(Self::SolutionIntroduction),
            "qualification" => Ok(Self::Qualification),
            "appointment_booking" => Ok(Self::AppointmentBooking),
            "confirmation" => Ok(Self::Confirmation),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::new(ErrorCode::UnknownState, "Unknown funnel state")
                .with_detail("state", other)),
        }
    }
}

/// End-of-conversation summary for reporting and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub start_time: Option<Timestamp>,
    pub end_time: Timestamp,
    pub total_turns: usize,
    pub final_state: String,
    pub completion_rate: CompletionRate,
    pub filled_slots: BTreeMap<String, String>,
    pub missing_slots: Vec<SlotId>,
    pub sentiment: Sentiment,
}

/// The multi-state qualification funnel for chat conversations.
///
/// Transitions are a deterministic function of the current state, the slot
/// completion rate, and the per-turn sentiment. Completed and Rejected are
/// terminal; any state falls to Rejected on negative sentiment or an
/// explicit refusal.
#[derive(Debug, Clone)]
pub struct QualificationPolicy {
    state: FunnelState,
    slots: SlotStore,
    extractor: EntityExtractor,
    analyzer: SentimentAnalyzer,
    composer: ResponseComposer,
    sentiment: Sentiment,
    log: TurnLog,
    candidate_appointments: Vec<String>,
}

impl QualificationPolicy {
    /// Creates a fresh funnel with the 6-slot qualification form.
    pub fn new() -> Self {
        Self {
            state: FunnelState::Greeting,
            slots: qualification_form(),
            extractor: EntityExtractor::new(),
            analyzer: SentimentAnalyzer::new(),
            composer: ResponseComposer::new(),
            sentiment: Sentiment::Neutral,
            log: TurnLog::new(),
            candidate_appointments: default_appointments(),
        }
    }

    /// Creates a funnel with a custom sentiment analyzer (locale swap).
    pub fn with_analyzer(analyzer: SentimentAnalyzer) -> Self {
        Self {
            analyzer,
            ..Self::new()
        }
    }

    /// Current funnel state.
    pub fn state(&self) -> FunnelState {
        self.state
    }

    /// Per-turn sentiment of the latest utterance.
    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }

    /// Builds the end-of-conversation summary.
    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            start_time: self.log.first().map(|turn| turn.timestamp),
            end_time: Timestamp::now(),
            total_turns: self.log.len(),
            final_state: self.state.name().to_string(),
            completion_rate: self.slots.completion_rate(),
            filled_slots: self
                .slots
                .filled()
                .into_iter()
                .map(|(id, value)| (id.to_string(), value.to_string()))
                .collect(),
            missing_slots: self.slots.missing(),
            sentiment: self.sentiment,
        }
    }

    /// Mines an email token out of the utterance and offers it to the email
    /// slot. The richer entity patterns feed the phone policy; the funnel
    /// collects its other facts through questions.
    fn extract_slot_information(&mut self, user_text: &str) {
        if user_text.contains('@') && user_text.contains('.') {
            if let Some(token) = user_text
                .split_whitespace()
                .find(|token| token.contains('@') && token.contains('.'))
            {
                let cleaned = token.trim_matches(|c| ".,!?;:".contains(c));
                self.slots.set(&"email".into(), cleaned);
            }
        }
    }

    /// Deterministic next state from current state, completion, sentiment.
    fn determine_next_state(&self, user_text: &str) -> FunnelState {
        use FunnelState::*;

        if self.state.is_terminal() {
            return self.state;
        }
        if self.sentiment == Sentiment::Negative || self.analyzer.is_refusal(user_text) {
            return Rejected;
        }

        let completion = self.slots.completion_rate();
        match self.state {
            Greeting => {
                if completion.is_below(0.3) {
                    PainPointDiscovery
                } else {
                    SolutionIntroduction
                }
            }
            PainPointDiscovery => {
                if completion.is_below(0.5) {
                    Qualification
                } else {
                    SolutionIntroduction
                }
            }
            SolutionIntroduction => {
                if completion.is_below(ASK_THRESHOLD) {
                    Qualification
                } else {
                    AppointmentBooking
                }
            }
            Qualification => {
                if completion.is_at_least(ASK_THRESHOLD) {
                    AppointmentBooking
                } else {
                    Qualification
                }
            }
            AppointmentBooking => {
                if completion.is_at_least(CONFIRM_THRESHOLD) {
                    Confirmation
                } else {
                    Qualification
                }
            }
            Confirmation => Completed,
            Completed | Rejected => self.state,
        }
    }

    /// Next-action decision, run after the state update.
    fn determine_next_action(&self) -> TurnDecision {
        let completion = self.slots.completion_rate();

        match self.state {
            FunnelState::Rejected => TurnDecision::closing(NextAction::EndConversation {
                message: "お忙しい中、お時間をいただきありがとうございました。".to_string(),
                reason: EndReason::UserRejected,
            }),
            FunnelState::Completed => TurnDecision::closing(NextAction::EndConversation {
                message: "本日はありがとうございました。詳細資料をお送りいたします。".to_string(),
                reason: EndReason::Success,
            }),
            _ => {
                if let Some(slot_id) = self.slots.next_missing().filter(|_| completion.is_below(ASK_THRESHOLD)) {
                    let base = self
                        .slots
                        .slot(slot_id)
                        .map(|slot| slot.question.as_str())
                        .unwrap_or_default();
                    TurnDecision::continuing(NextAction::AskQuestion {
                        slot_id: Some(slot_id.clone()),
                        question: self.composer.enhance_question(slot_id, base),
                    })
                } else if self.state == FunnelState::AppointmentBooking
                    && completion.is_at_least(ASK_THRESHOLD)
                {
                    TurnDecision::continuing(NextAction::BookAppointment {
                        message: self.composer.appointment_message(
                            "アポイントの調整をさせていただきたいのですが、",
                            &self.candidate_appointments,
                        ),
                        candidate_slots: self.candidate_appointments.clone(),
                    })
                } else {
                    TurnDecision::continuing(NextAction::ContinueConversation {
                        message: self.state.transition_message().to_string(),
                    })
                }
            }
        }
    }
}

impl Default for QualificationPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl DialoguePolicy for QualificationPolicy {
    fn next_turn(&mut self, user_text: &str) -> TurnDecision {
        let entities = self.extractor.extract(user_text);
        self.log.push(ConversationTurn::now(
            user_text,
            self.state.name(),
            entities,
        ));

        self.sentiment = self.analyzer.analyze(user_text);
        self.extract_slot_information(user_text);

        let next_state = self.determine_next_state(user_text);
        if next_state != self.state {
            info!(from = self.state.name(), to = next_state.name(), "funnel transition");
            self.state = next_state;
        }

        self.determine_next_action()
    }

    fn state_info(&self) -> StateInfo {
        StateInfo {
            state: self.state.name().to_string(),
            state_label: self.state.label().to_string(),
            completion_rate: self.slots.completion_rate(),
            next_required_slot: self.slots.next_missing().cloned(),
            sentiment: self.sentiment,
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
        let export = serde_json::json!({
            "conversation_summary": self.summary(),
            "conversation_history": self.log,
        });
        serde_json::to_string_pretty(&export).map_err(|error| {
            DomainError::new(ErrorCode::InternalError, "Failed to serialize conversation export")
                .with_detail("cause", error.to_string())
        })
    }

    fn is_done(&self) -> bool {
        self.state.is_terminal()
    }

    fn reset(&mut self) {
        self.state = FunnelState::Greeting;
        self.slots.reset();
        self.sentiment = Sentiment::Neutral;
        self.log.clear();
        info!("qualification policy reset");
    }
}

fn default_appointments() -> Vec<String> {
    vec![
        "明日の午前中".to_string(),
        "明日の午後".to_string(),
        "明後日の午前中".to_string(),
        "明後日の午後".to_string(),
    ]
}
