//! Dialogue policies and their shared building blocks.

mod action;
mod composer;
mod phone;
mod policy;
mod qualification;
mod script;
mod sentiment;
mod turn;

pub use action::{EndReason, NextAction};
pub use composer::ResponseComposer;
pub use phone::{IntentLexicon, PermissionIntent, PhonePhase, PhonePolicy};
pub use policy::{DialoguePolicy, StateInfo, TurnDecision};
pub use qualification::{ConversationSummary, FunnelState, QualificationPolicy};
pub use script::{SalesScript, ScriptData, ScriptStep};
pub use sentiment::{Sentiment, SentimentAnalyzer, SentimentLexicon};
pub use turn::{ConversationTurn, TurnLog, MAX_RETAINED_TURNS};
