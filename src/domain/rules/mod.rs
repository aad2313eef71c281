//! Rule-based canned responses, the first stage of the fallback chain.
//!
//! Rules are data: an ordered table of (keywords, response) entries,
//! deserializable from JSON or YAML so new locales or campaigns ship without
//! code changes. Matching is case-insensitive substring search in declaration
//! order, first hit wins, no scoring. The responder runs before any stateful
//! policy so FAQ-style keywords short-circuit the slot-filling flow.

use serde::{Deserialize, Serialize};

/// Tag describing what the caller should do after emitting a rule response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    /// Keep the conversation going after the canned answer.
    #[default]
    ContinueConversation,
    /// The canned answer closes the conversation.
    EndConversation,
}

/// A single (trigger, response) rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    /// Rule fires when any of these appears in the lower-cased input.
    #[serde(default)]
    pub any_keywords: Vec<String>,
    pub response: String,
    #[serde(default)]
    pub action: RuleAction,
}

/// A matched rule, ready to be returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    pub rule_id: &'a str,
    pub response: &'a str,
    pub action: RuleAction,
}

/// Ordered rule table with first-match-wins lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates a rule set from an ordered rule list.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Parses a rule table from a JSON array.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses a rule table from a YAML sequence.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the first rule with at least one keyword present in the
    /// lower-cased input, or `None` when no rule matches.
    pub fn respond(&self, text: &str) -> Option<RuleMatch<'_>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let normalized = trimmed.to_lowercase();
        self.rules
            .iter()
            .find(|rule| {
                rule.any_keywords
                    .iter()
                    .any(|keyword| normalized.contains(&keyword.to_lowercase()))
            })
            .map(|rule| RuleMatch {
                rule_id: &rule.id,
                response: &rule.response,
                action: rule.action,
            })
    }
}
