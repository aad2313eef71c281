//! Keyword-count sentiment scoring.
//!
//! Recomputed on every turn from the raw utterance alone; never smoothed
//! across turns and not persisted across resets.

use serde::{Deserialize, Serialize};

/// Coarse per-turn sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    /// Returns the snake_case name used in status payloads.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

/// Keyword tables driving the sentiment score and refusal detection.
///
/// Supplied as data so the core stays locale-agnostic; the defaults are the
/// Japanese sales-call lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentLexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    /// Explicit refusals that reject the conversation outright, regardless
    /// of the positive/negative tally.
    pub refusal: Vec<String>,
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self {
            positive: to_strings(&["良い", "素晴らしい", "興味", "検討", "詳しく", "ありがとう"]),
            negative: to_strings(&["いらない", "興味ない", "忙しい", "断る", "困る", "問題"]),
            refusal: to_strings(&["断る", "興味ない"]),
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}

/// Scores an utterance against a sentiment lexicon.
#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer {
    lexicon: SentimentLexicon,
}

impl SentimentAnalyzer {
    /// Creates an analyzer with the default Japanese lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an analyzer with a custom lexicon.
    pub fn with_lexicon(lexicon: SentimentLexicon) -> Self {
        Self { lexicon }
    }

    /// Scores one utterance: strict majority of keyword hits decides,
    /// tie means neutral.
    pub fn analyze(&self, text: &str) -> Sentiment {
        let positive = count_hits(&self.lexicon.positive, text);
        let negative = count_hits(&self.lexicon.negative, text);
        if positive > negative {
            Sentiment::Positive
        } else if negative > positive {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    /// Returns true if the utterance contains an explicit refusal keyword.
    pub fn is_refusal(&self, text: &str) -> bool {
        self.lexicon.refusal.iter().any(|word| text.contains(word))
    }
}

fn count_hits(words: &[String], text: &str) -> usize {
    words.iter().filter(|word| text.contains(word.as_str())).count()
}
