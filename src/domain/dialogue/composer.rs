//! Shared response formatting: honorifics, recaps, question enhancement.

use crate::domain::slots::SlotId;

/// Formatting rules shared by both dialogue policies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseComposer;

impl ResponseComposer {
    /// Creates a new composer.
    pub fn new() -> Self {
        Self
    }

    /// Appends the 様 honorific exactly once.
    ///
    /// Idempotent: a name already carrying 様 is returned unchanged, so
    /// applying the composer twice never yields 様様.
    pub fn with_sama(&self, name: &str) -> String {
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.ends_with('様') {
            trimmed.to_string()
        } else {
            format!("{trimmed}様")
        }
    }

    /// Joins known-fact fragments with the Japanese list separator and
    /// terminates with 。; empty input yields an empty string.
    pub fn join_known(&self, parts: &[String]) -> String {
        if parts.is_empty() {
            String::new()
        } else {
            format!("{}。", parts.join("、"))
        }
    }

    /// Wraps per-slot context around the raw question text for the six
    /// qualification slots. Unknown slots get the raw question back.
    pub fn enhance_question(&self, slot_id: &SlotId, base_question: &str) -> String {
        match slot_id.as_str() {
            "decision_maker" => format!(
                "まず、{base_question}お米の仕入れについて最終的なご判断をされるのはどちらでしょうか？"
            ),
            "purchase_volume" => format!(
                "現在の状況を把握させていただきたいのですが、{base_question}月にどのくらいの量を仕入れられていますか？"
            ),
            "price_range" => format!(
                "価格についても確認させていただきたいのですが、{base_question}現在お支払いいただいている単価はどのくらいでしょうか？"
            ),
            "pain_points" => format!(
                "お客様の課題を理解させていただきたいのですが、{base_question}お米の仕入れで何かお困りの点はございますか？"
            ),
            "timeline" => format!(
                "タイミングについても確認させていただきたいのですが、{base_question}新しい仕入れ先の検討はいつ頃を予定されていますか？"
            ),
            "email" => format!(
                "最後に、{base_question}詳細資料をお送りするために、メールアドレスを教えていただけますでしょうか？"
            ),
            _ => base_question.to_string(),
        }
    }

    /// Builds the appointment offer: base message, numbered candidate list,
    /// closing ask.
    pub fn appointment_message(&self, base: &str, candidate_slots: &[String]) -> String {
        let mut message = format!("{base}以下の日時はいかがでしょうか？\n");
        for (index, slot) in candidate_slots.iter().enumerate() {
            message.push_str(&format!("{}. {}\n", index + 1, slot));
        }
        message.push_str("\nご希望の日時をお教えください。");
        message
    }
}
