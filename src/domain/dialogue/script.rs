//! The scripted sales pitch: fixed talk track with keyword-driven branching.

use serde::{Deserialize, Serialize};

/// Facts the script is rendered from. Deserializable so a deployment can
/// swap the product without touching code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptData {
    pub company: String,
    pub salesperson: String,
    pub product: String,
    pub price: String,
    pub features: Vec<String>,
    pub target: String,
    pub offer: String,
}

impl Default for ScriptData {
    fn default() -> Self {
        Self {
            company: "X商事".to_string(),
            salesperson: "高木".to_string(),
            product: "近江ブレンド米・小粒タイプ".to_string(),
            price: "1kgあたり588円（税別・送料込み）".to_string(),
            features: vec![
                "粒が通常より一回り小さい".to_string(),
                "弁当箱に詰めやすい".to_string(),
                "見た目のボリューム感が出しやすい".to_string(),
            ],
            target: "弁当店様向け".to_string(),
            offer: "無料サンプル".to_string(),
        }
    }
}

/// Steps of the talk track, in pitch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStep {
    Greeting,
    Introduction,
    Apology,
    BusinessIntro,
    ProductIntro,
    Features,
    PriceInfo,
    SampleOffer,
    RequestInfo,
    EndConversation,
}

impl ScriptStep {
    /// Machine-readable snake_case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Introduction => "introduction",
            Self::Apology => "apology",
            Self::BusinessIntro => "business_intro",
            Self::ProductIntro => "product_intro",
            Self::Features => "features",
            Self::PriceInfo => "price_info",
            Self::SampleOffer => "sample_offer",
            Self::RequestInfo => "request_info",
            Self::EndConversation => "end_conversation",
        }
    }

    /// The step after this one in the default pitch order.
    fn advance(&self) -> Self {
        match self {
            Self::Greeting => Self::Introduction,
            Self::Introduction => Self::Apology,
            Self::Apology => Self::BusinessIntro,
            Self::BusinessIntro => Self::ProductIntro,
            Self::ProductIntro => Self::Features,
            Self::Features => Self::SampleOffer,
            Self::SampleOffer => Self::RequestInfo,
            _ => Self::BusinessIntro,
        }
    }
}

/// Renders the talk track and decides the next step from customer replies.
#[derive(Debug, Clone, Default)]
pub struct SalesScript {
    data: ScriptData,
}

impl SalesScript {
    /// Creates the default rice-sales script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a script over custom data.
    pub fn with_data(data: ScriptData) -> Self {
        Self { data }
    }

    /// The facts the script is rendered from.
    pub fn data(&self) -> &ScriptData {
        &self.data
    }

    /// Renders one step of the talk track.
    pub fn text(&self, step: ScriptStep) -> String {
        match step {
            ScriptStep::Greeting => "こんにちは。".to_string(),
            ScriptStep::Introduction => format!(
                "私、{}の{}と申します。",
                self.data.company, self.data.salesperson
            ),
            ScriptStep::Apology => "突然のお電話失礼いたします。".to_string(),
            ScriptStep::BusinessIntro => "弊社では、主に弁当店様向けにお米の販売を行っておりまして、今日はその中でもおすすめの商品をご紹介させていただければと思い、ご連絡いたしました。".to_string(),
            // Price is part of the product pitch, so the price step reuses it.
            ScriptStep::ProductIntro | ScriptStep::PriceInfo => format!(
                "現在ご好評いただいているのが、「{}」という商品で、{}でご提供しております。",
                self.data.product, self.data.price
            ),
            ScriptStep::Features => "このお米は、粒が通常より一回り小さいのが特徴で、弁当箱に詰めやすく、見た目のボリューム感が出しやすいと好評です。".to_string(),
            ScriptStep::SampleOffer => format!(
                "もしご興味があれば、{}をお届けさせていただいておりますので、よろしければ、お店のお名前・ご住所・ご担当者様のお名前をお教えいただけますでしょうか？",
                self.data.offer
            ),
            ScriptStep::RequestInfo => "よろしければ、お店のお名前・ご住所・ご担当者様のお名前をお教えいただけますでしょうか？".to_string(),
            ScriptStep::EndConversation => "ありがとうございました。ご検討いただき、ありがとうございます。".to_string(),
        }
    }

    /// The whole pitch in one message, used when the customer asks for the
    /// full picture up front.
    pub fn full_presentation(&self) -> String {
        format!(
            "{} {} {} {}",
            self.text(ScriptStep::BusinessIntro),
            self.text(ScriptStep::ProductIntro),
            self.text(ScriptStep::Features),
            self.text(ScriptStep::SampleOffer),
        )
    }

    /// Picks the next step from the customer reply.
    ///
    /// Topic keywords jump directly to the matching step; a plain yes
    /// advances the pitch; an explicit no ends it; anything else advances.
    pub fn next_step(&self, current: ScriptStep, customer_response: &str) -> ScriptStep {
        let contains_any =
            |words: &[&str]| words.iter().any(|word| customer_response.contains(word));

        if contains_any(&["興味", "詳しく"]) {
            ScriptStep::ProductIntro
        } else if contains_any(&["価格", "いくら"]) {
            ScriptStep::PriceInfo
        } else if contains_any(&["特徴", "どういう"]) {
            ScriptStep::Features
        } else if contains_any(&["サンプル", "試してみたい"]) {
            ScriptStep::SampleOffer
        } else if contains_any(&["情報", "教える"]) {
            ScriptStep::RequestInfo
        } else if contains_any(&["いいえ", "結構", "不要"]) {
            ScriptStep::EndConversation
        } else {
            current.advance()
        }
    }
}
