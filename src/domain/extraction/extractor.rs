//! Rule-based extractor for the narrow phone-sales register.
//!
//! Each rule is local text surgery over a single utterance, not NLP. The
//! rules run in a fixed priority order within one pass: the compound
//! "company の person です" pattern first, then the standalone person,
//! company, and address patterns, each only writing a field the pass has not
//! already filled. This keeps the permissive single-entity patterns from
//! mis-capturing the common company-then-person self-introduction.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ExtractedEntities;

/// Company name: legal-entity prefix followed by a name, or a name ending in
/// a shop/company suffix.
const COMPANY_PATTERN: &str =
    r"(?:株式会社|合同会社|有限会社)\s*[^、。\s]+|[^、。\s]+(?:商店|店|株式会社)";

static PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?P<company>{COMPANY_PATTERN})の(?P<person>[^、。\s]+?)です"
    ))
    .expect("pair pattern is valid")
});

static PERSON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:(?:担当|ご担当)[:：]?\s*)?(?P<p>[^、。\s]+?)(?:と申します|申します|です)(?:。|$)")
        .expect("person pattern is valid")
});

static COMPANY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?P<c>{COMPANY_PATTERN})")).expect("company pattern is valid")
});

static ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:北海道|青森県|岩手県|宮城県|秋田県|山形県|福島県|茨城県|栃木県|群馬県|埼玉県|千葉県|東京都|神奈川県|新潟県|富山県|石川県|福井県|山梨県|長野県|岐阜県|静岡県|愛知県|三重県|滋賀県|京都府|大阪府|兵庫県|奈良県|和歌山県|鳥取県|島根県|岡山県|広島県|山口県|徳島県|香川県|愛媛県|高知県|福岡県|佐賀県|長崎県|熊本県|大分県|宮崎県|鹿児島県|沖縄県)[^、。\n]*",
    )
    .expect("address pattern is valid")
});

static HONORIFIC_VERBS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:と申します|申します|です|でございます|になります)[。\s]*$")
        .expect("honorific verb pattern is valid")
});

static TRAILING_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[。・、,.\s]+$").expect("punctuation pattern is valid"));

static TRAILING_NO_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"の[^、。\s]+$").expect("no-token pattern is valid"));

static TRAILING_HONORIFIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:様|さん)$").expect("honorific pattern is valid"));

/// Pattern-based extractor for person names, company names, and addresses.
///
/// Stateless: calling [`extract`](EntityExtractor::extract) twice on the same
/// text yields the same result. The per-conversation first-write-wins policy
/// lives in the slot store.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityExtractor;

impl EntityExtractor {
    /// Creates a new extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extracts entities from a raw utterance.
    pub fn extract(&self, text: &str) -> ExtractedEntities {
        let text = text.trim();
        let mut entities = ExtractedEntities::default();
        if text.is_empty() {
            return entities;
        }

        // Compound self-introduction fills both fields in one pass and takes
        // priority over the permissive standalone patterns.
        if let Some(caps) = PAIR.captures(text) {
            entities.shop_name = non_empty(clean_company(&caps["company"]));
            entities.contact_name = non_empty(clean_person(&caps["person"]));
        }

        if entities.contact_name.is_none() {
            if let Some(caps) = PERSON.captures(text) {
                entities.contact_name = non_empty(clean_person(&caps["p"]));
            }
        }

        if entities.shop_name.is_none() {
            if let Some(caps) = COMPANY.captures(text) {
                entities.shop_name = non_empty(clean_company(&caps["c"]));
            }
        }

        if entities.address.is_none() {
            if let Some(m) = ADDRESS.find(text) {
                entities.address = non_empty(m.as_str().trim().to_string());
            }
        }

        entities
    }
}

/// Strips trailing honorific verbs and punctuation from a captured name.
fn strip_suffixes(text: &str) -> String {
    let trimmed = text.trim();
    let without_verbs = HONORIFIC_VERBS.replace(trimmed, "");
    TRAILING_PUNCT.replace(&without_verbs, "").into_owned()
}

/// Cleans a captured company name: suffixes, a trailing "の<token>", and
/// trailing 様/さん.
fn clean_company(name: &str) -> String {
    let cleaned = strip_suffixes(name);
    if cleaned.is_empty() {
        return cleaned;
    }
    let cleaned = TRAILING_NO_TOKEN.replace(&cleaned, "");
    TRAILING_HONORIFIC.replace(&cleaned, "").trim().to_string()
}

/// Cleans a captured person name: suffixes plus trailing 様/さん.
fn clean_person(name: &str) -> String {
    let cleaned = strip_suffixes(name);
    if cleaned.is_empty() {
        return cleaned;
    }
    TRAILING_HONORIFIC.replace(&cleaned, "").trim().to_string()
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> ExtractedEntities {
        EntityExtractor::new().extract(text)
    }

    mod compound_pattern {
        use super::*;

        #[test]
        fn fills_both_fields_from_company_then_person() {
            let entities = extract("株式会社サンプルの田中です");
            assert_eq!(entities.shop_name.as_deref(), Some("株式会社サンプル"));
            assert_eq!(entities.contact_name.as_deref(), Some("田中"));
        }

        #[test]
        fn works_with_shop_suffix_company() {
            let entities = extract("サンプル商店の佐藤です");
            assert_eq!(entities.shop_name.as_deref(), Some("サンプル商店"));
            assert_eq!(entities.contact_name.as_deref(), Some("佐藤"));
        }

        #[test]
        fn takes_priority_over_standalone_patterns() {
            // The standalone person pattern alone would capture a longer,
            // worse run; the compound rule resolves it first.
            let entities = extract("お世話になります。合同会社テストの鈴木です。");
            assert_eq!(entities.shop_name.as_deref(), Some("合同会社テスト"));
            assert_eq!(entities.contact_name.as_deref(), Some("鈴木"));
        }
    }

    mod person_pattern {
        use super::*;

        #[test]
        fn captures_name_before_to_moushimasu() {
            let entities = extract("田中と申します");
            assert_eq!(entities.contact_name.as_deref(), Some("田中"));
        }

        #[test]
        fn captures_name_before_desu() {
            let entities = extract("田中です");
            assert_eq!(entities.contact_name.as_deref(), Some("田中"));
        }

        #[test]
        fn accepts_tantou_prefix() {
            let entities = extract("担当：山本と申します");
            assert_eq!(entities.contact_name.as_deref(), Some("山本"));
        }

        #[test]
        fn accepts_go_tantou_prefix() {
            let entities = extract("ご担当 高橋です");
            assert_eq!(entities.contact_name.as_deref(), Some("高橋"));
        }

        #[test]
        fn strips_trailing_honorific() {
            let entities = extract("田中さんです");
            assert_eq!(entities.contact_name.as_deref(), Some("田中"));
        }
    }

    mod company_pattern {
        use super::*;

        #[test]
        fn captures_legal_entity_prefix() {
            let entities = extract("有限会社ヤマダ");
            assert_eq!(entities.shop_name.as_deref(), Some("有限会社ヤマダ"));
        }

        #[test]
        fn captures_shop_suffix() {
            let entities = extract("サンプル商店");
            assert_eq!(entities.shop_name.as_deref(), Some("サンプル商店"));
        }

        #[test]
        fn strips_trailing_no_token() {
            let entities = extract("株式会社テストの者");
            assert_eq!(entities.shop_name.as_deref(), Some("株式会社テスト"));
        }
    }

    mod address_pattern {
        use super::*;

        #[test]
        fn starts_at_prefecture_name() {
            let entities = extract("住所は東京都渋谷区1-1です");
            assert_eq!(entities.address.as_deref(), Some("東京都渋谷区1-1です"));
        }

        #[test]
        fn stops_at_line_break() {
            let entities = extract("大阪府大阪市北区2-3\n電話番号は後ほど");
            assert_eq!(entities.address.as_deref(), Some("大阪府大阪市北区2-3"));
        }

        #[test]
        fn stops_at_japanese_comma() {
            let entities = extract("北海道札幌市中央区1-2、よろしくお願いします");
            assert_eq!(entities.address.as_deref(), Some("北海道札幌市中央区1-2"));
        }

        #[test]
        fn ignores_text_without_prefecture() {
            let entities = extract("渋谷区1-1です");
            assert_eq!(entities.address, None);
        }
    }

    mod cleanup {
        use super::*;

        #[test]
        fn strips_de_gozaimasu() {
            assert_eq!(strip_suffixes("田中でございます"), "田中");
        }

        #[test]
        fn strips_ni_narimasu() {
            assert_eq!(strip_suffixes("田中になります"), "田中");
        }

        #[test]
        fn strips_trailing_punctuation() {
            assert_eq!(strip_suffixes("田中です。 "), "田中");
        }

        #[test]
        fn company_cleanup_removes_sama() {
            assert_eq!(clean_company("株式会社テスト様"), "株式会社テスト");
        }

        #[test]
        fn person_cleanup_removes_san() {
            assert_eq!(clean_person("田中さん"), "田中");
        }
    }

    mod edge_cases {
        use super::*;

        #[test]
        fn empty_input_yields_no_entities() {
            assert!(extract("").is_empty());
            assert!(extract("   ").is_empty());
        }

        #[test]
        fn unrelated_text_yields_no_entities() {
            assert!(extract("こんにちは").is_empty());
        }

        #[test]
        fn extraction_is_idempotent_over_same_text() {
            let text = "株式会社サンプルの田中です";
            assert_eq!(extract(text), extract(text));
        }
    }
}
