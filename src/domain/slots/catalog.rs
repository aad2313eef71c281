//! Built-in slot catalogs for the two dialogue policies.

use super::{Slot, SlotStore, SlotValidator};

/// The 6-slot qualification form used by the sales funnel policy.
///
/// Declaration order is ask priority.
pub fn qualification_form() -> SlotStore {
    SlotStore::new(vec![
        Slot::required(
            "decision_maker",
            "意思決定者",
            "ご担当者様はどちらでしょうか？",
            SlotValidator::NonEmpty,
        ),
        Slot::required(
            "purchase_volume",
            "現在の仕入数量",
            "現在、お米はどのくらいの量を仕入れられていますか？",
            SlotValidator::NonEmpty,
        ),
        Slot::required(
            "price_range",
            "単価帯",
            "現在お支払いいただいている単価はどのくらいでしょうか？",
            SlotValidator::NonEmpty,
        ),
        Slot::required(
            "pain_points",
            "現在の課題・不満点",
            "お米の仕入れで何かお困りの点はございますか？",
            SlotValidator::NonEmpty,
        ),
        Slot::required(
            "timeline",
            "導入・検討時期",
            "新しい仕入れ先の検討はいつ頃を予定されていますか？",
            SlotValidator::NonEmpty,
        ),
        Slot::required(
            "email",
            "メールアドレス",
            "詳細資料をお送りするために、メールアドレスを教えていただけますか？",
            SlotValidator::Email,
        ),
    ])
}

/// The 3-slot contact form used by the phone policy.
///
/// Collection order: contact name, then company, then address.
pub fn contact_form() -> SlotStore {
    SlotStore::new(vec![
        Slot::required(
            "contact_name",
            "ご担当者様のお名前",
            "ご担当者様のお名前をお伺いしてもよろしいでしょうか？",
            SlotValidator::NonEmpty,
        ),
        Slot::required(
            "shop_name",
            "会社名（店名）",
            "会社名（店名）を教えていただけますか？",
            SlotValidator::NonEmpty,
        ),
        Slot::required(
            "address",
            "ご住所",
            "ご住所を教えていただけますか？",
            SlotValidator::NonEmpty,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualification_form_has_six_required_slots() {
        let form = qualification_form();
        assert_eq!(form.len(), 6);
        assert!(form.iter().all(|slot| slot.required));
        assert_eq!(form.next_missing(), Some(&"decision_maker".into()));
    }

    #[test]
    fn qualification_email_slot_uses_email_validator() {
        let form = qualification_form();
        let slot = form.slot(&"email".into()).unwrap();
        assert_eq!(slot.validator, SlotValidator::Email);
    }

    #[test]
    fn contact_form_priority_is_name_company_address() {
        let form = contact_form();
        let ids: Vec<_> = form.iter().map(|slot| slot.id.as_str().to_string()).collect();
        assert_eq!(ids, vec!["contact_name", "shop_name", "address"]);
    }
}
