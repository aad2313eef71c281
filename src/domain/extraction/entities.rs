//! Entities recognized in a single utterance.

use serde::{Deserialize, Serialize};

/// Entities extracted from one utterance.
///
/// Each field is `None` when the corresponding pattern did not fire. The
/// extractor itself is stateless; first-write-wins against already-filled
/// slots is enforced by the slot store, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    /// Person name (担当者名), honorifics stripped.
    pub contact_name: Option<String>,
    /// Company or shop name (会社名・店名).
    pub shop_name: Option<String>,
    /// Postal address starting with a prefecture name.
    pub address: Option<String>,
}

impl ExtractedEntities {
    /// Returns true if no entity was found.
    pub fn is_empty(&self) -> bool {
        self.contact_name.is_none() && self.shop_name.is_none() && self.address.is_none()
    }

    /// Returns the number of entities found.
    pub fn count(&self) -> usize {
        [
            self.contact_name.is_some(),
            self.shop_name.is_some(),
            self.address.is_some(),
        ]
        .iter()
        .filter(|found| **found)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        let entities = ExtractedEntities::default();
        assert!(entities.is_empty());
        assert_eq!(entities.count(), 0);
    }

    #[test]
    fn count_tallies_found_entities() {
        let entities = ExtractedEntities {
            contact_name: Some("田中".to_string()),
            shop_name: None,
            address: Some("東京都渋谷区1-1".to_string()),
        };
        assert!(!entities.is_empty());
        assert_eq!(entities.count(), 2);
    }
}
