//! Slot definitions: one structured fact the dialogue tries to collect.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a slot within a slot set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(String);

impl SlotId {
    /// Creates a new slot id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SlotId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Validation predicate applied before a value is accepted into a slot.
///
/// Validators are data, not code, so slot catalogs can be supplied from
/// configuration without recompiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotValidator {
    /// Accepts any non-empty string.
    NonEmpty,
    /// Requires both "@" and "." to be present.
    Email,
}

impl SlotValidator {
    /// Applies the predicate to a candidate value.
    pub fn validate(&self, value: &str) -> bool {
        match self {
            Self::NonEmpty => !value.trim().is_empty(),
            Self::Email => value.contains('@') && value.contains('.'),
        }
    }
}

/// A single structured fact the dialogue tries to collect.
///
/// # Invariants
///
/// - `value` is `None` until a validator-passing string is assigned.
/// - Once assigned, `value` is never overwritten until a reset
///   (first-write-wins, enforced by the store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    /// Human-readable Japanese label, used in recaps and logs.
    pub display_name: String,
    /// The raw ask text for this slot.
    pub question: String,
    pub required: bool,
    pub validator: SlotValidator,
    #[serde(default)]
    pub value: Option<String>,
}

impl Slot {
    /// Creates a required slot with no value.
    pub fn required(
        id: impl Into<SlotId>,
        display_name: impl Into<String>,
        question: impl Into<String>,
        validator: SlotValidator,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            question: question.into(),
            required: true,
            validator,
            value: None,
        }
    }

    /// Returns true if this slot holds a value.
    pub fn is_filled(&self) -> bool {
        self.value.is_some()
    }
}

impl From<String> for SlotId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}
