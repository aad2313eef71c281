//! Completion rate value object (fraction of required slots filled).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Fraction of required slots currently filled, in [0.0, 1.0].
///
/// The funnel thresholds (0.3 / 0.5 / 0.8 / 0.9) are compared through
/// [`CompletionRate::is_at_least`] and [`CompletionRate::is_below`] so the
/// comparison direction is spelled out at the call site.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionRate(f64);

impl CompletionRate {
    /// Zero completion.
    pub const ZERO: Self = Self(0.0);

    /// Full completion.
    pub const FULL: Self = Self(1.0);

    /// Creates a new CompletionRate, clamping to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Creates a CompletionRate, returning error if out of range.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range(
                "completion_rate",
                0.0,
                1.0,
                value,
            ));
        }
        Ok(Self(value))
    }

    /// Creates a CompletionRate from a filled/total ratio.
    ///
    /// A total of zero yields zero completion.
    pub fn ratio(filled: usize, total: usize) -> Self {
        if total == 0 {
            Self::ZERO
        } else {
            Self::new(filled as f64 / total as f64)
        }
    }

    /// Returns the value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns true if the rate is at least the given threshold.
    pub fn is_at_least(&self, threshold: f64) -> bool {
        self.0 >= threshold
    }

    /// Returns true if the rate is strictly below the given threshold.
    pub fn is_below(&self, threshold: f64) -> bool {
        self.0 < threshold
    }
}

impl Default for CompletionRate {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for CompletionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}
