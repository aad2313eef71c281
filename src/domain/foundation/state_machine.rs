//! State machine trait for dialogue state enums.

use super::ValidationError;

/// Trait for enums that represent a closed set of dialogue states.
///
/// Implementors declare the valid transitions; the trait supplies validated
/// transitions and terminal-state detection. The engine never moves a
/// conversation into a state the implementor has not declared reachable.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum CallStatus {
        Ringing,
        Talking,
        Ended,
    }

    impl StateMachine for CallStatus {
        fn can_transition_to(&self, target: &Self) -> bool {
            use CallStatus::*;
            matches!((self, target), (Ringing, Talking) | (Talking, Ended) | (Ringing, Ended))
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use CallStatus::*;
            match self {
                Ringing => vec![Talking, Ended],
                Talking => vec![Ended],
                Ended => vec![],
            }
        }
    }

    #[test]
    fn valid_transition_succeeds() {
        let next = CallStatus::Ringing.transition_to(CallStatus::Talking).unwrap();
        assert_eq!(next, CallStatus::Talking);
    }

    #[test]
    fn invalid_transition_fails() {
        assert!(CallStatus::Ended.transition_to(CallStatus::Talking).is_err());
    }

    #[test]
    fn terminal_state_has_no_transitions() {
        assert!(CallStatus::Ended.is_terminal());
        assert!(!CallStatus::Talking.is_terminal());
    }
}
