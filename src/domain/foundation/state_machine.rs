//! State machine trait for lifecycle enums.
//!
//! Used by the classification attempt lifecycle so every state change is
//! validated against an explicit transition table.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define the transition table; `transition_to` and
/// `is_terminal` are derived from it.
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
    enum Light {
        Off,
        Warming,
        On,
    }

    impl StateMachine for Light {
        fn can_transition_to(&self, target: &Self) -> bool {
            self.valid_transitions().contains(target)
        }

        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Light::Off => vec![Light::Warming],
                Light::Warming => vec![Light::On, Light::Off],
                Light::On => vec![],
            }
        }
    }

    #[test]
    fn transition_to_follows_table() {
        assert_eq!(Light::Off.transition_to(Light::Warming), Ok(Light::Warming));
        assert!(Light::Off.transition_to(Light::On).is_err());
    }

    #[test]
    fn terminal_state_has_no_outgoing_transitions() {
        assert!(Light::On.is_terminal());
        assert!(!Light::Warming.is_terminal());
    }
}
