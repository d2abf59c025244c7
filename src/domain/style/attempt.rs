//! Lifecycle of a single classification attempt.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// `Idle -> Requesting -> {Succeeded | Failed}`, `Failed -> HeuristicFallback`,
/// and `Idle -> HeuristicFallback` when the service is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationAttempt {
    Idle,
    Requesting,
    Succeeded,
    Failed,
    HeuristicFallback,
}

impl StateMachine for ClassificationAttempt {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ClassificationAttempt::*;
        matches!(
            (self, target),
            (Idle, Requesting)
                | (Idle, HeuristicFallback)
                | (Requesting, Succeeded)
                | (Requesting, Failed)
                | (Failed, HeuristicFallback)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ClassificationAttempt::*;
        match self {
            Idle => vec![Requesting, HeuristicFallback],
            Requesting => vec![Succeeded, Failed],
            Failed => vec![HeuristicFallback],
            Succeeded | HeuristicFallback => vec![],
        }
    }
}

/// Why the heuristic produced the result instead of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    ServiceUnhealthy,
    InsufficientData,
    ClassifierFailed,
}
