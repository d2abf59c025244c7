//! ClassificationOrchestrator - One attempt against the remote classifier,
//! resolved by the heuristic whenever the service cannot answer.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use crate::domain::features::{DataQuality, FeatureVector};
use crate::domain::foundation::StateMachine;
use crate::domain::style::{
    ClassificationAttempt, FallbackReason, HeuristicClassifier, Prediction,
};
use crate::ports::{ClassifierError, ServiceHealth, StyleClassifier};

/// Tuning for the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrchestratorSettings {
    pub predict_timeout: Duration,
    pub health_timeout: Duration,
    pub health_check_before_predict: bool,
    /// Skip the service when the data are not sufficient for the model.
    pub require_sufficient_data: bool,
}

/// Headroom past the service calls for the profile write and its retry.
pub const PERSISTENCE_MARGIN: Duration = Duration::from_secs(5);

impl OrchestratorSettings {
    /// Longest one attempt can spend waiting on the service.
    pub fn cycle_budget(&self) -> Duration {
        if self.health_check_before_predict {
            self.health_timeout + self.predict_timeout
        } else {
            self.predict_timeout
        }
    }

    /// Shortest lock lease that outlives a whole cycle.
    pub fn minimum_lease(&self) -> Duration {
        self.cycle_budget() + PERSISTENCE_MARGIN
    }
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            predict_timeout: Duration::from_millis(3_000),
            health_timeout: Duration::from_millis(1_000),
            health_check_before_predict: true,
            require_sufficient_data: true,
        }
    }
}

/// What one attempt produced and how it got there.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub prediction: Prediction,
    pub final_state: ClassificationAttempt,
    pub fallback_reason: Option<FallbackReason>,
    /// The classifier failure that caused the fallback, for logs only.
    pub failure: Option<ClassifierError>,
}

pub struct ClassificationOrchestrator {
    classifier: Arc<dyn StyleClassifier>,
    heuristic: HeuristicClassifier,
    settings: OrchestratorSettings,
}

fn advance(state: ClassificationAttempt, next: ClassificationAttempt) -> ClassificationAttempt {
    debug_assert!(
        state.can_transition_to(&next),
        "invalid attempt transition {:?} -> {:?}",
        state,
        next
    );
    next
}

impl ClassificationOrchestrator {
    pub fn new(
        classifier: Arc<dyn StyleClassifier>,
        heuristic: HeuristicClassifier,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            classifier,
            heuristic,
            settings,
        }
    }

    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    /// Health probe bounded by the health timeout.
    pub async fn check_health(&self) -> ServiceHealth {
        match timeout(self.settings.health_timeout, self.classifier.check_health()).await {
            Ok(health) => health,
            Err(_) => ServiceHealth::unavailable(format!(
                "health check timed out after {}ms",
                self.settings.health_timeout.as_millis()
            )),
        }
    }

    /// Never fails: every classifier problem resolves to the heuristic.
    pub async fn classify(
        &self,
        features: &FeatureVector,
        quality: &DataQuality,
    ) -> ClassificationReport {
        let state = ClassificationAttempt::Idle;

        if self.settings.require_sufficient_data && !quality.sufficient_for_ml {
            debug!(
                total_interactions = quality.total_interactions,
                "Insufficient data for the model; using heuristic"
            );
            return self.fallback(state, features, FallbackReason::InsufficientData, None);
        }

        if self.settings.health_check_before_predict {
            let health = self.check_health().await;
            if !health.available {
                warn!(
                    error = health.error.as_deref().unwrap_or("unknown"),
                    "Classifier unhealthy; using heuristic"
                );
                return self.fallback(state, features, FallbackReason::ServiceUnhealthy, None);
            }
        }

        let state = advance(state, ClassificationAttempt::Requesting);
        let result = match timeout(self.settings.predict_timeout, self.classifier.predict(features))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(ClassifierError::Timeout {
                timeout_ms: self.settings.predict_timeout.as_millis() as u64,
            }),
        };

        match result {
            Ok(prediction) => ClassificationReport {
                prediction,
                final_state: advance(state, ClassificationAttempt::Succeeded),
                fallback_reason: None,
                failure: None,
            },
            Err(err) => {
                warn!(error = %err, "Classifier request failed; using heuristic");
                let state = advance(state, ClassificationAttempt::Failed);
                self.fallback(state, features, FallbackReason::ClassifierFailed, Some(err))
            }
        }
    }

    fn fallback(
        &self,
        state: ClassificationAttempt,
        features: &FeatureVector,
        reason: FallbackReason,
        failure: Option<ClassifierError>,
    ) -> ClassificationReport {
        ClassificationReport {
            prediction: self.heuristic.classify(features),
            final_state: advance(state, ClassificationAttempt::HeuristicFallback),
            fallback_reason: Some(reason),
            failure,
        }
    }
}
