//! Scripted style classifier for tests and local runs.
//!
//! Predictions are consumed in order; once the script is exhausted every
//! call reports the service as unavailable.
//!
//! # Example
//!
//! ```ignore
//! let classifier = MockStyleClassifier::new()
//!     .with_prediction(prediction)
//!     .with_delay(Duration::from_millis(50));
//!
//! let result = classifier.predict(&features).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::features::FeatureVector;
use crate::domain::style::Prediction;
use crate::ports::{ClassifierError, ServiceHealth, StyleClassifier};

#[derive(Debug, Clone)]
pub struct MockStyleClassifier {
    /// Scripted outcomes, consumed in order.
    outcomes: Arc<Mutex<VecDeque<Result<Prediction, ClassifierError>>>>,
    healthy: Arc<AtomicBool>,
    /// Simulated latency per predict call.
    delay: Duration,
    /// Feature vectors received, for verification.
    calls: Arc<Mutex<Vec<FeatureVector>>>,
    health_calls: Arc<Mutex<usize>>,
}

impl Default for MockStyleClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockStyleClassifier {
    /// Healthy classifier with an empty script.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            healthy: Arc::new(AtomicBool::new(true)),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
            health_calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_prediction(self, prediction: Prediction) -> Self {
        lock(&self.outcomes).push_back(Ok(prediction));
        self
    }

    pub fn with_error(self, error: ClassifierError) -> Self {
        lock(&self.outcomes).push_back(Err(error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn unhealthy(self) -> Self {
        self.set_healthy(false);
        self
    }

    /// Flips the health flag on every clone.
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn predict_calls(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn health_calls(&self) -> usize {
        *lock(&self.health_calls)
    }

    pub fn received(&self) -> Vec<FeatureVector> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl StyleClassifier for MockStyleClassifier {
    async fn check_health(&self) -> ServiceHealth {
        *lock(&self.health_calls) += 1;
        if self.healthy.load(Ordering::SeqCst) {
            ServiceHealth::available()
        } else {
            ServiceHealth::unavailable("mock classifier marked unhealthy")
        }
    }

    async fn predict(&self, features: &FeatureVector) -> Result<Prediction, ClassifierError> {
        lock(&self.calls).push(features.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        lock(&self.outcomes).pop_front().unwrap_or_else(|| {
            Err(ClassifierError::Unavailable(
                "no scripted prediction".to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::style::{ClassificationMethod, DimensionScores};

    fn prediction(value: f64) -> Prediction {
        Prediction::new(
            DimensionScores::uniform(value),
            DimensionScores::uniform(0.8),
            ClassificationMethod::Ml,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn returns_scripted_outcomes_in_order() {
        let classifier = MockStyleClassifier::new()
            .with_prediction(prediction(0.5))
            .with_error(ClassifierError::Timeout { timeout_ms: 10 });
        let features = FeatureVector::neutral();

        let first = classifier.predict(&features).await.unwrap();
        assert_eq!(first.dimensions().active_reflective, 0.5);
        assert_eq!(
            classifier.predict(&features).await,
            Err(ClassifierError::Timeout { timeout_ms: 10 })
        );
        assert!(matches!(
            classifier.predict(&features).await,
            Err(ClassifierError::Unavailable(_))
        ));
        assert_eq!(classifier.predict_calls(), 3);
    }

    #[tokio::test]
    async fn health_flag_is_shared_across_clones() {
        let classifier = MockStyleClassifier::new();
        let clone = classifier.clone();

        assert!(clone.check_health().await.available);
        classifier.set_healthy(false);
        let health = clone.check_health().await;

        assert!(!health.available);
        assert!(health.error.is_some());
        assert_eq!(classifier.health_calls(), 2);
    }
}
