//! ClassifyLearningStyleHandler - Runs one classification cycle for a user.
//!
//! Cycle: take the per-user lock, gate on staleness, compute features,
//! classify (model or heuristic), smooth into the profile, persist.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::{ClassificationOrchestrator, ClassificationReport};
use crate::application::SessionSignal;
use crate::domain::behavior::EvidenceWindow;
use crate::domain::features::FeaturePipeline;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::preference::AdaptiveSettings;
use crate::domain::style::{
    ClassificationAttempt, ClassificationTrigger, FallbackReason, LearningStyleProfile,
    ProfileAggregator, ReclassificationPolicy, ReclassificationReason,
};
use crate::ports::{
    BehaviorStore, ClassificationLock, LockLease, PreferenceRepository, ProfileRepository,
};

/// Command to classify a user's learning style.
#[derive(Debug, Clone)]
pub struct ClassifyLearningStyleCommand {
    pub user_id: UserId,
    pub trigger: ClassificationTrigger,
    /// Abandon the cycle when this session ends.
    pub session: Option<SessionSignal>,
}

impl ClassifyLearningStyleCommand {
    pub fn new(user_id: UserId, trigger: ClassificationTrigger) -> Self {
        Self {
            user_id,
            trigger,
            session: None,
        }
    }

    pub fn with_session(mut self, signal: SessionSignal) -> Self {
        self.session = Some(signal);
        self
    }
}

/// A committed classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationSummary {
    pub profile: LearningStyleProfile,
    pub reason: ReclassificationReason,
    pub final_state: ClassificationAttempt,
    pub fallback_reason: Option<FallbackReason>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyOutcome {
    Classified(ClassificationSummary),
    /// The staleness gate declined a scheduled run.
    UpToDate(LearningStyleProfile),
    /// No counted behavior to classify from.
    InsufficientEvidence,
    /// Another cycle holds the user's lock.
    InProgress,
    /// The session ended first; nothing was written.
    Abandoned,
}

/// Dependencies and tuning for the classify handler.
pub struct ClassifyLearningStyleHandler {
    behavior: Arc<dyn BehaviorStore>,
    profiles: Arc<dyn ProfileRepository>,
    preferences: Arc<dyn PreferenceRepository>,
    lock: Arc<dyn ClassificationLock>,
    orchestrator: Arc<ClassificationOrchestrator>,
    pipeline: FeaturePipeline,
    policy: ReclassificationPolicy,
    default_settings: AdaptiveSettings,
    evidence: EvidenceWindow,
    lock_ttl: Duration,
}

/// Releases the lease when dropped, including when the handler future is
/// cancelled mid-cycle.
struct LeaseGuard {
    lock: Arc<dyn ClassificationLock>,
    lease: Option<LockLease>,
}

impl LeaseGuard {
    async fn release(mut self) {
        if let Some(lease) = self.lease.take() {
            if let Err(err) = self.lock.release(&lease).await {
                warn!(user_id = %lease.user_id, error = %err, "Failed to release classification lock");
            }
        }
    }
}

impl Drop for LeaseGuard {
    fn drop(&mut self) {
        let Some(lease) = self.lease.take() else {
            return;
        };
        let lock = self.lock.clone();
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn(async move {
                if let Err(err) = lock.release(&lease).await {
                    warn!(user_id = %lease.user_id, error = %err, "Failed to release classification lock");
                }
            });
        }
    }
}

impl ClassifyLearningStyleHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        behavior: Arc<dyn BehaviorStore>,
        profiles: Arc<dyn ProfileRepository>,
        preferences: Arc<dyn PreferenceRepository>,
        lock: Arc<dyn ClassificationLock>,
        orchestrator: Arc<ClassificationOrchestrator>,
        pipeline: FeaturePipeline,
        policy: ReclassificationPolicy,
        default_settings: AdaptiveSettings,
    ) -> Self {
        let lock_ttl = Duration::from_secs(30).max(orchestrator.settings().minimum_lease());
        Self {
            behavior,
            profiles,
            preferences,
            lock,
            orchestrator,
            pipeline,
            policy,
            default_settings,
            evidence: EvidenceWindow::default(),
            lock_ttl,
        }
    }

    pub fn with_evidence_window(mut self, window: EvidenceWindow) -> Self {
        self.evidence = window;
        self
    }

    /// Sets the lease TTL, never below what one cycle can take.
    pub fn with_lock_ttl(mut self, ttl: Duration) -> Self {
        let minimum = self.orchestrator.settings().minimum_lease();
        if ttl < minimum {
            warn!(
                requested_ms = ttl.as_millis() as u64,
                minimum_ms = minimum.as_millis() as u64,
                "Classification lock TTL shorter than one cycle; using the minimum"
            );
        }
        self.lock_ttl = ttl.max(minimum);
        self
    }

    pub fn lock_ttl(&self) -> Duration {
        self.lock_ttl
    }

    pub async fn handle(
        &self,
        cmd: ClassifyLearningStyleCommand,
    ) -> Result<ClassifyOutcome, DomainError> {
        let Some(lease) = self.lock.try_acquire(&cmd.user_id, self.lock_ttl).await? else {
            info!(user_id = %cmd.user_id, "Classification already in progress");
            return Ok(ClassifyOutcome::InProgress);
        };
        let guard = LeaseGuard {
            lock: self.lock.clone(),
            lease: Some(lease),
        };

        let outcome = self.run_cycle(cmd).await;
        guard.release().await;
        outcome
    }

    async fn run_cycle(
        &self,
        cmd: ClassifyLearningStyleCommand,
    ) -> Result<ClassifyOutcome, DomainError> {
        let ClassifyLearningStyleCommand {
            user_id,
            trigger,
            session,
        } = cmd;
        if session.as_ref().is_some_and(SessionSignal::is_ended) {
            return Ok(ClassifyOutcome::Abandoned);
        }

        let now = Timestamp::now();

        // 1. Load profile and settings together
        let (profile, preference) = futures::try_join!(
            self.profiles.find_by_user(&user_id),
            self.preferences.find_by_user(&user_id),
        )?;
        let profile = profile.unwrap_or_else(|| LearningStyleProfile::new(user_id.clone(), now));
        let rate = preference
            .map(|p| p.adaptive_settings().learning_rate)
            .unwrap_or(self.default_settings.learning_rate);

        // 2. Gate
        let records = self
            .behavior
            .records_for_user(&user_id, Some(self.evidence.start(&now)))
            .await?;
        let recent_volume =
            self.evidence
                .recent_volume(&records, profile.last_prediction().as_ref(), &now);

        let Some(reason) = self.policy.evaluate(&profile, recent_volume, now, trigger) else {
            return Ok(ClassifyOutcome::UpToDate(profile));
        };

        // 3. Features
        let quality = self.pipeline.assess_data_quality(&records);
        if !quality.has_evidence() {
            info!(user_id = %user_id, "No counted behavior; classification skipped");
            return Ok(ClassifyOutcome::InsufficientEvidence);
        }
        let features = self.pipeline.compute_features(&records);
        if let Err(err) = features.validate() {
            warn!(user_id = %user_id, error = %err, "Invalid feature vector; cycle aborted");
            return Err(err.into());
        }

        // 4. Classify, racing the session end
        let report: ClassificationReport = match session {
            Some(mut signal) => {
                tokio::select! {
                    report = self.orchestrator.classify(&features, &quality) => {
                        if signal.is_ended() {
                            return Ok(self.abandoned(&user_id));
                        }
                        report
                    }
                    _ = signal.ended() => return Ok(self.abandoned(&user_id)),
                }
            }
            None => self.orchestrator.classify(&features, &quality).await,
        };

        // 5. Smooth and commit
        let updated = ProfileAggregator::update_profile(
            &profile,
            &report.prediction,
            rate,
            quality,
            Timestamp::now(),
        );
        self.save_with_retry(&updated).await?;

        info!(
            user_id = %user_id,
            method = %updated.classification_method(),
            prediction_count = updated.prediction_count(),
            ?reason,
            "Learning style classified"
        );

        Ok(ClassifyOutcome::Classified(ClassificationSummary {
            profile: updated,
            reason,
            final_state: report.final_state,
            fallback_reason: report.fallback_reason,
        }))
    }

    fn abandoned(&self, user_id: &UserId) -> ClassifyOutcome {
        info!(user_id = %user_id, "Session ended before classification committed");
        ClassifyOutcome::Abandoned
    }

    async fn save_with_retry(&self, profile: &LearningStyleProfile) -> Result<(), DomainError> {
        let Err(first) = self.profiles.save(profile).await else {
            return Ok(());
        };
        warn!(user_id = %profile.user_id(), error = %first, "Profile write failed; retrying once");

        self.profiles.save(profile).await.map_err(|err| {
            warn!(user_id = %profile.user_id(), error = %err, "Profile write failed twice; cycle abandoned");
            DomainError::new(ErrorCode::PersistenceFailed, "Failed to persist learning style profile")
                .with_detail("cause", err.to_string())
        })
    }
}
