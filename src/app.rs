//! Composition root.
//!
//! Builds the handler graph from configuration and a set of port
//! implementations, and assembles the HTTP router around it.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::adapters::http::learning_style::{learning_style_routes, LearningStyleHandlers};
use crate::adapters::memory::{
    InMemoryBehaviorStore, InMemoryClassificationLock, InMemoryModeSessionStore,
    InMemoryPreferenceRepository, InMemoryProfileRepository,
};
use crate::application::handlers::{
    BehaviorAggregator, ClassificationOrchestrator, ClassifyLearningStyleHandler,
    GetPreferencesHandler, GetStyleProfileHandler, ManualPreferencesHandler,
    PreferenceWriter, RecommendLayoutHandler, RecordInteractionHandler,
};
use crate::application::SessionLifetimes;
use crate::config::{AppConfig, ValidationError};
use crate::ports::{
    BehaviorStore, ClassificationLock, ModeSessionStore, PreferenceRepository,
    ProfileRepository, StyleClassifier,
};

/// Port implementations the handlers run against.
#[derive(Clone)]
pub struct Infrastructure {
    pub behavior: Arc<dyn BehaviorStore>,
    pub sessions: Arc<dyn ModeSessionStore>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub preferences: Arc<dyn PreferenceRepository>,
    pub lock: Arc<dyn ClassificationLock>,
    pub classifier: Arc<dyn StyleClassifier>,
}

impl Infrastructure {
    /// In-memory storage and lock around the given classifier.
    pub fn in_memory(classifier: Arc<dyn StyleClassifier>) -> Self {
        Self {
            behavior: Arc::new(InMemoryBehaviorStore::new()),
            sessions: Arc::new(InMemoryModeSessionStore::new()),
            profiles: Arc::new(InMemoryProfileRepository::new()),
            preferences: Arc::new(InMemoryPreferenceRepository::new()),
            lock: Arc::new(InMemoryClassificationLock::new()),
            classifier,
        }
    }

    pub fn with_lock(mut self, lock: Arc<dyn ClassificationLock>) -> Self {
        self.lock = lock;
        self
    }
}

/// Wired application services.
#[derive(Clone)]
pub struct Services {
    pub handlers: LearningStyleHandlers,
}

impl Services {
    /// Builds every handler from validated engine and classifier settings.
    pub fn build(config: &AppConfig, infra: Infrastructure) -> Result<Self, ValidationError> {
        let engine = &config.engine;
        let lifetimes = Arc::new(SessionLifetimes::new());
        let defaults = engine.default_adaptive_settings()?;
        let policy = engine.reclassification_policy()?;
        let thresholds = engine.label_thresholds()?;
        let evidence = engine.evidence_window()?;

        let behavior = Arc::new(BehaviorAggregator::new(
            infra.behavior.clone(),
            infra.sessions.clone(),
            lifetimes.clone(),
            engine.segment_policy()?,
        ));

        let orchestrator = Arc::new(ClassificationOrchestrator::new(
            infra.classifier.clone(),
            engine.heuristic()?,
            config.classifier.orchestrator_settings(),
        ));

        let classify = ClassifyLearningStyleHandler::new(
            infra.behavior.clone(),
            infra.profiles.clone(),
            infra.preferences.clone(),
            infra.lock.clone(),
            orchestrator.clone(),
            engine.feature_pipeline()?,
            policy,
            defaults,
        )
        .with_evidence_window(evidence)
        .with_lock_ttl(engine.lock_ttl());

        let get_profile = GetStyleProfileHandler::new(
            infra.profiles.clone(),
            infra.behavior.clone(),
            policy,
            thresholds,
        )
        .with_evidence_window(evidence);

        let writer = PreferenceWriter::new(infra.preferences.clone(), defaults);
        let recommend = RecommendLayoutHandler::new(
            infra.profiles.clone(),
            writer.clone(),
            engine.preference_translator()?,
        );

        let handlers = LearningStyleHandlers::new(
            behavior,
            Arc::new(classify),
            Arc::new(get_profile),
            orchestrator,
            Arc::new(GetPreferencesHandler::new(writer.clone())),
            Arc::new(recommend),
            Arc::new(ManualPreferencesHandler::new(writer.clone())),
            Arc::new(RecordInteractionHandler::new(writer)),
            lifetimes,
        );

        Ok(Self { handlers })
    }
}

/// Full router: API under `/api/learning-style` plus a liveness probe.
///
/// Every response carries an `x-request-id`, generated when the caller
/// did not send one.
pub fn build_router(config: &AppConfig, services: &Services) -> Router {
    let origins = config.server.cors_origins_list();
    let cors = if origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        let allowed: Vec<http::HeaderValue> =
            origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(allowed)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/health", axum::routing::get(|| async { "OK" }))
        .nest(
            "/api/learning-style",
            learning_style_routes(services.handlers.clone()),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Logs the effective engine parameters once at startup.
pub fn log_engine_settings(config: &AppConfig) {
    let engine = &config.engine;
    info!(
        dominance_threshold = engine.dominance_threshold,
        count_cap = engine.count_cap,
        staleness_window_days = engine.staleness_window_days,
        min_interactions = engine.min_interactions,
        classifier_url = %config.classifier.base_url,
        "Learning-style engine configured"
    );
}
