//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `BehaviorStore` - Day-bucketed engagement records with atomic increments
//! - `ModeSessionStore` - Open mode segments awaiting their end event
//! - `ProfileRepository` - Learning-style profiles, whole-document writes
//! - `PreferenceRepository` - Adaptive preferences with optimistic versioning
//!
//! ## External Service Ports
//!
//! - `StyleClassifier` - Remote learning-style classification service
//! - `ClassificationLock` - Per-user single-flight guard for classification

mod behavior_store;
mod classification_lock;
mod mode_session_store;
mod preference_repository;
mod profile_repository;
mod style_classifier;

pub use behavior_store::BehaviorStore;
pub use classification_lock::{ClassificationLock, LockLease};
pub use mode_session_store::ModeSessionStore;
pub use preference_repository::PreferenceRepository;
pub use profile_repository::ProfileRepository;
pub use style_classifier::{ClassifierError, ServiceHealth, StyleClassifier};
