//! In-memory adapters for development, tests, and single-node deployments.
//!
//! All state lives behind `Arc<RwLock<..>>` so clones share storage.

mod behavior_store;
mod classification_lock;
mod mode_session_store;
mod preference_repository;
mod profile_repository;

pub use behavior_store::InMemoryBehaviorStore;
pub use classification_lock::InMemoryClassificationLock;
pub use mode_session_store::InMemoryModeSessionStore;
pub use preference_repository::InMemoryPreferenceRepository;
pub use profile_repository::InMemoryProfileRepository;
