//! Style classifier adapters.
//!
//! - `HttpStyleClassifier` - reqwest client for the remote classification service
//! - `MockStyleClassifier` - scripted classifier for tests and local runs

mod http_classifier;
mod mock_classifier;

pub use http_classifier::{HttpClassifierConfig, HttpStyleClassifier};
pub use mock_classifier::MockStyleClassifier;
