//! Features module - Behavior records to classifier input.
//!
//! [`FeaturePipeline`] is a pure transform: the same records always yield
//! the same [`FeatureVector`] and [`DataQuality`].

mod pipeline;
mod quality;
mod vector;

pub use pipeline::FeaturePipeline;
pub use quality::{DataQuality, DataQualityThresholds};
pub use vector::FeatureVector;
