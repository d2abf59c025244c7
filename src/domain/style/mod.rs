//! Style module - Learning-style classification along four dichotomies.
//!
//! The profile is only ever advanced by [`ProfileAggregator`]; every other
//! component reads it.

mod aggregator;
mod attempt;
mod dimension;
mod heuristic;
mod labels;
mod prediction;
mod profile;
mod recommended;
mod scheduler;

pub use aggregator::{LearningRate, ProfileAggregator};
pub use attempt::{ClassificationAttempt, FallbackReason};
pub use dimension::{Dimension, DimensionScores};
pub use heuristic::HeuristicClassifier;
pub use labels::{DominantLabels, LabelThresholds, StyleLabel};
pub use prediction::{ClassificationMethod, Prediction};
pub use profile::LearningStyleProfile;
pub use recommended::RecommendedMode;
pub use scheduler::{ClassificationTrigger, ReclassificationPolicy, ReclassificationReason};
