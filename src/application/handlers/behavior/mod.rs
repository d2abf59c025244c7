//! Behavior ingestion handlers.

mod behavior_aggregator;

pub use behavior_aggregator::{BehaviorAggregator, EndSessionResult, ModeStartResult};
