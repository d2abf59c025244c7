//! Behavior module - Observed engagement with content-presentation modes.
//!
//! Telemetry arrives as mode start/end pairs and activity events. It is
//! folded into one [`BehaviorRecord`] per user per UTC day.

mod mode;
mod record;
mod tracker;
mod window;

pub use mode::{ActivityKind, ContentMode};
pub use record::{ActivityEngagement, BehaviorRecord, BucketKey, ModeStats, ModeUsage};
pub use tracker::{ModeSegmentKey, OpenSegment, SegmentOutcome, SegmentPolicy};
pub use window::EvidenceWindow;
