//! Domain layer - Pure business logic with no external dependencies.
//!
//! - `foundation` - identifiers, timestamps, errors, state machine trait
//! - `behavior` - content-mode telemetry aggregated per day
//! - `features` - classifier input and data-quality metrics
//! - `style` - learning-style dimensions, profile, heuristic, smoothing, scheduling
//! - `preference` - adaptive layout preferences and the translator

pub mod behavior;
pub mod features;
pub mod foundation;
pub mod preference;
pub mod style;
