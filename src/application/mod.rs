//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (behavior ingestion, classification, preference writes)
//! are kept apart from query handlers (profile and preference reads).

pub mod handlers;
mod session;

pub use session::{SessionLifetimes, SessionSignal};
