//! Adaptive Learning - Learning-style inference engine
//!
//! Turns content-mode telemetry into a four-dimension learning-style
//! profile and adapts dashboard layout preferences to it.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
