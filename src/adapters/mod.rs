//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `classifier` - Remote style classification service (HTTP) and a scripted mock
//! - `http` - axum REST API
//! - `memory` - In-process storage and locking
//! - `redis` - Cross-server classification lock

pub mod classifier;
pub mod http;
pub mod memory;
pub mod redis;
