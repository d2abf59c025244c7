//! Redis-backed adapters for multi-server deployments.

mod classification_lock;

pub use classification_lock::RedisClassificationLock;
