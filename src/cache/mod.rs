//! Cache Module
//!
//! In-memory cache of setting entries keyed by name and group.

mod stats;
mod store;

// Re-export public types
pub use stats::CacheStats;
pub use store::{CacheStore, Iter};
