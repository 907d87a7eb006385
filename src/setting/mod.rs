//! Setting Module
//!
//! Setting entries, the builder that assembles them, and the service that
//! routes reads and writes between the cache and the persistent store.

mod builder;
mod entry;
mod service;


// Re-export public types
pub use builder::EntryBuilder;
pub use entry::{key_label, Entry};
pub use service::{ServiceOptions, SettingMap, SettingService};

// == Public Constants ==
/// Value type carried by entries; plain strings or structured data
pub type SettingValue = serde_json::Value;

/// Maximum allowed setting name length in characters
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum allowed group name length in characters
pub const MAX_GROUP_LENGTH: usize = 255;

/// Sort order given to entries that do not specify one
pub const DEFAULT_SORT_ORDER: i32 = 50;
