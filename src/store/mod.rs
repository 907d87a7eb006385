//! Entry Store Module
//!
//! The persistence interface the setting service depends on, plus an
//! in-memory implementation.

mod memory;

pub use memory::MemoryStore;

use thiserror::Error;

use crate::error::{SettingError, ValidationErrors};
use crate::setting::Entry;

// == Store Error ==
#[derive(Error, Debug)]
pub enum StoreError {
    /// Entry rejected by field rules or the `(name, group)` uniqueness rule
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Backend failure (I/O, connectivity, corrupt state)
    #[error("Backend failure: {0}")]
    Backend(String),
}

impl From<StoreError> for SettingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(errors) => SettingError::Validation(errors),
            StoreError::Backend(msg) => SettingError::Store(msg),
        }
    }
}

/// Convenience Result type for store implementations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Entry Filter ==
/// Row selection for [`EntryStore::find_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryFilter {
    /// Every entry
    All,
    /// Entries whose autoload flag equals the given value
    Autoload(bool),
    /// Every entry whose id is not in the list
    ExcludeIds(Vec<u64>),
}

impl EntryFilter {
    /// True when `entry` is selected by this filter.
    pub fn matches(&self, entry: &Entry) -> bool {
        match self {
            EntryFilter::All => true,
            EntryFilter::Autoload(flag) => entry.autoload == *flag,
            EntryFilter::ExcludeIds(ids) => entry.id.map_or(true, |id| !ids.contains(&id)),
        }
    }
}

// == Entry Store Trait ==
/// Persistent collection of setting entries.
///
/// Implementations must keep `(name, group)` unique and guarantee atomicity
/// per row only.
pub trait EntryStore {
    /// Returns every entry selected by `filter`.
    fn find_all(&self, filter: &EntryFilter) -> StoreResult<Vec<Entry>>;

    /// Looks up a single entry by name and group.
    fn find_one(&self, name: &str, group: &str) -> StoreResult<Option<Entry>>;

    /// Inserts `entry` when it has no id (assigning one), updates it otherwise.
    fn save(&mut self, entry: &mut Entry) -> StoreResult<()>;

    /// Deletes `entry`. Returns `false` if it was not stored.
    fn delete(&mut self, entry: &Entry) -> StoreResult<bool>;
}
