//! Memory Store Module
//!
//! `EntryStore` backed by an ordered map, used by the server binary and tests.

use std::collections::BTreeMap;

use tracing::debug;

use crate::setting::Entry;
use crate::store::{EntryFilter, EntryStore, StoreError, StoreResult};

// == Memory Store ==
/// In-memory entry store keyed by id.
///
/// Ids are assigned from 1 upward and never reused; `find_all` returns
/// entries in id order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Rows by id
    rows: BTreeMap<u64, Entry>,
    /// Last id handed out
    last_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check(&self, entry: &Entry) -> StoreResult<()> {
        let mut errors = entry.validate();

        let taken = self
            .rows
            .values()
            .any(|row| row.matches(&entry.name, &entry.group) && row.id != entry.id);
        if taken {
            errors.add(
                "name",
                format!(
                    "Name \"{}\" has already been taken in group \"{}\".",
                    entry.name, entry.group
                ),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation(errors))
        }
    }
}

impl EntryStore for MemoryStore {
    fn find_all(&self, filter: &EntryFilter) -> StoreResult<Vec<Entry>> {
        Ok(self
            .rows
            .values()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect())
    }

    fn find_one(&self, name: &str, group: &str) -> StoreResult<Option<Entry>> {
        Ok(self
            .rows
            .values()
            .find(|entry| entry.matches(name, group))
            .cloned())
    }

    fn save(&mut self, entry: &mut Entry) -> StoreResult<()> {
        self.check(entry)?;

        let id = match entry.id {
            Some(id) if self.rows.contains_key(&id) => id,
            Some(id) => {
                return Err(StoreError::Backend(format!(
                    "cannot update entry {}: no row with id {}",
                    entry.label(),
                    id
                )))
            }
            None => {
                self.last_id += 1;
                entry.id = Some(self.last_id);
                self.last_id
            }
        };

        debug!("Saved setting {} as row {}", entry.label(), id);
        self.rows.insert(id, entry.clone());
        Ok(())
    }

    fn delete(&mut self, entry: &Entry) -> StoreResult<bool> {
        Ok(entry
            .id
            .and_then(|id| self.rows.remove(&id))
            .is_some())
    }
}
