//! Cache Store Module
//!
//! Entries grouped by namespace, with a secondary id index so that renames
//! replace the old key and callers can exclude cached rows from store queries.

use std::collections::{hash_map, HashMap};

use crate::cache::CacheStats;
use crate::error::{Result, SettingError};
use crate::setting::{key_label, Entry};

// == Cache Store ==
/// In-memory setting cache.
///
/// No internal locking: one writer at a time. Share it behind a lock if
/// several tasks need it.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// group -> name -> entry
    groups: HashMap<String, HashMap<String, Entry>>,
    /// id -> (name, group) for saved entries
    ids: HashMap<u64, (String, String)>,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Has ==
    /// Returns true if an entry is cached under `name` in `group`.
    pub fn has(&self, name: &str, group: &str) -> bool {
        self.groups
            .get(group)
            .is_some_and(|names| names.contains_key(name))
    }

    // == Get ==
    /// Retrieves a copy of the cached entry, recording a hit or a miss.
    pub fn get(&mut self, name: &str, group: &str) -> Result<Entry> {
        match self.groups.get(group).and_then(|names| names.get(name)) {
            Some(entry) => {
                self.stats.record_hit();
                Ok(entry.clone())
            }
            None => {
                self.stats.record_miss();
                Err(SettingError::NotFound(key_label(name, group)))
            }
        }
    }

    // == Set ==
    /// Inserts or replaces the entry stored under its name and group.
    ///
    /// When the entry's id is already cached under a different key (the
    /// entry was renamed), the old key is dropped.
    pub fn set(&mut self, entry: Entry) {
        let id = entry.id;

        let stale_key = id
            .and_then(|id| self.ids.get(&id))
            .filter(|(name, group)| !entry.matches(name, group))
            .cloned();
        if let Some((name, group)) = stale_key {
            self.take(&name, &group);
        }

        let key = (entry.name.clone(), entry.group.clone());
        let replaced = self
            .groups
            .entry(entry.group.clone())
            .or_default()
            .insert(entry.name.clone(), entry);

        if let Some(old_id) = replaced.and_then(|old| old.id) {
            if Some(old_id) != id {
                self.ids.remove(&old_id);
            }
        }
        if let Some(id) = id {
            self.ids.insert(id, key);
        }

        self.stats.record_fill();
        self.sync_len();
    }

    // == Remove ==
    /// Drops the entry cached under `name` in `group`.
    pub fn remove(&mut self, name: &str, group: &str) -> Option<Entry> {
        let removed = self.take(name, group);
        if removed.is_some() {
            self.stats.record_invalidation();
            self.sync_len();
        }
        removed
    }

    /// Drops the entry with store id `id`, wherever it is cached.
    pub fn remove_id(&mut self, id: u64) -> Option<Entry> {
        let (name, group) = self.ids.get(&id).cloned()?;
        self.remove(&name, &group)
    }

    /// Empties the cache.
    pub fn clear(&mut self) {
        for _ in 0..self.len() {
            self.stats.record_invalidation();
        }
        self.groups.clear();
        self.ids.clear();
        self.sync_len();
    }

    // == Enumeration ==
    /// Copies of every cached entry, in no particular order.
    pub fn all(&self) -> Vec<Entry> {
        self.iter().cloned().collect()
    }

    /// Borrowing iterator over cached entries. Each call starts afresh.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            groups: self.groups.values(),
            current: None,
        }
    }

    /// Store ids of every cached entry that has one.
    pub fn ids(&self) -> Vec<u64> {
        self.iter().filter_map(|entry| entry.id).collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.groups.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn take(&mut self, name: &str, group: &str) -> Option<Entry> {
        let names = self.groups.get_mut(group)?;
        let removed = names.remove(name)?;
        if names.is_empty() {
            self.groups.remove(group);
        }
        if let Some(id) = removed.id {
            self.ids.remove(&id);
        }
        Some(removed)
    }

    fn sync_len(&mut self) {
        let len = self.len();
        self.stats.set_total_entries(len);
    }
}

// == Iteration ==
/// Iterator over the entries of a [`CacheStore`].
pub struct Iter<'a> {
    groups: hash_map::Values<'a, String, HashMap<String, Entry>>,
    current: Option<hash_map::Values<'a, String, Entry>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<&'a Entry> {
        loop {
            if let Some(entry) = self.current.as_mut().and_then(Iterator::next) {
                return Some(entry);
            }
            self.current = Some(self.groups.next()?.values());
        }
    }
}

impl<'a> IntoIterator for &'a CacheStore {
    type Item = &'a Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
