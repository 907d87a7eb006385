//! Setting Service Module
//!
//! Orchestrates the persistent store and the cache. The store is the source
//! of truth; the cache holds autoloaded entries and anything read through it.
//!
//! # Cache modes
//! - `with_cache`: reads try the cache first, store hits are written back,
//!   and every successful mutation writes through.
//! - `autoload` only: the cache holds exactly the autoload-flagged entries;
//!   point reads go to the store and `all()` merges both.
//! - neither: the cache is never touched.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::error::{Result, ValidationErrors};
use crate::setting::{key_label, Entry, EntryBuilder, SettingValue};
use crate::store::{EntryFilter, EntryStore, StoreError};

/// Values grouped as group -> name -> value.
pub type SettingMap = BTreeMap<String, BTreeMap<String, SettingValue>>;

// == Service Options ==
/// Cache behaviour flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Consult and fill the cache on reads
    pub with_cache: bool,
    /// Load autoload-flagged entries into the cache at construction
    pub autoload: bool,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            with_cache: true,
            autoload: true,
        }
    }
}

// == Setting Service ==
#[derive(Debug)]
pub struct SettingService<S> {
    store: S,
    cache: CacheStore,
    options: ServiceOptions,
    last_errors: ValidationErrors,
}

impl<S: EntryStore> SettingService<S> {
    // == Constructor ==
    /// Creates the service and, when `options.autoload` is set, fills the
    /// cache with every autoload-flagged entry.
    pub fn new(store: S, cache: CacheStore, options: ServiceOptions) -> Result<Self> {
        let mut service = Self {
            store,
            cache,
            options,
            last_errors: ValidationErrors::new(),
        };

        if options.autoload {
            service.autoload()?;
        }

        Ok(service)
    }

    // == All ==
    /// Returns every value, grouped by group then name.
    pub fn all(&mut self) -> Result<SettingMap> {
        let entries = if self.options.with_cache {
            let mut entries = self
                .store
                .find_all(&EntryFilter::ExcludeIds(self.cache.ids()))?;
            entries.extend(self.cache.all());
            entries
        } else if self.options.autoload {
            let mut entries = self.store.find_all(&EntryFilter::Autoload(false))?;
            entries.extend(self.cache.all());
            entries
        } else {
            self.store.find_all(&EntryFilter::All)?
        };

        let mut values = SettingMap::new();
        for entry in entries {
            values
                .entry(entry.group)
                .or_default()
                .insert(entry.name, entry.value);
        }
        Ok(values)
    }

    // == Add ==
    /// Registers a new setting built from `builder`.
    ///
    /// Returns `Ok(false)` when the store rejects it; the reasons are in
    /// [`last_errors`](Self::last_errors).
    pub fn add(&mut self, builder: EntryBuilder) -> Result<bool> {
        self.last_errors = ValidationErrors::new();
        let entry = builder.build_new();
        self.persist(entry)
    }

    // == Get ==
    /// Returns the value stored under `name` in `group`, or `default`.
    pub fn get(
        &mut self,
        name: &str,
        group: &str,
        default: impl Into<SettingValue>,
    ) -> Result<SettingValue> {
        Ok(match self.find(name, group)? {
            Some(entry) => entry.value,
            None => default.into(),
        })
    }

    // == Has ==
    pub fn has(&mut self, name: &str, group: &str) -> Result<bool> {
        if self.options.with_cache && self.cache.has(name, group) {
            return Ok(true);
        }
        Ok(self.find(name, group)?.is_some())
    }

    // == Set ==
    /// Updates the value of an existing setting, or creates it with `value`
    /// as both its value and its default.
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<SettingValue>,
        group: &str,
    ) -> Result<bool> {
        self.last_errors = ValidationErrors::new();
        let value = value.into();

        let Some(mut entry) = self.find(name, group)? else {
            return self.add(
                EntryBuilder::new(name, value.clone())
                    .group(group)
                    .default_value(value),
            );
        };

        entry.value = value;
        self.persist(entry)
    }

    // == Rename ==
    /// Moves a setting to `new_name`, and to `new_group` when given.
    ///
    /// Returns `Ok(false)` if the setting does not exist or the new key is
    /// rejected.
    pub fn rename(
        &mut self,
        name: &str,
        group: &str,
        new_name: &str,
        new_group: Option<&str>,
    ) -> Result<bool> {
        self.last_errors = ValidationErrors::new();
        let Some(mut entry) = self.find(name, group)? else {
            return Ok(false);
        };

        entry.name = new_name.to_string();
        if let Some(new_group) = new_group {
            entry.group = new_group.to_string();
        }
        self.persist(entry)
    }

    // == Reset ==
    /// Replaces the baseline of a setting (default value, definition, sort
    /// order, autoload) with the fields set on `baseline`.
    ///
    /// Name, group and value on `baseline` are ignored.
    pub fn reset(&mut self, name: &str, group: &str, baseline: EntryBuilder) -> Result<bool> {
        self.last_errors = ValidationErrors::new();
        let Some(mut entry) = self.find(name, group)? else {
            return Ok(false);
        };

        baseline.baseline_only().apply_to(&mut entry);
        self.persist(entry)
    }

    // == Remove ==
    pub fn remove(&mut self, name: &str, group: &str) -> Result<bool> {
        self.last_errors = ValidationErrors::new();
        let Some(entry) = self.find(name, group)? else {
            return Ok(false);
        };

        let deleted = self.store.delete(&entry)?;
        if let Some(id) = entry.id {
            self.cache.remove_id(id);
        }
        if deleted {
            debug!("Removed setting {}", entry.label());
        }
        Ok(deleted)
    }

    // == Accessors ==
    /// Validation errors from the most recent rejected mutation.
    pub fn last_errors(&self) -> &ValidationErrors {
        &self.last_errors
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn options(&self) -> ServiceOptions {
        self.options
    }

    fn autoload(&mut self) -> Result<usize> {
        let entries = self.store.find_all(&EntryFilter::Autoload(true))?;
        let count = entries.len();
        for entry in entries {
            self.cache.set(entry);
        }
        info!("Autoloaded {} settings into cache", count);
        Ok(count)
    }

    /// Cache-first lookup with fill on store hit. Always returns an owned
    /// copy so a failed save never leaves a half-modified cached entry.
    fn find(&mut self, name: &str, group: &str) -> Result<Option<Entry>> {
        if self.options.with_cache {
            if let Ok(entry) = self.cache.get(name, group) {
                debug!("Cache hit for {}", key_label(name, group));
                return Ok(Some(entry));
            }
        }

        let found = self.store.find_one(name, group)?;
        match &found {
            Some(entry) if self.options.with_cache => {
                debug!("Cache fill for {}", entry.label());
                self.cache.set(entry.clone());
            }
            None => debug!("Setting {} not found", key_label(name, group)),
            _ => {}
        }
        Ok(found)
    }

    /// Saves `entry`, capturing validation failures into `last_errors`.
    fn persist(&mut self, mut entry: Entry) -> Result<bool> {
        match self.store.save(&mut entry) {
            Ok(()) => {
                self.write_through(entry);
                Ok(true)
            }
            Err(StoreError::Validation(errors)) => {
                warn!("Rejected setting {}: {}", entry.label(), errors);
                self.last_errors = errors;
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn write_through(&mut self, entry: Entry) {
        if self.options.with_cache || (self.options.autoload && entry.autoload) {
            self.cache.set(entry);
        } else if self.options.autoload {
            // autoload flag cleared: it must come from the store in all()
            if let Some(id) = entry.id {
                self.cache.remove_id(id);
            }
        }
    }
}
