//! Entry Builder
//!
//! Assembles entries from individually set fields. A builder either creates
//! a fresh entry, filling unset fields with defaults, or overlays only the
//! fields it was given onto an existing entry.

use crate::setting::{Entry, SettingValue};

// == Entry Builder ==
#[derive(Debug, Clone, Default)]
pub struct EntryBuilder {
    name: Option<String>,
    group: Option<String>,
    value: Option<SettingValue>,
    default_value: Option<SettingValue>,
    definition: Option<serde_json::Value>,
    sort_order: Option<i32>,
    autoload: Option<bool>,
}

impl EntryBuilder {
    /// Starts a builder with the two fields every new setting needs.
    pub fn new(name: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        Self::default().name(name).value(value)
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn value(mut self, value: impl Into<SettingValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn default_value(mut self, default_value: impl Into<SettingValue>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn definition(mut self, definition: serde_json::Value) -> Self {
        self.definition = Some(definition);
        self
    }

    pub fn sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    pub fn autoload(mut self, autoload: bool) -> Self {
        self.autoload = Some(autoload);
        self
    }

    /// Keeps only the baseline fields a reset may touch: default value,
    /// definition, sort order and autoload.
    pub fn baseline_only(mut self) -> Self {
        self.name = None;
        self.group = None;
        self.value = None;
        self
    }

    // == Build New ==
    /// Builds an unsaved entry, applying defaults to every unset field.
    pub fn build_new(&self) -> Entry {
        let mut entry = Entry::new(String::new(), "");
        self.apply_to(&mut entry);
        entry
    }

    // == Apply To ==
    /// Overwrites the fields of `entry` that were set on this builder.
    pub fn apply_to(&self, entry: &mut Entry) {
        if let Some(name) = &self.name {
            entry.name = name.clone();
        }
        if let Some(group) = &self.group {
            entry.group = group.clone();
        }
        if let Some(value) = &self.value {
            entry.value = value.clone();
        }
        if let Some(default_value) = &self.default_value {
            entry.default_value = default_value.clone();
        }
        if let Some(definition) = &self.definition {
            entry.definition = Some(definition.clone());
        }
        if let Some(sort_order) = self.sort_order {
            entry.sort_order = sort_order;
        }
        if let Some(autoload) = self.autoload {
            entry.autoload = autoload;
        }
    }
}
