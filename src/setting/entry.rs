//! Setting Entry Module
//!
//! Defines the plain data record for a single named, grouped setting.

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::setting::{SettingValue, DEFAULT_SORT_ORDER, MAX_GROUP_LENGTH, MAX_NAME_LENGTH};

// == Setting Entry ==
/// A single setting with its value and metadata.
///
/// Entries carry no persistence behaviour of their own; stores load and save
/// them, and the cache holds clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Store identity, `None` until the first successful save
    pub id: Option<u64>,
    /// Name, unique within `group`
    pub name: String,
    /// Namespace; the empty string is the ungrouped namespace
    pub group: String,
    /// Current value
    pub value: SettingValue,
    /// Value restored by a reset
    pub default_value: SettingValue,
    /// Rendering metadata, never interpreted here
    pub definition: Option<serde_json::Value>,
    /// Presentation ordering hint
    pub sort_order: i32,
    /// Loaded into the cache when the service starts
    pub autoload: bool,
}

impl Entry {
    // == Constructor ==
    /// Creates an unsaved, ungrouped entry with default metadata.
    pub fn new(name: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        Self {
            id: None,
            name: name.into(),
            group: String::new(),
            value: value.into(),
            default_value: SettingValue::String(String::new()),
            definition: None,
            sort_order: DEFAULT_SORT_ORDER,
            autoload: false,
        }
    }

    /// True when this entry is stored under `name` in `group`.
    pub fn matches(&self, name: &str, group: &str) -> bool {
        self.name == name && self.group == group
    }

    /// Human-readable `group.name` label used in logs and error messages.
    pub fn label(&self) -> String {
        key_label(&self.name, &self.group)
    }

    // == Validate ==
    /// Checks the field rules every store enforces before saving.
    ///
    /// Uniqueness of `(name, group)` needs the whole collection and is left
    /// to the store.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if self.name.trim().is_empty() {
            errors.add("name", "Name cannot be blank.");
        } else if self.name.chars().count() > MAX_NAME_LENGTH {
            errors.add(
                "name",
                format!("Name should contain at most {} characters.", MAX_NAME_LENGTH),
            );
        }

        if self.group.chars().count() > MAX_GROUP_LENGTH {
            errors.add(
                "group",
                format!("Group should contain at most {} characters.", MAX_GROUP_LENGTH),
            );
        }

        errors
    }
}

/// Formats a key as `group.name`, or just `name` in the ungrouped namespace.
pub fn key_label(name: &str, group: &str) -> String {
    if group.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", group, name)
    }
}
