//! Request DTOs for the settings API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::setting::{EntryBuilder, SettingValue, MAX_NAME_LENGTH};

fn validate_name(field: &str, name: &str) -> Option<String> {
    if name.trim().is_empty() {
        return Some(format!("{} cannot be empty", field));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Some(format!(
            "{} exceeds maximum length of {} characters",
            field, MAX_NAME_LENGTH
        ));
    }
    None
}

/// Query for GET /settings/get
#[derive(Debug, Clone, Deserialize)]
pub struct GetQuery {
    pub name: String,
    #[serde(default)]
    pub group: String,
    /// Returned when the setting does not exist
    #[serde(default)]
    pub default: Option<String>,
}

/// Query for DELETE /settings/del
#[derive(Debug, Clone, Deserialize)]
pub struct KeyQuery {
    pub name: String,
    #[serde(default)]
    pub group: String,
}

/// Request body for PUT /settings/set
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub name: String,
    pub value: SettingValue,
    #[serde(default)]
    pub group: String,
}

impl SetRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_name("Name", &self.name)
    }
}

/// Request body for POST /settings/add
#[derive(Debug, Clone, Deserialize)]
pub struct AddRequest {
    pub name: String,
    pub value: SettingValue,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub default_value: Option<SettingValue>,
    #[serde(default)]
    pub definition: Option<serde_json::Value>,
    #[serde(default)]
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub autoload: Option<bool>,
}

impl AddRequest {
    pub fn validate(&self) -> Option<String> {
        validate_name("Name", &self.name)
    }

    /// Builder carrying every field present in the request.
    pub fn to_builder(&self) -> EntryBuilder {
        let mut builder = EntryBuilder::new(self.name.as_str(), self.value.clone())
            .group(self.group.as_str());
        if let Some(default_value) = &self.default_value {
            builder = builder.default_value(default_value.clone());
        }
        if let Some(definition) = &self.definition {
            builder = builder.definition(definition.clone());
        }
        if let Some(sort_order) = self.sort_order {
            builder = builder.sort_order(sort_order);
        }
        if let Some(autoload) = self.autoload {
            builder = builder.autoload(autoload);
        }
        builder
    }
}

/// Request body for POST /settings/rename
#[derive(Debug, Clone, Deserialize)]
pub struct RenameRequest {
    pub name: String,
    #[serde(default)]
    pub group: String,
    pub new_name: String,
    /// Keeps the current group when absent
    #[serde(default)]
    pub new_group: Option<String>,
}

impl RenameRequest {
    pub fn validate(&self) -> Option<String> {
        validate_name("Name", &self.name).or_else(|| validate_name("New name", &self.new_name))
    }
}

/// Request body for POST /settings/reset
#[derive(Debug, Clone, Deserialize)]
pub struct ResetRequest {
    pub name: String,
    #[serde(default)]
    pub group: String,
    pub default_value: SettingValue,
    #[serde(default)]
    pub definition: Option<serde_json::Value>,
    #[serde(default)]
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub autoload: Option<bool>,
}

impl ResetRequest {
    pub fn validate(&self) -> Option<String> {
        validate_name("Name", &self.name)
    }

    /// Baseline fields to apply to the existing setting.
    pub fn to_baseline(&self) -> EntryBuilder {
        let mut builder = EntryBuilder::default().default_value(self.default_value.clone());
        if let Some(definition) = &self.definition {
            builder = builder.definition(definition.clone());
        }
        if let Some(sort_order) = self.sort_order {
            builder = builder.sort_order(sort_order);
        }
        if let Some(autoload) = self.autoload {
            builder = builder.autoload(autoload);
        }
        builder
    }
}
