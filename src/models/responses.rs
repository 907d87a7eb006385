//! Response DTOs for the settings API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::setting::{SettingMap, SettingValue};

/// Response body for GET /settings
#[derive(Debug, Clone, Serialize)]
pub struct SettingsResponse {
    /// group -> name -> value
    pub settings: SettingMap,
}

/// Response body for GET /settings/get
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub name: String,
    pub group: String,
    /// Stored value, or the requested default
    pub value: SettingValue,
}

impl GetResponse {
    pub fn new(name: impl Into<String>, group: impl Into<String>, value: SettingValue) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            value,
        }
    }
}

/// Response body for every successful mutation
#[derive(Debug, Clone, Serialize)]
pub struct MutationResponse {
    /// Success message
    pub message: String,
    /// Name of the affected setting (the new name after a rename)
    pub name: String,
    pub group: String,
}

impl MutationResponse {
    /// Creates a response such as "Setting 'site.title' renamed successfully".
    pub fn new(action: &str, name: impl Into<String>, group: impl Into<String>) -> Self {
        let name = name.into();
        let group = group.into();
        Self {
            message: format!(
                "Setting '{}' {} successfully",
                crate::setting::key_label(&name, &group),
                action
            ),
            name,
            group,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub fills: u64,
    pub invalidations: u64,
    /// Current number of cached entries
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            fills: stats.fills,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
