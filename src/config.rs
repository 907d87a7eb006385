//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use crate::setting::ServiceOptions;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Consult the cache on reads and fill it from the store on misses
    pub with_cache: bool,
    /// Load every autoload-flagged entry into the cache at startup
    pub autoload: bool,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SETTINGS_WITH_CACHE` - Enable the read-through cache (default: true)
    /// - `SETTINGS_AUTOLOAD` - Preload autoload entries (default: true)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            with_cache: env::var("SETTINGS_WITH_CACHE")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.with_cache),
            autoload: env::var("SETTINGS_AUTOLOAD")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.autoload),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    /// Cache behaviour flags for the setting service.
    pub fn service_options(&self) -> ServiceOptions {
        ServiceOptions {
            with_cache: self.with_cache,
            autoload: self.autoload,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            with_cache: true,
            autoload: true,
            server_port: 3000,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
