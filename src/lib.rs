//! Mini Settings - Grouped key/value settings with a read-through cache
//!
//! Entries live in a persistent [`store::EntryStore`]; the
//! [`setting::SettingService`] fronts it with an in-memory
//! [`cache::CacheStore`] holding autoloaded and recently read entries.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod setting;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use setting::{Entry, EntryBuilder, ServiceOptions, SettingService};
pub use store::{EntryStore, MemoryStore};
