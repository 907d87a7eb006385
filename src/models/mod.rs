//! Request and Response models for the settings API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{AddRequest, GetQuery, KeyQuery, RenameRequest, ResetRequest, SetRequest};
pub use responses::{
    GetResponse, HealthResponse, MutationResponse, SettingsResponse, StatsResponse,
};
