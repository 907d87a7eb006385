//! Error types for the settings service
//!
//! Provides unified error handling using thiserror.

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

// == Validation Errors ==
/// Field-level validation messages, keyed by field name.
///
/// Ordered by field so that rendering and comparisons are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Creates an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages recorded for `field`, empty if none.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

// == Setting Error Enum ==
/// Unified error type for the settings service.
#[derive(Error, Debug)]
pub enum SettingError {
    /// No entry under the given name and group
    #[error("Setting not found: {0}")]
    NotFound(String),

    /// The store rejected an entry
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Persistence layer failure
    #[error("Store error: {0}")]
    Store(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for SettingError {
    fn into_response(self) -> Response {
        let status = match &self {
            SettingError::NotFound(_) => StatusCode::NOT_FOUND,
            SettingError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SettingError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            SettingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            SettingError::Validation(errors) => json!({
                "error": self.to_string(),
                "errors": errors,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the settings service.
pub type Result<T> = std::result::Result<T, SettingError>;
