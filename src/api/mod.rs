//! API Module
//!
//! HTTP handlers and routing for the settings REST API.
//!
//! # Endpoints
//! - `GET /settings` - All values, grouped
//! - `GET /settings/get?name=&group=&default=` - One value, or the default
//! - `PUT /settings/set` - Update or create a value
//! - `POST /settings/add` - Register a setting with metadata
//! - `POST /settings/rename` - Move a setting to a new name/group
//! - `POST /settings/reset` - Replace a setting's baseline fields
//! - `DELETE /settings/del?name=&group=` - Remove a setting
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
