//! API Routes
//!
//! Configures the Axum router with all settings endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_handler, all_handler, delete_handler, get_handler, health_handler, rename_handler,
    reset_handler, set_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/settings", get(all_handler))
        .route("/settings/get", get(get_handler))
        .route("/settings/set", put(set_handler))
        .route("/settings/add", post(add_handler))
        .route("/settings/rename", post(rename_handler))
        .route("/settings/reset", post(reset_handler))
        .route("/settings/del", delete(delete_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
