//! API Handlers
//!
//! HTTP request handlers for each settings endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{Result, SettingError};
use crate::models::{
    AddRequest, GetQuery, GetResponse, HealthResponse, KeyQuery, MutationResponse, RenameRequest,
    ResetRequest, SetRequest, SettingsResponse, StatsResponse,
};
use crate::setting::{key_label, SettingService, SettingValue};
use crate::store::MemoryStore;

/// Setting service as served over HTTP.
pub type SharedSettings = Arc<RwLock<SettingService<MemoryStore>>>;

/// Application state shared across all handlers.
///
/// Every handler takes the write lock: reads may fill the cache.
#[derive(Clone)]
pub struct AppState {
    pub settings: SharedSettings,
}

impl AppState {
    /// Creates a new AppState around an existing service.
    pub fn new(settings: SettingService<MemoryStore>) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
        }
    }

    /// Creates a new AppState with an empty in-memory store, using the cache
    /// flags from the Config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let settings = SettingService::new(
            MemoryStore::new(),
            CacheStore::new(),
            config.service_options(),
        )?;
        Ok(Self::new(settings))
    }
}

/// Maps a `false` mutation result to NotFound or Validation.
fn rejected(settings: &SettingService<MemoryStore>, name: &str, group: &str) -> SettingError {
    if settings.last_errors().is_empty() {
        SettingError::NotFound(key_label(name, group))
    } else {
        SettingError::Validation(settings.last_errors().clone())
    }
}

/// Handler for GET /settings
pub async fn all_handler(State(state): State<AppState>) -> Result<Json<SettingsResponse>> {
    let mut settings = state.settings.write().await;
    Ok(Json(SettingsResponse {
        settings: settings.all()?,
    }))
}

/// Handler for GET /settings/get
///
/// Never 404s: a missing setting yields the `default` query value, or null.
pub async fn get_handler(
    State(state): State<AppState>,
    Query(query): Query<GetQuery>,
) -> Result<Json<GetResponse>> {
    if query.name.trim().is_empty() {
        return Err(SettingError::InvalidRequest("Name cannot be empty".to_string()));
    }

    let default = query
        .default
        .map(SettingValue::String)
        .unwrap_or(SettingValue::Null);

    let mut settings = state.settings.write().await;
    let value = settings.get(&query.name, &query.group, default)?;

    Ok(Json(GetResponse::new(query.name, query.group, value)))
}

/// Handler for PUT /settings/set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<MutationResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(SettingError::InvalidRequest(error_msg));
    }

    let mut settings = state.settings.write().await;
    if !settings.set(&req.name, req.value, &req.group)? {
        return Err(rejected(&settings, &req.name, &req.group));
    }

    Ok(Json(MutationResponse::new("set", req.name, req.group)))
}

/// Handler for POST /settings/add
pub async fn add_handler(
    State(state): State<AppState>,
    Json(req): Json<AddRequest>,
) -> Result<(StatusCode, Json<MutationResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(SettingError::InvalidRequest(error_msg));
    }

    let mut settings = state.settings.write().await;
    if !settings.add(req.to_builder())? {
        return Err(rejected(&settings, &req.name, &req.group));
    }

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new("added", req.name, req.group)),
    ))
}

/// Handler for POST /settings/rename
pub async fn rename_handler(
    State(state): State<AppState>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<MutationResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(SettingError::InvalidRequest(error_msg));
    }

    let mut settings = state.settings.write().await;
    let renamed = settings.rename(
        &req.name,
        &req.group,
        &req.new_name,
        req.new_group.as_deref(),
    )?;
    if !renamed {
        return Err(rejected(&settings, &req.name, &req.group));
    }

    let group = req.new_group.unwrap_or(req.group);
    Ok(Json(MutationResponse::new("renamed", req.new_name, group)))
}

/// Handler for POST /settings/reset
pub async fn reset_handler(
    State(state): State<AppState>,
    Json(req): Json<ResetRequest>,
) -> Result<Json<MutationResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(SettingError::InvalidRequest(error_msg));
    }

    let mut settings = state.settings.write().await;
    if !settings.reset(&req.name, &req.group, req.to_baseline())? {
        return Err(rejected(&settings, &req.name, &req.group));
    }

    Ok(Json(MutationResponse::new("reset", req.name, req.group)))
}

/// Handler for DELETE /settings/del
pub async fn delete_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<MutationResponse>> {
    let mut settings = state.settings.write().await;
    if !settings.remove(&query.name, &query.group)? {
        return Err(SettingError::NotFound(key_label(&query.name, &query.group)));
    }

    Ok(Json(MutationResponse::new("deleted", query.name, query.group)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let settings = state.settings.read().await;
    Json(StatsResponse::from(settings.cache().stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setting::ServiceOptions;
    use serde_json::json;

    fn test_state() -> AppState {
        let settings = SettingService::new(
            MemoryStore::new(),
            CacheStore::new(),
            ServiceOptions::default(),
        )
        .unwrap();
        AppState::new(settings)
    }

    fn get_query(name: &str, group: &str, default: Option<&str>) -> Query<GetQuery> {
        Query(GetQuery {
            name: name.to_string(),
            group: group.to_string(),
            default: default.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state();

        let req = SetRequest {
            name: "title".to_string(),
            value: json!("Home"),
            group: "site".to_string(),
        };
        let result = set_handler(State(state.clone()), Json(req)).await;
        assert!(result.is_ok());

        let response = get_handler(State(state), get_query("title", "site", None))
            .await
            .unwrap();
        assert_eq!(response.value, json!("Home"));
    }

    #[tokio::test]
    async fn test_get_missing_uses_default() {
        let state = test_state();

        let response = get_handler(State(state.clone()), get_query("nope", "", Some("D")))
            .await
            .unwrap();
        assert_eq!(response.value, json!("D"));

        let response = get_handler(State(state), get_query("nope", "", None))
            .await
            .unwrap();
        assert_eq!(response.value, SettingValue::Null);
    }

    #[tokio::test]
    async fn test_add_duplicate_is_validation_error() {
        let state = test_state();
        let req = AddRequest {
            name: "a".to_string(),
            value: json!("1"),
            group: String::new(),
            default_value: None,
            definition: None,
            sort_order: None,
            autoload: None,
        };

        let (status, _) = add_handler(State(state.clone()), Json(req.clone()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let result = add_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(SettingError::Validation(_))));
    }

    #[tokio::test]
    async fn test_rename_missing_is_not_found() {
        let state = test_state();
        let req = RenameRequest {
            name: "a".to_string(),
            group: String::new(),
            new_name: "b".to_string(),
            new_group: None,
        };

        let result = rename_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(SettingError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state();
        state.settings.write().await.set("a", "v", "g").unwrap();

        let key = || {
            Query(KeyQuery {
                name: "a".to_string(),
                group: "g".to_string(),
            })
        };
        assert!(delete_handler(State(state.clone()), key()).await.is_ok());
        assert!(matches!(
            delete_handler(State(state), key()).await,
            Err(SettingError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let state = test_state();

        let req = SetRequest {
            name: "".to_string(),
            value: json!("value"),
            group: String::new(),
        };
        let result = set_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(SettingError::InvalidRequest(_))));
    }
}
