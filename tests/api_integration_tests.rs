//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use mini_settings::{
    api::create_router, cache::CacheStore, AppState, EntryBuilder, EntryStore, MemoryStore,
    ServiceOptions, SettingService,
};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    create_app_with(MemoryStore::new(), ServiceOptions::default())
}

fn create_app_with(store: MemoryStore, options: ServiceOptions) -> Router {
    let settings = SettingService::new(store, CacheStore::new(), options).unwrap();
    create_router(AppState::new(settings))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == SET / GET ==

#[tokio::test]
async fn test_set_then_get() {
    let app = create_test_app();

    let (status, json) = send(
        &app,
        "PUT",
        "/settings/set",
        Some(json!({ "name": "title", "group": "site", "value": "Home" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains("site.title"));

    let (status, json) = send(&app, "GET", "/settings/get?name=title&group=site", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"], "Home");
}

#[tokio::test]
async fn test_get_missing_returns_default() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/settings/get?name=missing&group=g&default=D", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"], "D");
}

#[tokio::test]
async fn test_get_blank_name_is_bad_request() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/settings/get?name=", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_set_keeps_first_default() {
    let app = create_test_app();

    for value in ["5", "6"] {
        let (status, _) = send(
            &app,
            "PUT",
            "/settings/set",
            Some(json!({ "name": "y", "group": "grp", "value": value })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, json) = send(&app, "GET", "/settings/get?name=y&group=grp", None).await;
    assert_eq!(json["value"], "6");
}

// == ADD ==

#[tokio::test]
async fn test_add_and_duplicate() {
    let app = create_test_app();
    let body = json!({
        "name": "per_page",
        "group": "blog",
        "value": 20,
        "default_value": 10,
        "definition": { "type": "number" },
        "sort_order": 1,
        "autoload": true
    });

    let (status, _) = send(&app, "POST", "/settings/add", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = send(&app, "POST", "/settings/add", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["errors"]["name"].is_array());

    let (_, json) = send(&app, "GET", "/settings/get?name=per_page&group=blog", None).await;
    assert_eq!(json["value"], 20);
}

// == RENAME ==

#[tokio::test]
async fn test_rename_moves_value() {
    let app = create_test_app();
    send(
        &app,
        "POST",
        "/settings/add",
        Some(json!({ "name": "a", "group": "g", "value": "v" })),
    )
    .await;

    let (status, json) = send(
        &app,
        "POST",
        "/settings/rename",
        Some(json!({ "name": "a", "group": "g", "new_name": "b", "new_group": "g2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["group"], "g2");

    let (_, json) = send(&app, "GET", "/settings/get?name=b&group=g2", None).await;
    assert_eq!(json["value"], "v");
    let (_, json) = send(&app, "GET", "/settings/get?name=a&group=g&default=none", None).await;
    assert_eq!(json["value"], "none");
}

#[tokio::test]
async fn test_rename_missing_is_not_found() {
    let app = create_test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/settings/rename",
        Some(json!({ "name": "a", "new_name": "b" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == RESET ==

#[tokio::test]
async fn test_reset() {
    let app = create_test_app();
    send(
        &app,
        "PUT",
        "/settings/set",
        Some(json!({ "name": "theme", "value": "dark" })),
    )
    .await;

    let (status, _) = send(
        &app,
        "POST",
        "/settings/reset",
        Some(json!({ "name": "theme", "default_value": "light", "autoload": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/settings/reset",
        Some(json!({ "name": "missing", "default_value": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == DELETE ==

#[tokio::test]
async fn test_delete() {
    let app = create_test_app();
    send(
        &app,
        "PUT",
        "/settings/set",
        Some(json!({ "name": "a", "group": "g", "value": "v" })),
    )
    .await;

    let (status, _) = send(&app, "DELETE", "/settings/del?name=a&group=g", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", "/settings/del?name=a&group=g", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == ALL ==

#[tokio::test]
async fn test_all_merges_store_and_cache() {
    fn seeded_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store
            .save(&mut EntryBuilder::new("n1", "v1").group("g1").autoload(true).build_new())
            .unwrap();
        store
            .save(&mut EntryBuilder::new("n2", "v2").group("g2").build_new())
            .unwrap();
        store
    }

    for options in [
        ServiceOptions::default(),
        ServiceOptions { with_cache: false, autoload: true },
        ServiceOptions { with_cache: false, autoload: false },
    ] {
        let app = create_app_with(seeded_store(), options);

        let (status, json) = send(&app, "GET", "/settings", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["settings"],
            json!({ "g1": { "n1": "v1" }, "g2": { "n2": "v2" } })
        );
    }
}

// == STATS ==

#[tokio::test]
async fn test_stats_reflect_cache_use() {
    let app = create_test_app();
    send(
        &app,
        "PUT",
        "/settings/set",
        Some(json!({ "name": "a", "value": "v" })),
    )
    .await;
    send(&app, "GET", "/settings/get?name=a", None).await;

    let (status, json) = send(&app, "GET", "/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["total_entries"], 1);
}

// == Live server ==

#[tokio::test]
async fn test_live_server_roundtrip() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, create_test_app()).await.unwrap();
    });

    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    let health: Value = client
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "healthy");

    let response = client
        .put(format!("{}/settings/set", base))
        .json(&json!({ "name": "x", "group": "grp", "value": "1" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let got: Value = client
        .get(format!("{}/settings/get?name=x&group=grp", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(got["value"], "1");

    server.abort();
}
