//! Request-level tests for the bookmark API and its authorization guard

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use linkstash::api::router::create_router;
use linkstash::api::state::AppState;
use linkstash::config::AppConfig;
use linkstash::domain::user::NewUser;
use linkstash::domain::user::UserRepository;
use linkstash::infrastructure::auth::{ApiKeyManager, CredentialResolver};
use linkstash::infrastructure::link::InMemoryLinkRepository;
use linkstash::infrastructure::title::NoopTitleFetcher;
use linkstash::infrastructure::user::InMemoryUserRepository;

struct TestApp {
    router: Router,
    /// API key for user 1 ("alice")
    key: String,
    /// API key for user 2 ("bob")
    other_key: String,
}

/// Build an app over in-memory stores with two users holding issued keys.
/// The guard status is configured to 403, matching the deployed contract.
async fn spawn_app() -> TestApp {
    let users = Arc::new(InMemoryUserRepository::new());
    let links = Arc::new(InMemoryLinkRepository::new());

    let keys = ApiKeyManager::new();
    let alice = keys.generate();
    let bob = keys.generate();

    users
        .create(NewUser {
            name: "alice".to_string(),
            api_key_hash: Some(alice.hash),
        })
        .await
        .unwrap();
    users
        .create(NewUser {
            name: "bob".to_string(),
            api_key_hash: Some(bob.hash),
        })
        .await
        .unwrap();

    let mut config = AppConfig::default();
    config.auth.unauthorized_status = 403;

    let state = AppState::new(
        users,
        links,
        Arc::new(CredentialResolver::default()),
        Arc::new(NoopTitleFetcher),
        &config,
    );

    TestApp {
        router: create_router(state),
        key: alice.secret,
        other_key: bob.secret,
    }
}

async fn send(
    router: &Router,
    method: &str,
    path: &str,
    key: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);

    if let Some(key) = key {
        builder = builder.header("x-api-key", key);
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let app = spawn_app().await;

    let (status, body) = send(&app.router, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn ready_endpoint_reports_store() {
    let app = spawn_app().await;

    let (status, body) = send(&app.router, "GET", "/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"][0]["name"], "user_store");
}

#[tokio::test]
async fn unauthenticated_request_is_rejected() {
    let app = spawn_app().await;

    let (status, body) = send(&app.router, "GET", "/api/links", None, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"],
        "Authorization is required to access this resource"
    );
}

#[tokio::test]
async fn empty_api_key_is_rejected() {
    let app = spawn_app().await;

    let (status, body) = send(&app.router, "GET", "/api/links", Some(""), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"],
        "Authorization is required to access this resource"
    );
}

#[tokio::test]
async fn unknown_api_key_gets_the_same_generic_message() {
    let app = spawn_app().await;

    let bogus = "99ca17a0a2348dca9280668bb0de604b9d3eea93595e9e85e35e2a88f1c77eb3";
    let (status, body) = send(&app.router, "GET", "/api/links", Some(bogus), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    // Indistinguishable from the missing-credential case
    assert_eq!(
        body["error"],
        "Authorization is required to access this resource"
    );
}

#[tokio::test]
async fn user_endpoint_reports_link_count() {
    let app = spawn_app().await;

    let (status, body) = send(&app.router, "GET", "/api/user", Some(&app.key), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "alice");
    assert_eq!(body["links"], 0);

    send(
        &app.router,
        "POST",
        "/api/links",
        Some(&app.key),
        Some(json!({"url": "https://example.com", "title": "Example"})),
    )
    .await;

    let (_, body) = send(&app.router, "GET", "/api/user", Some(&app.key), None).await;
    assert_eq!(body["links"], 1);
}

#[tokio::test]
async fn create_link_returns_created_with_location() {
    let app = spawn_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/links")
        .header("x-api-key", &app.key)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(&json!({"url": "https://example.com", "title": "Example"})).unwrap(),
        ))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(location.starts_with("/api/links/"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["url"], "https://example.com");
    assert_eq!(body["title"], "Example");
    assert_eq!(body["read"], false);
}

#[tokio::test]
async fn list_links_paginates_newest_first() {
    let app = spawn_app().await;

    for i in 0..5 {
        send(
            &app.router,
            "POST",
            "/api/links",
            Some(&app.key),
            Some(json!({"url": format!("https://example.com/{}", i)})),
        )
        .await;
    }

    let (status, body) = send(
        &app.router,
        "GET",
        "/api/links?page=1&per_page=2",
        Some(&app.key),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_links"], 5);
    assert_eq!(body["page"], 1);
    assert_eq!(body["total_pages"], 3);
    assert_eq!(body["next_page"], 2);
    assert_eq!(body["links"].as_array().unwrap().len(), 2);
    assert_eq!(body["links"][0]["url"], "https://example.com/4");

    let (_, last) = send(
        &app.router,
        "GET",
        "/api/links?page=3&per_page=2",
        Some(&app.key),
        None,
    )
    .await;
    assert_eq!(last["links"].as_array().unwrap().len(), 1);
    assert!(last.get("next_page").is_none());
}

#[tokio::test]
async fn show_filter_controls_read_status() {
    let app = spawn_app().await;

    send(
        &app.router,
        "POST",
        "/api/links",
        Some(&app.key),
        Some(json!({"url": "https://read.example", "read": true})),
    )
    .await;
    send(
        &app.router,
        "POST",
        "/api/links",
        Some(&app.key),
        Some(json!({"url": "https://unread.example"})),
    )
    .await;

    // Default view shows unread only
    let (_, body) = send(&app.router, "GET", "/api/links", Some(&app.key), None).await;
    assert_eq!(body["links"].as_array().unwrap().len(), 1);
    assert_eq!(body["links"][0]["url"], "https://unread.example");
    // total_links counts everything regardless of filter
    assert_eq!(body["total_links"], 2);

    let (_, read) = send(
        &app.router,
        "GET",
        "/api/links?show=read",
        Some(&app.key),
        None,
    )
    .await;
    assert_eq!(read["links"][0]["url"], "https://read.example");

    let (_, all) = send(
        &app.router,
        "GET",
        "/api/links?show=all",
        Some(&app.key),
        None,
    )
    .await;
    assert_eq!(all["links"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn invalid_query_parameters_are_rejected() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app.router,
        "GET",
        "/api/links?page=two",
        Some(&app.key),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "The page and per_page parameters must be integers"
    );

    let (status, body) = send(
        &app.router,
        "GET",
        "/api/links?show=archived",
        Some(&app.key),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "The show parameter must be either unread, read or all."
    );
}

#[tokio::test]
async fn invalid_url_fails_validation() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/links",
        Some(&app.key),
        Some(json!({"url": "ftp://example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "The submitted data failed validation checks");
    assert!(body["issues"]["url"].is_array());
}

#[tokio::test]
async fn link_access_is_scoped_to_its_owner() {
    let app = spawn_app().await;

    let (_, created) = send(
        &app.router,
        "POST",
        "/api/links",
        Some(&app.key),
        Some(json!({"url": "https://example.com"})),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    // A different authenticated user cannot touch it
    let (status, body) = send(
        &app.router,
        "GET",
        &format!("/api/links/{}", id),
        Some(&app.other_key),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You are not authorized to access this item");

    let (status, _) = send(
        &app.router,
        "DELETE",
        &format!("/api/links/{}", id),
        Some(&app.other_key),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The owner still can
    let (status, _) = send(
        &app.router,
        "GET",
        &format!("/api/links/{}", id),
        Some(&app.key),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_link_is_not_found() {
    let app = spawn_app().await;

    let (status, body) = send(&app.router, "GET", "/api/links/999", Some(&app.key), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        "Requested resource was not found in the database"
    );
}

#[tokio::test]
async fn patch_and_delete_flow() {
    let app = spawn_app().await;

    let (_, created) = send(
        &app.router,
        "POST",
        "/api/links",
        Some(&app.key),
        Some(json!({"url": "https://example.com", "title": "Old"})),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app.router,
        "PATCH",
        &format!("/api/links/{}", id),
        Some(&app.key),
        Some(json!({"read": true, "title": "New"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        format!("Link with ID {} updated successfully", id)
    );

    let (_, fetched) = send(
        &app.router,
        "GET",
        &format!("/api/links/{}", id),
        Some(&app.key),
        None,
    )
    .await;
    assert_eq!(fetched["read"], true);
    assert_eq!(fetched["title"], "New");
    assert_eq!(fetched["url"], "https://example.com");

    let (status, body) = send(
        &app.router,
        "DELETE",
        &format!("/api/links/{}", id),
        Some(&app.key),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        format!("Link with ID {} deleted successfully", id)
    );

    let (status, _) = send(
        &app.router,
        "GET",
        &format!("/api/links/{}", id),
        Some(&app.key),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_rejects_invalid_url() {
    let app = spawn_app().await;

    let (_, created) = send(
        &app.router,
        "POST",
        "/api/links",
        Some(&app.key),
        Some(json!({"url": "https://example.com"})),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = send(
        &app.router,
        "PATCH",
        &format!("/api/links/{}", id),
        Some(&app.key),
        Some(json!({"url": "not-a-url"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // The link is unchanged
    let (_, fetched) = send(
        &app.router,
        "GET",
        &format!("/api/links/{}", id),
        Some(&app.key),
        None,
    )
    .await;
    assert_eq!(fetched["url"], "https://example.com");
}
