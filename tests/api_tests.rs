//! API Integration Tests for the Hand party service
//!
//! Drives the full router against an in-memory database.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::{Service, ServiceExt};
use uuid::Uuid;

use hand_backend::api;
use hand_backend::{AppConfig, AppState};

const SERVICE_TOKEN: &str = "test-service-token";

struct TestApp {
    router: Router,
    state: Arc<AppState>,
}

impl TestApp {
    /// Sign a player token for a fresh account
    fn player(&self) -> (Uuid, String) {
        let account_id = Uuid::new_v4();
        let token = self.state.jwt_service.sign(account_id).unwrap();
        (account_id, token)
    }
}

/// Helper to create a test application
async fn create_test_app() -> TestApp {
    let config = AppConfig {
        jwt_secret: "test-secret-key".to_string(),
        service_token: SERVICE_TOKEN.to_string(),
        database_url: "sqlite::memory:".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        shutdown_timeout: Duration::from_secs(1),
        request_timeout: Duration::from_secs(5),
    };

    let state = Arc::new(AppState::new(&config).await.expect("Failed to create app state"));

    TestApp {
        router: api::routes::create_router(state.clone()),
        state,
    }
}

async fn send(app: &mut Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = ServiceExt::<Request<Body>>::ready(app)
        .await
        .unwrap()
        .call(request)
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

/// Helper to make a request with a player bearer token and optional JSON body
async fn call_auth(
    app: &mut Router,
    method: &str,
    path: &str,
    token: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(path)
        .header("Authorization", format!("Bearer {}", token));

    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send(app, request).await
}

async fn post_auth(app: &mut Router, path: &str, token: &str) -> (StatusCode, Value) {
    call_auth(app, "POST", path, token, None).await
}

async fn post_json_auth(
    app: &mut Router,
    path: &str,
    body: Value,
    token: &str,
) -> (StatusCode, Value) {
    call_auth(app, "POST", path, token, Some(body)).await
}

async fn get_auth(app: &mut Router, path: &str, token: &str) -> (StatusCode, Value) {
    call_auth(app, "GET", path, token, None).await
}

/// Helper for internal endpoints
async fn get_internal(app: &mut Router, path: &str, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(token) = token {
        builder = builder.header("X-Service-Token", token);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

/// Create a party and return its invite code
async fn create_party(app: &mut Router, token: &str) -> (String, String) {
    let (status, body) = post_auth(app, "/parties", token).await;
    assert_eq!(status, StatusCode::CREATED);
    (
        body["id"].as_str().unwrap().to_string(),
        body["invite_code"].as_str().unwrap().to_string(),
    )
}

async fn join_party(app: &mut Router, token: &str, code: &str) -> (StatusCode, Value) {
    post_json_auth(app, "/parties/join", json!({ "invite_code": code }), token).await
}

// ============================================================================
// Health & Auth
// ============================================================================

#[tokio::test]
async fn test_health() {
    let mut app = create_test_app().await;

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&mut app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "service": "hand" }));
}

#[tokio::test]
async fn test_player_routes_require_auth() {
    let mut app = create_test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/parties")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&mut app.router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let (status, _) = get_auth(&mut app.router, "/parties/mine", "not-a-jwt").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_service_token_cannot_act_as_player() {
    let mut app = create_test_app().await;

    let (status, _) = post_auth(&mut app.router, "/parties", SERVICE_TOKEN).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Party lifecycle
// ============================================================================

#[tokio::test]
async fn test_create_party_success() {
    let mut app = create_test_app().await;
    let (account_id, token) = app.player();

    let (status, body) = post_auth(&mut app.router, "/parties", &token).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].is_string());
    assert_eq!(body["owner_id"], account_id.to_string());
    assert_eq!(body["invite_code"].as_str().unwrap().len(), 8);
    assert_eq!(body["max_size"], 8);
    assert!(body["created_at"].is_string());
    assert!(body["updated_at"].is_string());
    assert_eq!(body["members"].as_array().unwrap().len(), 1);
    assert_eq!(body["members"][0]["account_id"], account_id.to_string());
    assert_eq!(body["members"][0]["role"], "owner");
}

#[tokio::test]
async fn test_one_membership_per_account() {
    let mut app = create_test_app().await;
    let (_, owner) = app.player();
    let (_, other_owner) = app.player();

    let (_, code) = create_party(&mut app.router, &owner).await;

    let (status, body) = post_auth(&mut app.router, "/parties", &owner).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "already_in_party");
    assert_eq!(body["message"], "You are already in a party. Leave first.");

    create_party(&mut app.router, &other_owner).await;
    let (status, body) = join_party(&mut app.router, &other_owner, &code).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "already_in_party");
}

#[tokio::test]
async fn test_get_my_party_not_in_party() {
    let mut app = create_test_app().await;
    let (_, token) = app.player();

    let (status, body) = get_auth(&mut app.router, "/parties/mine", &token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_in_party");
}

#[tokio::test]
async fn test_join_validation() {
    let mut app = create_test_app().await;
    let (_, token) = app.player();

    let (status, body) = post_json_auth(&mut app.router, "/parties/join", json!({}), &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");

    let (status, body) = post_auth(&mut app.router, "/parties/join", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");

    let (status, body) = join_party(&mut app.router, &token, "  ").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "invalid_code");

    let (status, body) = join_party(&mut app.router, &token, "ffffffff").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "invalid_code");
}

#[tokio::test]
async fn test_join_until_full() {
    let mut app = create_test_app().await;
    let (_, owner) = app.player();
    let (_, code) = create_party(&mut app.router, &owner).await;

    for expected_size in 2..=8 {
        let (_, token) = app.player();
        let (status, body) = join_party(&mut app.router, &token, &code).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["members"].as_array().unwrap().len(), expected_size);
    }

    let (_, late) = app.player();
    let (status, body) = join_party(&mut app.router, &late, &code).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "party_full");
}

#[tokio::test]
async fn test_invite_kick_flow() {
    let mut app = create_test_app().await;
    let (_, a) = app.player();
    let (b_id, b) = app.player();

    let (party_id, code) = create_party(&mut app.router, &a).await;

    let (status, _) = join_party(&mut app.router, &b, &code).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_auth(&mut app.router, "/parties/mine", &b).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], party_id);
    assert_eq!(body["members"].as_array().unwrap().len(), 2);

    let (status, body) = post_json_auth(
        &mut app.router,
        "/parties/kick",
        json!({ "account_id": b_id }),
        &a,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Member kicked");

    let (status, body) = get_auth(&mut app.router, "/parties/mine", &b).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_in_party");
}

#[tokio::test]
async fn test_kick_rules() {
    let mut app = create_test_app().await;
    let (a_id, a) = app.player();
    let (_, b) = app.player();
    let (_, code) = create_party(&mut app.router, &a).await;
    join_party(&mut app.router, &b, &code).await;

    let (status, body) = post_json_auth(
        &mut app.router,
        "/parties/kick",
        json!({ "account_id": a_id }),
        &a,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");

    let (status, body) = post_json_auth(
        &mut app.router,
        "/parties/kick",
        json!({ "account_id": a_id }),
        &b,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "not_owner");

    let (status, body) = post_json_auth(
        &mut app.router,
        "/parties/kick",
        json!({ "account_id": Uuid::new_v4() }),
        &a,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_in_party");

    let (status, body) = post_json_auth(
        &mut app.router,
        "/parties/kick",
        json!({ "account_id": "nope" }),
        &a,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "account_id is required");
}

#[tokio::test]
async fn test_member_leave_keeps_party() {
    let mut app = create_test_app().await;
    let (_, a) = app.player();
    let (_, b) = app.player();
    let (_, code) = create_party(&mut app.router, &a).await;
    join_party(&mut app.router, &b, &code).await;

    let (status, body) = post_auth(&mut app.router, "/parties/leave", &b).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Left party");

    let (status, body) = get_auth(&mut app.router, "/parties/mine", &a).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["members"].as_array().unwrap().len(), 1);

    let (status, body) = post_auth(&mut app.router, "/parties/leave", &b).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_in_party");
}

#[tokio::test]
async fn test_owner_leave_disbands() {
    let mut app = create_test_app().await;
    let (_, a) = app.player();
    let (b_id, b) = app.player();
    let (party_id, code) = create_party(&mut app.router, &a).await;
    join_party(&mut app.router, &b, &code).await;

    let (status, body) = post_auth(&mut app.router, "/parties/leave", &a).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Party disbanded");

    let (status, _) = get_auth(&mut app.router, "/parties/mine", &b).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let path = format!("/internal/parties/{}", party_id);
    let (status, body) = get_internal(&mut app.router, &path, Some(SERVICE_TOKEN)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let path = format!("/internal/parties/player/{}", b_id);
    let (status, body) = get_internal(&mut app.router, &path, Some(SERVICE_TOKEN)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_in_party");
}

#[tokio::test]
async fn test_transfer_ownership() {
    let mut app = create_test_app().await;
    let (a_id, a) = app.player();
    let (b_id, b) = app.player();
    let (_, code) = create_party(&mut app.router, &a).await;
    join_party(&mut app.router, &b, &code).await;

    let (status, body) = post_json_auth(
        &mut app.router,
        "/parties/transfer",
        json!({ "account_id": a_id }),
        &a,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "You are already the owner");

    let (status, body) = post_json_auth(
        &mut app.router,
        "/parties/transfer",
        json!({ "account_id": b_id }),
        &a,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["owner_id"], b_id.to_string());

    let members = body["members"].as_array().unwrap();
    let owners: Vec<_> = members.iter().filter(|m| m["role"] == "owner").collect();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0]["account_id"], b_id.to_string());
    let old = members
        .iter()
        .find(|m| m["account_id"] == a_id.to_string())
        .unwrap();
    assert_eq!(old["role"], "member");

    // Old owner is now a plain member
    let (status, body) = post_json_auth(
        &mut app.router,
        "/parties/transfer",
        json!({ "account_id": b_id }),
        &a,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "not_owner");
}

#[tokio::test]
async fn test_disband_party() {
    let mut app = create_test_app().await;
    let (_, a) = app.player();
    let (_, b) = app.player();
    let (_, code) = create_party(&mut app.router, &a).await;
    join_party(&mut app.router, &b, &code).await;

    let (status, body) = call_auth(&mut app.router, "DELETE", "/parties", &b, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "not_owner");

    let (status, body) = call_auth(&mut app.router, "DELETE", "/parties", &a, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Party disbanded");

    let (status, body) = call_auth(&mut app.router, "DELETE", "/parties", &a, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_in_party");

    // Both accounts are free to form new parties
    create_party(&mut app.router, &b).await;
}

#[tokio::test]
async fn test_regenerate_invite() {
    let mut app = create_test_app().await;
    let (_, a) = app.player();
    let (_, b) = app.player();
    let (_, old_code) = create_party(&mut app.router, &a).await;
    join_party(&mut app.router, &b, &old_code).await;

    let (status, body) = post_auth(&mut app.router, "/parties/invite", &b).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "not_owner");

    let (status, body) = post_auth(&mut app.router, "/parties/invite", &a).await;
    assert_eq!(status, StatusCode::OK);
    let new_code = body["invite_code"].as_str().unwrap().to_string();
    assert_ne!(new_code, old_code);

    let (_, body) = get_auth(&mut app.router, "/parties/mine", &a).await;
    assert_eq!(body["invite_code"], new_code);
    assert_eq!(body["members"].as_array().unwrap().len(), 2);

    let (_, c) = app.player();
    let (status, _) = join_party(&mut app.router, &c, &old_code).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = join_party(&mut app.router, &c, &new_code).await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// Internal endpoints
// ============================================================================

#[tokio::test]
async fn test_internal_requires_service_token() {
    let mut app = create_test_app().await;
    let path = format!("/internal/parties/{}", Uuid::new_v4());

    let (status, _) = get_internal(&mut app.router, &path, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get_internal(&mut app.router, &path, Some("wrong")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A player JWT is not a service token
    let (_, player) = app.player();
    let (status, _) = get_auth(&mut app.router, &path, &player).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_internal_invalid_ids() {
    let mut app = create_test_app().await;

    let (status, body) =
        get_internal(&mut app.router, "/internal/parties/not-a-uuid", Some(SERVICE_TOKEN)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_id");

    let (status, body) = get_internal(
        &mut app.router,
        "/internal/parties/player/not-a-uuid",
        Some(SERVICE_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_id");
}

#[tokio::test]
async fn test_internal_lookups() {
    let mut app = create_test_app().await;
    let (a_id, a) = app.player();
    let (party_id, _) = create_party(&mut app.router, &a).await;

    let path = format!("/internal/parties/{}", party_id);
    let (status, body) = get_internal(&mut app.router, &path, Some(SERVICE_TOKEN)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], party_id);
    assert_eq!(body["members"][0]["account_id"], a_id.to_string());

    // Bearer form of the service token is accepted too
    let path = format!("/internal/parties/player/{}", a_id);
    let (status, body) = get_auth(&mut app.router, &path, SERVICE_TOKEN).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], party_id);
}
