//! API Integration Tests for PartyUp
//!
//! Drives the command, interaction and presence endpoints the gateway adapter calls.

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

use partyup::api;
use partyup::domain::value_objects::{PartySettings, RoleId};
use partyup::infrastructure::app_state::AppState;
use partyup::infrastructure::services::MockChatClient;

struct TestApp {
    router: Router,
    state: Arc<AppState>,
    chat: Arc<MockChatClient>,
}

/// Helper to create a test application
fn create_test_app() -> TestApp {
    let chat = Arc::new(MockChatClient::new());
    let state = Arc::new(AppState::with_chat_client(
        chat.clone(),
        PartySettings::default(),
    ));

    let router = Router::new()
        .nest("/api", api::routes::create_api_router(state.clone()))
        .with_state(state.clone());

    TestApp {
        router,
        state,
        chat,
    }
}

/// Let party timers run without reaching their next tick
async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
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

/// Helper to make a POST request with JSON body
async fn post_json(app: &mut Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    send(app, request).await
}

async fn get(app: &mut Router, path: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn delete(app: &mut Router, path: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(path)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn create_party(app: &mut Router, role_id: u64, creator: u64, size: usize) -> (StatusCode, Value) {
    post_json(
        app,
        "/api/party",
        json!({
            "channelId": 500,
            "creatorId": creator,
            "roleId": role_id,
            "roleName": "lfg-raid",
            "size": size
        }),
    )
    .await
}

async fn press(app: &mut Router, custom_id: &str, user: u64) -> (StatusCode, Value) {
    post_json(
        app,
        "/api/interactions",
        json!({ "customId": custom_id, "userId": user }),
    )
    .await
}

// ============================================================================
// Command Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_create_party() {
    let mut app = create_test_app();

    let (status, body) = create_party(&mut app.router, 10, 1, 4).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Party created for <@&10> with size 4");
    assert_eq!(body["party"]["players"], json!([1]));
    assert_eq!(body["party"]["state"], "forming");

    settle().await;
    let sent = app.chat.last_sent().unwrap();
    assert_eq!(sent.message.title, "Party for lfg-raid");
}

#[tokio::test(start_paused = true)]
async fn test_create_duplicate_party() {
    let mut app = create_test_app();

    create_party(&mut app.router, 10, 1, 4).await;
    let (status, body) = create_party(&mut app.router, 10, 2, 2).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "PARTY_EXISTS");
    assert_eq!(body["error"], "Party already exists for lfg-raid");

    let party = app.state.registry.get(RoleId(10)).unwrap();
    assert_eq!(party.size(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_create_zero_size_rejected() {
    let mut app = create_test_app();

    let (status, body) = create_party(&mut app.router, 10, 1, 0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_SIZE");
    assert!(app.state.registry.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_adjust_below_member_count_rejected() {
    let mut app = create_test_app();

    let (_, body) = create_party(&mut app.router, 10, 1, 3).await;
    let party_id = body["party"]["id"].as_str().unwrap().to_string();
    settle().await;
    press(&mut app.router, &format!("party:join:{}", party_id), 2).await;
    assert_eq!(app.chat.visible().len(), 1);

    let (status, body) = post_json(&mut app.router, "/api/party/10/adjust", json!({ "size": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_SIZE");
    assert_eq!(
        body["error"],
        "Cannot adjust party size to 1 as there are already 2 players in the party."
    );
    assert_eq!(app.state.registry.get(RoleId(10)).unwrap().size(), 3);

    let (status, body) = post_json(&mut app.router, "/api/party/10/adjust", json!({ "size": 2 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Party size adjusted for <@&10> to 2");
    assert_eq!(body["party"]["state"], "full");
    // Now full: the forming message is withdrawn
    assert!(app.chat.visible().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_malformed_body_rejected() {
    let mut app = create_test_app();

    create_party(&mut app.router, 10, 1, 3).await;

    let (status, body) = post_json(&mut app.router, "/api/party/10/adjust", json!({ "size": -1 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_REQUEST");
    assert!(body["error"].as_str().unwrap().contains("size"));
    assert_eq!(app.state.registry.get(RoleId(10)).unwrap().size(), 3);

    let (status, body) = post_json(&mut app.router, "/api/party", json!({ "roleId": 11 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_REQUEST");
    assert!(app.state.registry.get(RoleId(11)).is_none());

    let (status, body) = post_json(
        &mut app.router,
        "/api/presence",
        json!({ "userId": 1, "status": "away" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[tokio::test(start_paused = true)]
async fn test_adjust_unknown_party() {
    let mut app = create_test_app();

    let (status, body) = post_json(&mut app.router, "/api/party/77/adjust", json!({ "size": 3 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PARTY_NOT_FOUND");
    assert_eq!(body["error"], "No party for <@&77>");
}

#[tokio::test(start_paused = true)]
async fn test_list_parties() {
    let mut app = create_test_app();

    let (_, body) = get(&mut app.router, "/api/party").await;
    assert_eq!(body["message"], "No parties available");
    assert_eq!(body["total"], 0);

    create_party(&mut app.router, 10, 1, 4).await;
    let (status, body) = get(&mut app.router, "/api/party").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["message"], "Current parties:\n\nlfg-raid (1/4)\n  - <@1>");
}

#[tokio::test(start_paused = true)]
async fn test_kick_player() {
    let mut app = create_test_app();

    let (_, body) = create_party(&mut app.router, 10, 1, 4).await;
    let party_id = body["party"]["id"].as_str().unwrap().to_string();
    settle().await;
    press(&mut app.router, &format!("party:join:{}", party_id), 2).await;

    // Not a member
    let (status, body) = post_json(&mut app.router, "/api/party/10/kick", json!({ "userId": 3 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_IN_PARTY");
    assert_eq!(body["error"], "<@3> is not in the party for lfg-raid");
    assert_eq!(app.state.registry.get(RoleId(10)).unwrap().player_count(), 2);

    let (status, body) = post_json(&mut app.router, "/api/party/10/kick", json!({ "userId": 2 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Kicked <@2> from <@&10>");
    assert_eq!(body["party"]["players"], json!([1]));

    // Status reposted with the reduced list, old message gone
    let sent = app.chat.last_sent().unwrap();
    assert_eq!(sent.message.fields[1].value, "1/4");
    assert_eq!(sent.message.fields[2].value, "<@1>");
    assert_eq!(app.chat.visible().len(), 1);

    // Kicking the last member dissolves the party
    let (status, body) = post_json(&mut app.router, "/api/party/10/kick", json!({ "userId": 1 })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("party").is_none());
    assert!(app.state.registry.get(RoleId(10)).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_remove_party() {
    let mut app = create_test_app();

    create_party(&mut app.router, 10, 1, 4).await;
    settle().await;

    let (status, body) = delete(&mut app.router, "/api/party/10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Removed party for <@&10>");
    assert!(app.state.registry.get(RoleId(10)).is_none());
    assert!(app.chat.visible().is_empty());

    let (status, _) = delete(&mut app.router, "/api/party/10").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Interaction Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_join_and_leave_buttons() {
    let mut app = create_test_app();

    let (_, body) = create_party(&mut app.router, 10, 1, 2).await;
    let party_id = body["party"]["id"].as_str().unwrap().to_string();
    let join = format!("party:join:{}", party_id);
    let leave = format!("party:leave:{}", party_id);
    settle().await;

    let (status, body) = press(&mut app.router, &join, 1).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "<@1> is already in the party!");

    let (status, body) = press(&mut app.router, &join, 2).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "<@2> joined the party!");
    assert_eq!(body["party"]["state"], "full");
    // Full parties go silent
    assert!(app.chat.visible().is_empty());

    let (status, body) = press(&mut app.router, &join, 3).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "PARTY_FULL");

    let (status, body) = press(&mut app.router, &leave, 1).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "<@1> left the party!");
    assert_eq!(app.chat.visible().len(), 1);

    let (status, body) = press(&mut app.router, &leave, 1).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "<@1> is not in the party!");

    // Last member leaves: party dissolves
    let (status, body) = press(&mut app.router, &leave, 2).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("party").is_none());
    assert!(app.state.registry.get(RoleId(10)).is_none());
    assert!(app.chat.visible().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_button_on_dissolved_party() {
    let mut app = create_test_app();

    let (_, body) = create_party(&mut app.router, 10, 1, 3).await;
    let old_id = body["party"]["id"].as_str().unwrap().to_string();
    delete(&mut app.router, "/api/party/10").await;

    // A new party for the same role must not receive presses aimed at the old one
    create_party(&mut app.router, 10, 5, 3).await;

    let (status, body) = press(&mut app.router, &format!("party:join:{}", old_id), 2).await;
    assert_eq!(status, StatusCode::GONE);
    assert_eq!(body["code"], "PARTY_GONE");
    assert_eq!(body["error"], "This party no longer exists.");

    let party = app.state.registry.get(RoleId(10)).unwrap();
    assert!(!party.contains(partyup::domain::value_objects::UserId(2)));
}

#[tokio::test(start_paused = true)]
async fn test_leave_on_removed_party() {
    let mut app = create_test_app();

    let (_, body) = create_party(&mut app.router, 10, 1, 3).await;
    let old_id = body["party"]["id"].as_str().unwrap().to_string();
    delete(&mut app.router, "/api/party/10").await;

    let (status, body) = press(&mut app.router, &format!("party:leave:{}", old_id), 1).await;
    assert_eq!(status, StatusCode::GONE);
    assert_eq!(body["code"], "PARTY_GONE");
    assert_eq!(body["error"], "This party no longer exists.");
    assert!(app.state.registry.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_unknown_interaction() {
    let mut app = create_test_app();

    let (status, body) = press(&mut app.router, "something:else", 1).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNKNOWN_INTERACTION");
}

// ============================================================================
// Presence & Lifecycle Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_offline_member_removed() {
    let mut app = create_test_app();

    let (_, body) = create_party(&mut app.router, 10, 1, 3).await;
    let party_id = body["party"]["id"].as_str().unwrap().to_string();
    press(&mut app.router, &format!("party:join:{}", party_id), 2).await;

    let (status, body) = post_json(
        &mut app.router,
        "/api/presence",
        json!({ "userId": 2, "status": "online" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["leftParties"], json!([]));

    let (_, body) = post_json(
        &mut app.router,
        "/api/presence",
        json!({ "userId": 2, "status": "offline" }),
    )
    .await;
    assert_eq!(body["leftParties"], json!([10]));
    assert_eq!(
        app.state.registry.get(RoleId(10)).unwrap().player_count(),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn test_invisible_member_removed() {
    let mut app = create_test_app();

    let (_, body) = create_party(&mut app.router, 10, 1, 3).await;
    let party_id = body["party"]["id"].as_str().unwrap().to_string();
    press(&mut app.router, &format!("party:join:{}", party_id), 2).await;

    let (status, body) = post_json(
        &mut app.router,
        "/api/presence",
        json!({ "userId": 2, "status": "invisible" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["leftParties"], json!([10]));

    let party = app.state.registry.get(RoleId(10)).unwrap();
    assert_eq!(party.players(), vec![partyup::domain::value_objects::UserId(1)]);
}

#[tokio::test(start_paused = true)]
async fn test_empty_party_expires_on_tick() {
    let mut app = create_test_app();

    create_party(&mut app.router, 10, 1, 3).await;
    settle().await;

    // Remove the creator without triggering a refresh
    let party = app.state.registry.get(RoleId(10)).unwrap();
    party.remove(partyup::domain::value_objects::UserId(1)).unwrap();
    assert!(app.state.registry.get(RoleId(10)).is_some());

    tokio::time::sleep(Duration::from_secs(300)).await;
    settle().await;

    assert!(app.state.registry.get(RoleId(10)).is_none());
    assert!(app.chat.visible().is_empty());
}

#[tokio::test]
async fn test_health() {
    let mut app = create_test_app();

    let (status, body) = get(&mut app.router, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["parties"], 0);
}
