//! Runs the real `ApiClient` against an axum mock of the backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use mindwell_client::{ApiClient, ClientConfig, ClientError, WellnessBackend};
use mindwell_types::api::{LoginRequest, RegisterRequest, SendMessageRequest};
use mindwell_types::{Language, MessageType, Mood, MoodEntry, ProfessionType};

const TOKEN: &str = "test-token";

#[derive(Clone, Default)]
struct Recorded {
    bodies: Arc<Mutex<Vec<(String, Value)>>>,
    queries: Arc<Mutex<Vec<(String, HashMap<String, String>)>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

async fn login(Json(req): Json<LoginRequest>) -> (StatusCode, Json<Value>) {
    if req.password == "Correct1pass" {
        (
            StatusCode::OK,
            Json(json!({
                "access_token": TOKEN,
                "user_id": "u1",
                "username": req.username,
                "display_name": "Kemar"
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Incorrect username or password"})),
        )
    }
}

async fn register() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"detail": "Username already registered"})),
    )
}

async fn user(Path(id): Path<String>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Not authenticated"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"_id": id, "username": "kemar", "is_pro": true, "streak": 4})),
    )
}

async fn record_message(
    State(rec): State<Recorded>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    rec.bodies
        .lock()
        .unwrap()
        .push(("messages".into(), body));
    (StatusCode::CREATED, Json(json!({"message_id": "m9"})))
}

async fn record_mood(
    State(rec): State<Recorded>,
    Path(user_id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    rec.bodies.lock().unwrap().push((user_id, body));
    Json(json!({"message": "Mood recorded"}))
}

async fn mood_history(
    State(rec): State<Recorded>,
    Path(user_id): Path<String>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    rec.queries.lock().unwrap().push((format!("mood:{}", user_id), q));
    Json(json!({
        "period_days": 7,
        "total_events": 1,
        "events": [{"sentiment": "happy", "timestamp": "2026-10-13T08:15:00.123456"}]
    }))
}

/// Mirrors the backend signature: `user_id` is a required query parameter.
async fn join(
    State(rec): State<Recorded>,
    Path(community_id): Path<String>,
    Query(q): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let Some(user_id) = q.get("user_id").cloned() else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": [{"loc": ["query", "user_id"], "msg": "Field required"}]})),
        );
    };
    rec.queries.lock().unwrap().push((community_id.clone(), q));
    (
        StatusCode::OK,
        Json(json!({"message": format!("{} joined {}", user_id, community_id)})),
    )
}

async fn community_messages(Path(community_id): Path<String>) -> Json<Value> {
    Json(json!({
        "community_id": community_id,
        "message_count": 2,
        "messages": [
            {"_id": "m2", "id": "m2", "sender_id": "u2", "community_id": community_id,
             "content": "voice note", "message_type": "voice",
             "timestamp": "2026-10-14T09:31:00"},
            {"_id": "m1", "id": "m1", "sender_id": "u1", "community_id": community_id,
             "content": "hi", "message_type": "text",
             "timestamp": "2026-10-14T09:30:00"}
        ],
        "has_more": false
    }))
}

async fn chat_history(
    State(rec): State<Recorded>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    rec.queries.lock().unwrap().push(("history".into(), q));
    Json(json!([
        {"user_message": "hi", "bot_response": "Hello!", "timestamp": "2026-10-14 09:30:00"}
    ]))
}

async fn journal_entries(
    State(rec): State<Recorded>,
    Path(user_id): Path<String>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    rec.queries.lock().unwrap().push((user_id, q));
    Json(json!({
        "entries": [{"_id": "j1", "id": "j1", "user_id": "u1", "content": "Slept well",
                     "mood": "calm", "created_at": "2026-10-14T07:00:00"}],
        "total": 3, "limit": 1, "skip": 0, "has_more": true
    }))
}

async fn delete_journal(Path(entry_id): Path<String>) -> Json<Value> {
    Json(json!({"message": "Journal entry deleted successfully", "entry_id": entry_id}))
}

async fn professionals(
    State(rec): State<Recorded>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    rec.queries.lock().unwrap().push(("professionals".into(), q));
    Json(json!([
        {"_id": "p1", "id": "p1", "name": "Dr. Brown", "profession": "psychologist",
         "credentials": "PhD", "verified": true}
    ]))
}

async fn broken_communities() -> &'static str {
    "<html>maintenance</html>"
}

async fn spawn_backend() -> (ApiClient, Recorded) {
    let rec = Recorded::default();
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/users/{id}", get(user))
        .route("/messages", post(record_message))
        .route(
            "/mood/history/{user_id}",
            post(record_mood).get(mood_history),
        )
        .route("/communities", get(broken_communities))
        .route("/communities/{id}/join", post(join))
        .route("/communities/{id}/messages", get(community_messages))
        .route("/chat/history", get(chat_history))
        .route("/journal/entries/{user_id}", get(journal_entries))
        .route("/journal/delete/{entry_id}", delete(delete_journal))
        .route("/professionals", get(professionals))
        .with_state(rec.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let cfg = ClientConfig::new(
        format!("http://{}", addr),
        Duration::from_secs(5),
        Language::En,
    )
    .unwrap();
    (ApiClient::new(&cfg).unwrap(), rec)
}

fn login_req(password: &str) -> LoginRequest {
    LoginRequest {
        username: "kemar".into(),
        password: password.into(),
    }
}

#[tokio::test]
async fn login_token_is_attached_to_later_requests() {
    let (client, _) = spawn_backend().await;

    let resp = client.login(&login_req("Correct1pass")).await.unwrap();
    assert_eq!(resp.user_id, "u1");
    assert!(client.is_authenticated());

    let user = client.get_user("u1").await.unwrap();
    assert_eq!(user.id, "u1");
    assert!(user.is_pro);
    assert_eq!(user.streak, 4);
}

#[tokio::test]
async fn logout_drops_the_token() {
    let (client, _) = spawn_backend().await;
    client.login(&login_req("Correct1pass")).await.unwrap();
    client.logout();

    let err = client.get_user("u1").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn failed_login_reports_server_detail() {
    let (client, _) = spawn_backend().await;

    let err = client.login(&login_req("wrong")).await.unwrap_err();
    match err {
        ClientError::Status { status, detail } => {
            assert_eq!(status, 401);
            assert_eq!(detail, "Incorrect username or password");
        }
        other => panic!("expected status error, got {:?}", other),
    }
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn register_conflict_is_a_status_error() {
    let (client, _) = spawn_backend().await;
    let req = RegisterRequest {
        username: "kemar".into(),
        email: "kemar@example.com".into(),
        password: "Correct1pass".into(),
        display_name: None,
        anonymous_mode: false,
        language_preference: Language::En,
    };
    let err = client.register(&req).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("Username already registered"));
}

#[tokio::test]
async fn send_message_posts_expected_body() {
    let (client, rec) = spawn_backend().await;
    let resp = client
        .send_message(&SendMessageRequest {
            sender_id: "u1".into(),
            recipient_id: None,
            community_id: Some("c1".into()),
            content: "hello all".into(),
            message_type: Default::default(),
        })
        .await
        .unwrap();
    assert_eq!(resp.message_id.as_deref(), Some("m9"));
    assert!(resp.data.is_none());

    let bodies = rec.bodies.lock().unwrap();
    let (_, body) = &bodies[0];
    assert_eq!(body["community_id"], "c1");
    assert_eq!(body["message_type"], "text");
    assert!(body.get("recipient_id").is_none());
}

#[tokio::test]
async fn mood_submission_and_history() {
    let (client, rec) = spawn_backend().await;
    let entry = MoodEntry {
        mood: Mood::Calm,
        timestamp: chrono::Utc::now(),
        note: None,
    };
    let ack = client.submit_mood("u1", &entry).await.unwrap();
    assert_eq!(ack.message, "Mood recorded");

    let history = client.mood_history("u1", 7).await.unwrap();
    assert_eq!(history.total_events, 1);
    assert_eq!(history.events[0].mood, "happy");

    assert_eq!(rec.bodies.lock().unwrap()[0].0, "u1");
    assert_eq!(rec.bodies.lock().unwrap()[0].1["mood"], "calm");
    let queries = rec.queries.lock().unwrap();
    assert_eq!(queries[0].0, "mood:u1");
    assert_eq!(queries[0].1.get("days").map(String::as_str), Some("7"));
}

#[tokio::test]
async fn mood_history_keeps_slashed_user_id_in_one_segment() {
    let (client, rec) = spawn_backend().await;
    client.mood_history("u/1", 30).await.unwrap();

    let queries = rec.queries.lock().unwrap();
    assert_eq!(queries[0].0, "mood:u/1");
    assert_eq!(queries[0].1.get("days").map(String::as_str), Some("30"));
}

#[tokio::test]
async fn join_sends_user_id_as_query_parameter() {
    let (client, rec) = spawn_backend().await;
    let ack = client.join_community("c1/x", "u1").await.unwrap();
    assert_eq!(ack.message, "u1 joined c1/x");

    let queries = rec.queries.lock().unwrap();
    let (community_id, query) = &queries[0];
    assert_eq!(community_id, "c1/x");
    assert_eq!(query.get("user_id").map(String::as_str), Some("u1"));
}

#[tokio::test]
async fn paged_messages_with_voice_notes_decode() {
    let (client, _) = spawn_backend().await;
    let messages = client.community_messages("c1").await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].id, "m2");
    assert_eq!(messages[0].message_type, MessageType::Voice);
}

#[tokio::test]
async fn chat_history_passes_session_id() {
    let (client, rec) = spawn_backend().await;
    let entries = client.chat_history("s 1&2").await.unwrap();
    assert_eq!(entries[0].bot_response, "Hello!");

    let queries = rec.queries.lock().unwrap();
    assert_eq!(queries[0].0, "history");
    assert_eq!(queries[0].1.get("session_id").map(String::as_str), Some("s 1&2"));
}

#[tokio::test]
async fn journal_listing_and_delete() {
    let (client, rec) = spawn_backend().await;
    let page = client.journal_entries("u1", 1, 0).await.unwrap();
    assert_eq!(page.entries[0].id, "j1");
    assert_eq!(page.entries[0].mood, Some(Mood::Calm));
    assert!(page.has_more);
    {
        let queries = rec.queries.lock().unwrap();
        assert_eq!(queries[0].0, "u1");
        assert_eq!(queries[0].1.get("limit").map(String::as_str), Some("1"));
        assert_eq!(queries[0].1.get("skip").map(String::as_str), Some("0"));
    }

    let ack = client.delete_journal_entry("j1").await.unwrap();
    assert_eq!(ack.message, "Journal entry deleted successfully");
}

#[tokio::test]
async fn professionals_filter_by_profession() {
    let (client, rec) = spawn_backend().await;
    let list = client
        .list_professionals(Some(ProfessionType::SocialWorker))
        .await
        .unwrap();
    assert_eq!(list[0].name, "Dr. Brown");

    let queries = rec.queries.lock().unwrap();
    assert_eq!(
        queries[0].1.get("profession").map(String::as_str),
        Some("social_worker")
    );
}

#[tokio::test]
async fn non_json_success_body_is_a_decode_error() {
    let (client, _) = spawn_backend().await;
    let err = client.list_communities().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // Grab a free port, then close it before connecting.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let cfg = ClientConfig::new(
        format!("http://{}", addr),
        Duration::from_secs(2),
        Language::En,
    )
    .unwrap();
    let client = ApiClient::new(&cfg).unwrap();

    let err = client.list_communities().await.unwrap_err();
    assert!(err.is_network(), "got {:?}", err);
}
