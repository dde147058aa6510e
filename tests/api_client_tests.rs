//! ApiClient integration tests using wiremock
//!
//! Verifies request shape (paths, bearer header, JSON bodies) and how
//! responses and failures come back from `ApiClient`.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskmind::api::{ApiClient, Backend};
use taskmind::error::ApiError;
use taskmind::types::{NoteDraft, ResourceId, TaskDraft, TaskPriority, TaskStatus};

fn note_body(id: i64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "content": "",
        "tags": "home",
        "created_at": "2025-03-01T09:30:00.000001",
        "updated_at": "2025-03-01T09:30:00.000001"
    })
}

#[tokio::test]
async fn list_notes_sends_bearer_token_and_keeps_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([note_body(2, "b"), note_body(1, "a")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri());
    let notes = api.list_notes("tok-1").await.unwrap();

    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].id, ResourceId::Int(2));
    assert_eq!(notes[1].title, "a");
}

#[tokio::test]
async fn create_note_posts_draft_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notes"))
        .and(header("authorization", "Bearer tok"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"title": "Groceries", "content": "", "tags": "home"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(note_body(9, "Groceries")))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri());
    let draft = NoteDraft {
        title: "Groceries".into(),
        content: String::new(),
        tags: "home".into(),
    };
    let note = api.create_note("tok", &draft).await.unwrap();

    assert_eq!(note.id, ResourceId::Int(9));
    assert_eq!(note.tags.as_deref(), Some("home"));
}

#[tokio::test]
async fn create_task_uses_wire_enum_names() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .and(body_json(json!({
            "title": "Send CV",
            "description": "",
            "status": "in_progress",
            "priority": "high"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4,
            "title": "Send CV",
            "description": null,
            "status": "in_progress",
            "priority": "high",
            "note_id": null,
            "created_at": "2025-03-01T09:30:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri());
    let draft = TaskDraft {
        title: "Send CV".into(),
        status: TaskStatus::InProgress,
        priority: TaskPriority::High,
        ..TaskDraft::default()
    };
    let task = api.create_task("tok", &draft).await.unwrap();

    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.description, None);
}

#[tokio::test]
async fn list_tasks_non_2xx_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid token"))
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri());
    let err = api.list_tasks("expired").await.unwrap_err();

    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(body, "Invalid token");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn chat_returns_reply_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/assistant/chat"))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({"message": "summarize my tasks"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"reply": "You have no tasks."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri());
    let reply = api
        .send_chat_message("tok", "summarize my tasks")
        .await
        .unwrap();

    assert_eq!(reply, "You have no tasks.");
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri());
    let err = api.list_notes("tok").await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn health_accepts_ok_status_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let api = ApiClient::new(format!("{}/", server.uri()));
    assert!(api.health().await.is_ok());

    let degraded = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "degraded"})))
        .mount(&degraded)
        .await;

    assert!(ApiClient::new(degraded.uri()).health().await.is_err());
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let err = ApiClient::new(uri).list_notes("tok").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
