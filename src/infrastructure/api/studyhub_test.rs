use anyhow::Result;
use serde_json::json;

use super::StudyHub;
use crate::domain::models::Api;
use crate::domain::models::CreateSessionRequest;
use crate::domain::models::LoginRequest;
use crate::domain::models::RegisterRequest;

impl StudyHub {
    fn with_url(url: String) -> StudyHub {
        return StudyHub {
            url,
            token: "test-token".to_string(),
            timeout: "200".to_string(),
        };
    }
}

fn session_json(id: &str, title: &str) -> serde_json::Value {
    return json!({
        "id": id,
        "title": title,
        "course_code": "CS101",
        "description": "Midterm review",
        "date": "2024-03-14",
        "time": "18:00",
        "location": "Library room 2",
        "meeting_type": "on_campus",
        "max_capacity": 5,
        "current_capacity": 3,
        "creator_id": "user-1",
        "creator_name": "Jane Doe",
        "is_full": false,
    });
}

fn message_json(id: &str, text: &str) -> serde_json::Value {
    return json!({
        "id": id,
        "session_id": "session-1",
        "user_id": "user-2",
        "user_name": "John Smith",
        "message": text,
        "created_at": "2024-03-14T14:05:09+00:00",
    });
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/").with_status(200).create();

    let api = StudyHub::with_url(server.url());
    let res = api.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/").with_status(500).create();

    let api = StudyHub::with_url(server.url());
    let res = api.health_check().await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_logs_in() -> Result<()> {
    let body = json!({
        "id": "user-1",
        "email": "jane@school.edu",
        "first_name": "Jane",
        "last_name": "Doe",
        "school": "State University",
        "access_token": "jwt-token",
        "token_type": "bearer",
    })
    .to_string();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_body(body)
        .create();

    let api = StudyHub::with_url(server.url());
    let res = api
        .login(&LoginRequest {
            email: "jane@school.edu".to_string(),
            password: "hunter2hunter2".to_string(),
        })
        .await?;

    assert_eq!(res.access_token, "jwt-token");
    assert_eq!(res.first_name, "Jane");
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_login_rejection_details() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/auth/login")
        .with_status(401)
        .with_body(json!({"detail": "Invalid email or password"}).to_string())
        .create();

    let api = StudyHub::with_url(server.url());
    let err = api
        .login(&LoginRequest {
            email: "jane@school.edu".to_string(),
            password: "wrongpassword".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid email or password");
    mock.assert();
}

#[tokio::test]
async fn it_registers() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/auth/register")
        .with_status(201)
        .with_body(json!({"access_token": "jwt-token"}).to_string())
        .create();

    let api = StudyHub::with_url(server.url());
    let res = api
        .register(&RegisterRequest {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@school.edu".to_string(),
            password: "hunter2hunter2".to_string(),
            school: "State University".to_string(),
        })
        .await?;

    assert_eq!(res.access_token, "jwt-token");
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_lists_my_sessions() -> Result<()> {
    let body = json!([session_json("session-1", "Midterm cram"), session_json("session-2", "Finals prep")])
        .to_string();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/sessions/my/sessions")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_body(body)
        .create();

    let api = StudyHub::with_url(server.url());
    let res = api.list_my_sessions().await?;

    assert_eq!(res.len(), 2);
    assert_eq!(res[0].title, "Midterm cram");
    assert_eq!(res[1].id, "session-2");
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_lists_the_session_catalog() -> Result<()> {
    let body = json!([session_json("session-1", "Midterm cram")]).to_string();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/sessions/")
        .with_status(200)
        .with_body(body)
        .create();

    let api = StudyHub::with_url(server.url());
    let res = api.list_sessions().await?;

    assert_eq!(res.len(), 1);
    assert_eq!(res[0].capacity_label(), "3/5");
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_creates_a_session() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/sessions/")
        .match_header("authorization", "Bearer test-token")
        .match_body(mockito::Matcher::Json(json!({
            "title": "Midterm cram",
            "course_code": "CS101",
            "description": "Midterm review",
            "date": "2024-03-14",
            "time": "18:00",
            "location": "Library room 2",
            "meeting_type": "on_campus",
            "max_capacity": 5,
        })))
        .with_status(201)
        .with_body(session_json("session-9", "Midterm cram").to_string())
        .create();

    let api = StudyHub::with_url(server.url());
    let res = api
        .create_session(&CreateSessionRequest {
            title: "Midterm cram".to_string(),
            course_code: "CS101".to_string(),
            description: "Midterm review".to_string(),
            date: "2024-03-14".to_string(),
            time: "18:00".to_string(),
            location: "Library room 2".to_string(),
            meeting_type: "on_campus".to_string(),
            max_capacity: 5,
        })
        .await?;

    assert_eq!(res.id, "session-9");
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_joins_a_session() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/sessions/session-1/join")
        .with_status(200)
        .with_body(json!({"message": "Joined"}).to_string())
        .create();

    let api = StudyHub::with_url(server.url());
    api.join_session("session-1").await?;

    mock.assert();
    return Ok(());
}

#[tokio::test]
async fn it_surfaces_join_rejections() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/sessions/session-1/join")
        .with_status(400)
        .with_body(json!({"detail": "Session is full"}).to_string())
        .create();

    let api = StudyHub::with_url(server.url());
    let err = api.join_session("session-1").await.unwrap_err();

    assert_eq!(err.to_string(), "Session is full");
    mock.assert();
}

#[tokio::test]
async fn it_leaves_a_session() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/sessions/session-1/leave")
        .with_status(200)
        .create();

    let api = StudyHub::with_url(server.url());
    api.leave_session("session-1").await?;

    mock.assert();
    return Ok(());
}

#[tokio::test]
async fn it_deletes_a_session() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("DELETE", "/sessions/session-1")
        .with_status(200)
        .create();

    let api = StudyHub::with_url(server.url());
    api.delete_session("session-1").await?;

    mock.assert();
    return Ok(());
}

#[tokio::test]
async fn it_gets_messages_in_server_order() -> Result<()> {
    let body = json!([message_json("msg-1", "first"), message_json("msg-2", "second")]).to_string();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/chat/session-1/messages")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_body(body)
        .create();

    let api = StudyHub::with_url(server.url());
    let res = api.get_messages("session-1").await?;

    assert_eq!(res.len(), 2);
    assert_eq!(res[0].message, "first");
    assert_eq!(res[1].message, "second");
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_sends_a_message() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/chat/session-1/messages")
        .match_body(mockito::Matcher::Json(json!({
            "session_id": "session-1",
            "message": "See you at 6?",
        })))
        .with_status(201)
        .with_body(message_json("msg-3", "See you at 6?").to_string())
        .create();

    let api = StudyHub::with_url(server.url());
    let res = api.send_message("session-1", "See you at 6?").await?;

    assert_eq!(res.message, "See you at 6?");
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_send_rejection_details() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/chat/session-1/messages")
        .with_status(422)
        .with_body(json!({"detail": "too long"}).to_string())
        .create();

    let api = StudyHub::with_url(server.url());
    let err = api.send_message("session-1", "a very long message").await.unwrap_err();

    assert_eq!(err.to_string(), "too long");
    mock.assert();
}

#[tokio::test]
async fn it_falls_back_to_the_status_reason_without_a_detail() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/chat/session-1/messages")
        .with_status(400)
        .create();

    let api = StudyHub::with_url(server.url());
    let err = api.get_messages("session-1").await.unwrap_err();

    assert_eq!(err.to_string(), "Bad Request");
    mock.assert();
}
