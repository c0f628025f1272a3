//! REST collaborator surface, exercised against a mocked assistant service.

use rafiq::api::{ApiClient, Credentials, UserUpdate};
use rafiq::error::ApiError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_body(id: i64, email: &str, is_admin: bool) -> serde_json::Value {
    json!({
        "id": id,
        "email": email,
        "name": null,
        "profile_picture": null,
        "is_admin": is_admin,
        "is_active": true,
        "created_at": "2024-01-01T00:00:00"
    })
}

#[tokio::test]
async fn login_returns_token_and_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({
            "email": "admin@example.com",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt-1",
            "token_type": "bearer",
            "user": user_body(1, "admin@example.com", true)
        })))
        .mount(&server)
        .await;

    let api = ApiClient::with_base_url(server.uri(), None);
    let response = api
        .login(&Credentials {
            email: "admin@example.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();

    assert_eq!(response.access_token, "jwt-1");
    assert_eq!(response.user.email, "admin@example.com");
    assert!(response.user.is_admin);
}

#[tokio::test]
async fn login_failure_surfaces_service_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid email or password"})),
        )
        .mount(&server)
        .await;

    let api = ApiClient::with_base_url(server.uri(), None);
    let error = api
        .login(&Credentials {
            email: "a@b.c".into(),
            password: "nope".into(),
        })
        .await
        .unwrap_err();

    match error {
        ApiError::Service { status, detail } => {
            assert_eq!(status, 401);
            assert_eq!(detail, "Invalid email or password");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn me_sends_bearer_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer jwt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body(1, "me@example.com", false)))
        .mount(&server)
        .await;

    let api = ApiClient::with_base_url(server.uri(), Some("jwt-1".into()));
    let user = api.me().await.unwrap();
    assert_eq!(user.email, "me@example.com");
}

#[tokio::test]
async fn me_without_credential_fails_before_the_wire() {
    let api = ApiClient::with_base_url("http://127.0.0.1:1", None);
    let error = api.me().await.unwrap_err();
    assert!(error.is_auth());
}

#[tokio::test]
async fn conversations_list_passes_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/conversations/"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 3,
            "user_id": 1,
            "session_id": "session-1700000000000",
            "title": "Weekly report",
            "created_at": "2024-05-01T10:00:00",
            "updated_at": "2024-05-01T11:00:00",
            "message_count": 6
        }])))
        .mount(&server)
        .await;

    let api = ApiClient::with_base_url(server.uri(), Some("jwt-1".into()));
    let conversations = api.conversations(5).await.unwrap();

    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0].title, "Weekly report");
    assert_eq!(
        conversations[0].session_id.as_deref(),
        Some("session-1700000000000")
    );
}

#[tokio::test]
async fn conversation_detail_includes_messages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/conversations/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "conversation": {
                "id": 3,
                "user_id": 1,
                "session_id": null,
                "title": "Weekly report",
                "created_at": "2024-05-01T10:00:00",
                "updated_at": "2024-05-01T11:00:00",
                "message_count": 2
            },
            "messages": [
                {"id": 10, "role": "user", "content": "hi", "intent": null,
                 "confidence": null, "agent": null, "created_at": "2024-05-01T10:00:00"},
                {"id": 11, "role": "assistant", "content": "hello", "intent": "greeting",
                 "confidence": "high", "agent": "main", "created_at": "2024-05-01T10:00:05"}
            ]
        })))
        .mount(&server)
        .await;

    let api = ApiClient::with_base_url(server.uri(), Some("jwt-1".into()));
    let detail = api.conversation(3).await.unwrap();

    assert_eq!(detail.messages.len(), 2);
    assert_eq!(detail.messages[1].agent.as_deref(), Some("main"));
}

#[tokio::test]
async fn delete_conversation_accepts_ack() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/conversations/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "deleted",
            "conversation_id": 3,
            "timestamp": "2024-05-01T12:00:00"
        })))
        .mount(&server)
        .await;

    let api = ApiClient::with_base_url(server.uri(), Some("jwt-1".into()));
    api.delete_conversation(3).await.unwrap();
}

#[tokio::test]
async fn admin_stats_parse() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_users": 12,
            "active_users": 10,
            "inactive_users": 2,
            "admin_users": 1,
            "total_x_accounts": 4,
            "users_created_today": 3
        })))
        .mount(&server)
        .await;

    let api = ApiClient::with_base_url(server.uri(), Some("jwt-1".into()));
    let stats = api.admin_stats().await.unwrap();

    assert_eq!(stats.total_users, 12);
    assert_eq!(stats.users_created_today, 3);
}

#[tokio::test]
async fn admin_update_sends_partial_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/users/7"))
        .and(body_json(json!({"is_active": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "email": "user@example.com",
            "name": null,
            "is_admin": false,
            "is_active": false,
            "created_at": "2024-01-01T00:00:00",
            "x_accounts_count": 0,
            "conversations_count": 2,
            "social_accounts_count": 0
        })))
        .mount(&server)
        .await;

    let api = ApiClient::with_base_url(server.uri(), Some("jwt-1".into()));
    let update = UserUpdate {
        is_active: Some(false),
        ..UserUpdate::default()
    };
    let user = api.update_user(7, &update).await.unwrap();

    assert!(!user.is_active);
    assert_eq!(user.conversations_count, 2);
}

#[tokio::test]
async fn admin_delete_forwards_auth_failures() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/users/7"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"detail": "Admin access required"})),
        )
        .mount(&server)
        .await;

    let api = ApiClient::with_base_url(server.uri(), Some("jwt-1".into()));
    let error = api.delete_user(7).await.unwrap_err();
    assert!(error.is_auth());
}
