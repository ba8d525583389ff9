mod support;

use serde_json::{json, Value};
use support::spawn_stub_api;
use taskboard::errors::ClientError;
use taskboard::http::ApiClient;
use taskboard::models::{Credentials, Session, Task};
use taskboard::services::{AuthService, TaskService};
use taskboard::session::SessionStore;

#[tokio::test]
async fn post_returns_parsed_payload() {
    let api = spawn_stub_api().await;
    let client = ApiClient::new(&api.base_url);

    let sent = json!({ "title": "Stretch", "detail": "", "status": "pending" });
    let returned = client.post("/tasks", &sent).await.unwrap();
    assert_eq!(returned, sent);
}

#[tokio::test]
async fn error_statuses_carry_a_message() {
    let api = spawn_stub_api().await;
    let client = ApiClient::new(&api.base_url);

    assert_eq!(
        client.get("/boom").await.unwrap_err(),
        ClientError::Http {
            status: 500,
            message: "HTTP 500".to_string()
        }
    );
    assert_eq!(
        client.get("/teapot").await.unwrap_err(),
        ClientError::Http {
            status: 418,
            message: "short and stout".to_string()
        }
    );
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let client = ApiClient::new("http://127.0.0.1:9");
    let err = client.get("/tasks").await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)), "{err:?}");
    assert_eq!(err.message(), "Could not reach the server.");
}

#[tokio::test]
async fn task_crud_uses_expected_routes() {
    let api = spawn_stub_api().await;
    let tasks = TaskService::new(ApiClient::new(&api.base_url), SessionStore::new());

    let all = tasks.get_all().await.unwrap();
    assert_eq!(all[0]["title"], "Existing");

    let task = Task::titled("Water plants");
    tasks.create(&task).await.unwrap();
    let updated = tasks.update("t-9", &task).await.unwrap();
    assert_eq!(updated["id"], "t-9");
    assert_eq!(tasks.remove("t-9").await.unwrap(), Value::Null);

    let seen: Vec<String> = api.recorded.all().into_iter().map(|(what, _)| what).collect();
    assert_eq!(
        seen,
        vec!["GET /tasks", "POST /tasks", "PUT /tasks/t-9", "DELETE /tasks/t-9"]
    );
}

#[tokio::test]
async fn create_for_current_user_requires_session() {
    let api = spawn_stub_api().await;
    let session = SessionStore::new();
    let tasks = TaskService::new(ApiClient::new(&api.base_url), session.clone());
    let task = Task::titled("Call mom");

    let err = tasks.create_for_current_user(&task).await.unwrap_err();
    assert!(matches!(err, ClientError::Session(_)));
    assert!(api.recorded.all().is_empty());

    session.sign_in(Session {
        user_id: "u-3".to_string(),
        token: Some("tok".to_string()),
        email: None,
    });
    let created = tasks.create_for_current_user(&task).await.unwrap();
    assert_eq!(created["userId"], "u-3");
    assert_eq!(created["title"], "Call mom");
    assert_eq!(
        api.recorded.last_body("POST /api/tasks/addTask").unwrap(),
        json!({ "title": "Call mom", "detail": "", "status": "pending", "userId": "u-3" })
    );
}

#[tokio::test]
async fn login_response_round_trips_into_session() {
    let api = spawn_stub_api().await;
    let auth = AuthService::new(ApiClient::new(&api.base_url));

    let payload = auth
        .login(&Credentials {
            email: "ana@example.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(payload["token"], "tok-1");

    let session = Session::from_login(&payload).unwrap();
    assert_eq!(session.user_id, "u-42");
    assert_eq!(session.email.as_deref(), Some("ana@example.com"));
}
