mod common;

use common::TestApp;
use http::StatusCode;
use lemon_server::auth::Role;
use lemon_server::db::repository::group;
use serde_json::json;

#[tokio::test]
async fn test_register_login_and_me() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/auth/users",
            None,
            json!({"username": "alice", "email": "alice@example.com", "password": "s3cret-pass"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["username"], "alice");
    assert_eq!(body["groups"], json!(["Customer"]));
    assert!(body.get("hashed_password").is_none());

    let (status, body) = app
        .post(
            "/api/auth/token",
            None,
            json!({"username": "alice", "password": "s3cret-pass"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["is_admin"], false);
}

#[tokio::test]
async fn test_register_rejects_duplicate_and_short_password() {
    let app = TestApp::new().await;
    let payload = json!({"username": "bob", "email": "", "password": "long-enough"});

    let (status, _) = app.post("/api/auth/users", None, payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = app.post("/api/auth/users", None, payload).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .post(
            "/api/auth/users",
            None,
            json!({"username": "carol", "password": "short"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bad_credentials_share_one_error() {
    let app = TestApp::new().await;
    app.post(
        "/api/auth/users",
        None,
        json!({"username": "dave", "password": "correct-horse"}),
    )
    .await;

    let (s1, wrong_pw) = app
        .post(
            "/api/auth/token",
            None,
            json!({"username": "dave", "password": "battery-staple"}),
        )
        .await;
    let (s2, unknown) = app
        .post(
            "/api/auth/token",
            None,
            json!({"username": "nobody", "password": "battery-staple"}),
        )
        .await;
    assert_eq!(s1, StatusCode::UNAUTHORIZED);
    assert_eq!(s2, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw, unknown);
}

#[tokio::test]
async fn test_token_problems_are_401() {
    let app = TestApp::new().await;

    let (status, _) = app.get("/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/api/auth/me", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Token for a user that does not exist
    let ghost = app.token(9999, "ghost");
    let (status, _) = app.get("/api/auth/me", Some(&ghost)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_group_changes_apply_to_existing_tokens() {
    let app = TestApp::new().await;
    let (id, token) = app.user("erin", &[]).await;

    let (status, _) = app.get("/api/groups/delivery-crew/users", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    group::add_member(&app.state.pool, id, Role::Manager.group_name())
        .await
        .unwrap();
    let (status, _) = app.get("/api/groups/delivery-crew/users", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "ok");
}
