//! Shared harness: in-memory state, seeded users and a oneshot client

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use lemon_server::auth::{JwtConfig, Role};
use lemon_server::db::DbService;
use lemon_server::db::repository::{group, user};
use lemon_server::{Config, ServerState, app};
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub state: ServerState,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = DbService::in_memory().await.unwrap();
        let config = Config::for_tests(JwtConfig::with_secret(
            "integration-test-secret-0123456789abcdef",
        ));
        let state = ServerState::new(config, db.pool);
        state.prepare().await.unwrap();
        let router = app(state.clone());
        Self { state, router }
    }

    /// Create a user in the Customer group plus any extra roles; returns (id, token)
    pub async fn user(&self, username: &str, roles: &[Role]) -> (i64, String) {
        let created = user::create(
            &self.state.pool,
            username,
            &format!("{username}@example.com"),
            "unused-hash",
            false,
        )
        .await
        .unwrap();
        group::add_member(&self.state.pool, created.id, Role::Customer.group_name())
            .await
            .unwrap();
        for role in roles {
            group::add_member(&self.state.pool, created.id, role.group_name())
                .await
                .unwrap();
        }
        let token = self.token(created.id, username);
        (created.id, token)
    }

    pub async fn admin(&self, username: &str) -> (i64, String) {
        let created = user::create(&self.state.pool, username, "", "unused-hash", true)
            .await
            .unwrap();
        (created.id, self.token(created.id, username))
    }

    pub fn token(&self, user_id: i64, username: &str) -> String {
        self.state
            .jwt_service
            .generate_token(user_id, username)
            .unwrap()
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, token, None).await
    }

    /// Category plus menu item through the API, as a manager; returns the item id
    pub async fn menu_item(&self, manager: &str, slug: &str, title: &str, price: f64) -> i64 {
        let category_id = match self.get("/api/categories", None).await.1.as_array() {
            Some(list) => list
                .iter()
                .find(|c| c["slug"] == slug)
                .and_then(|c| c["id"].as_i64()),
            None => None,
        };
        let category_id = match category_id {
            Some(id) => id,
            None => {
                let (status, body) = self
                    .post(
                        "/api/categories",
                        Some(manager),
                        serde_json::json!({"title": slug, "slug": slug}),
                    )
                    .await;
                assert_eq!(status, StatusCode::CREATED, "{body}");
                body["id"].as_i64().unwrap()
            }
        };

        let (status, body) = self
            .post(
                "/api/menu-items",
                Some(manager),
                serde_json::json!({"title": title, "price": price, "category_id": category_id}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }
}
