#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use resume_auth::config::{AppConfig, JwtConfig, ServerConfig};
use resume_auth::store::AccountStore;
use resume_auth::{build_app, AppState};
use serde_json::{json, Value};
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_config(database_url: &str) -> AppConfig {
    AppConfig {
        database_url: database_url.into(),
        db_max_connections: 5,
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.into(),
            issuer: "AuthService".into(),
            ttl_hours: 24,
        },
    }
}

pub fn app_with(store: Arc<dyn AccountStore>) -> (Router, AppState) {
    let state = AppState::from_parts(store, test_config("postgres://unused"));
    (build_app(state.clone()), state)
}

pub fn signup_body(email: &str, password: &str) -> Value {
    json!({
        "first_name": "Somchai",
        "last_name": "Jaidee",
        "email": email,
        "age": 30,
        "password": password,
        "birthday": "1994-05-01T00:00:00Z",
        "gender_id": 1,
        "address": "99 Sukhumvit Rd, Bangkok",
        "category": "IT",
        "wages": 25000,
        "contact": "0812345678",
        "profile": "Backend developer"
    })
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}
