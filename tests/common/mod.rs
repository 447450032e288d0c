// SPDX-License-Identifier: MIT

use axum::body::Body;
use axum::http::{header, Request};
use ignite_achieve::config::Config;
use ignite_achieve::db::Db;
use ignite_achieve::middleware::auth::create_jwt;
use ignite_achieve::models::Role;
use ignite_achieve::routes::create_router;
use ignite_achieve::AppState;
use std::sync::Arc;

/// Create a test app backed by an in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = Db::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");

    let state = Arc::new(AppState { config, db });
    (create_router(state.clone()), state)
}

/// Mint a session token the way the login route does.
#[allow(dead_code)]
pub fn test_jwt(state: &Arc<AppState>, user_id: &str, role: Role) -> String {
    create_jwt(user_id, role, &state.config.jwt_signing_key).expect("Failed to create JWT")
}

/// Seed an account directly in the database and return (user_id, token).
///
/// The stored password hash is a placeholder; tests that exercise the real
/// login path go through `/auth/signup` instead.
#[allow(dead_code)]
pub async fn seed_user(
    state: &Arc<AppState>,
    email: &str,
    display_name: &str,
    role: Role,
) -> (String, String) {
    let user_id = uuid::Uuid::new_v4().to_string();
    state
        .db
        .create_user(
            &user_id,
            email,
            "pbkdf2$1$00$00",
            display_name,
            role,
            "2026-01-01T00:00:00Z",
        )
        .await
        .expect("Failed to seed user");

    let token = test_jwt(state, &user_id, role);
    (user_id, token)
}

/// Build an authenticated JSON request.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

/// Build an authenticated request with no body.
#[allow(dead_code)]
pub fn get_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not valid JSON")
}
