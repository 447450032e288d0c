// SPDX-License-Identifier: MIT

//! Signup, login and logout flow tests over the real HTTP surface.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;

fn public_json(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_signup_login_me_roundtrip() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .clone()
        .oneshot(public_json(
            "POST",
            "/auth/signup",
            json!({
                "email": "maria@example.edu",
                "password": "correct horse",
                "display_name": "Maria Santos",
                "role": "student"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let profile = common::body_json(response).await;
    assert_eq!(profile["display_name"], "Maria Santos");
    assert_eq!(profile["role"], "student");

    let response = app
        .clone()
        .oneshot(public_json(
            "POST",
            "/auth/login",
            json!({ "email": "Maria@Example.EDU", "password": "correct horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("ignite_token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));

    let body = common::body_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["display_name"], "Maria Santos");

    let response = app
        .oneshot(common::get_request("/api/me", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let (app, _) = common::create_test_app().await;

    let body = json!({
        "email": "dup@example.edu",
        "password": "long enough",
        "display_name": "First",
        "role": "student"
    });

    let response = app
        .clone()
        .oneshot(public_json("POST", "/auth/signup", body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(public_json("POST", "/auth/signup", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_rejects_invalid_input() {
    let (app, _) = common::create_test_app().await;

    // Bad email
    let response = app
        .clone()
        .oneshot(public_json(
            "POST",
            "/auth/signup",
            json!({
                "email": "not-an-email",
                "password": "long enough",
                "display_name": "X",
                "role": "student"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Short password
    let response = app
        .oneshot(public_json(
            "POST",
            "/auth/signup",
            json!({
                "email": "ok@example.edu",
                "password": "short",
                "display_name": "X",
                "role": "student"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .clone()
        .oneshot(public_json(
            "POST",
            "/auth/signup",
            json!({
                "email": "sam@example.edu",
                "password": "the real password",
                "display_name": "Sam",
                "role": "faculty"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(public_json(
            "POST",
            "/auth/login",
            json!({ "email": "sam@example.edu", "password": "wrong password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_email_unauthorized() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(public_json(
            "POST",
            "/auth/login",
            json!({ "email": "ghost@example.edu", "password": "whatever!" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_removes_session_cookie() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .header(header::COOKIE, "ignite_token=some-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("logout should clear the session cookie")
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("ignite_token="));
    assert!(set_cookie.contains("Max-Age=0"));
    assert!(set_cookie.contains("Path=/"));
}
