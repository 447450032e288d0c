// SPDX-License-Identifier: MIT

//! Portfolio view, PDF export and share payload tests.

use axum::http::{header, StatusCode};
use ignite_achieve::models::{Activity, ActivityStatus, Role};
use ignite_achieve::AppState;
use std::sync::Arc;
use tower::ServiceExt;

mod common;

async fn seed_activity(
    state: &Arc<AppState>,
    user_id: &str,
    title: &str,
    status: ActivityStatus,
    created_at: &str,
) {
    let activity = Activity {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        title: title.to_string(),
        description: Some("Details.".to_string()),
        status,
        faculty_id: None,
        created_at: created_at.to_string(),
    };
    state
        .db
        .insert_activity(&activity)
        .await
        .expect("Failed to seed activity");
}

#[tokio::test]
async fn test_portfolio_lists_only_own_activities_newest_first() {
    let (app, state) = common::create_test_app().await;
    let (user_id, token) =
        common::seed_user(&state, "s@example.edu", "Sam Doe", Role::Student).await;
    let (other_id, _) =
        common::seed_user(&state, "other@example.edu", "Someone Else", Role::Student).await;

    seed_activity(
        &state,
        &user_id,
        "Older approved",
        ActivityStatus::Approved,
        "2026-01-10T09:00:00Z",
    )
    .await;
    seed_activity(
        &state,
        &user_id,
        "Newer pending",
        ActivityStatus::Pending,
        "2026-02-20T09:00:00Z",
    )
    .await;
    seed_activity(
        &state,
        &other_id,
        "Not mine",
        ActivityStatus::Approved,
        "2026-02-25T09:00:00Z",
    )
    .await;

    let response = app
        .oneshot(common::get_request("/api/portfolio", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["display_name"], "Sam Doe");
    assert_eq!(body["total"], 2);
    assert_eq!(body["activities"][0]["title"], "Newer pending");
    assert_eq!(body["activities"][1]["title"], "Older approved");
}

#[tokio::test]
async fn test_pdf_export_returns_pdf_bytes() {
    let (app, state) = common::create_test_app().await;
    let (user_id, token) =
        common::seed_user(&state, "s@example.edu", "Sam Doe", Role::Student).await;

    seed_activity(
        &state,
        &user_id,
        "Dean's List",
        ActivityStatus::Approved,
        "2026-01-10T09:00:00Z",
    )
    .await;

    let response = app
        .oneshot(common::get_request("/api/portfolio/export.pdf", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"portfolio.pdf\""
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
    assert!(bytes.ends_with(b"%%EOF\n"));
}

#[tokio::test]
async fn test_pdf_export_works_with_no_approved_activities() {
    let (app, state) = common::create_test_app().await;
    let (user_id, token) =
        common::seed_user(&state, "s@example.edu", "Sam Doe", Role::Student).await;

    // Pending records must not leak into the export.
    seed_activity(
        &state,
        &user_id,
        "Still pending",
        ActivityStatus::Pending,
        "2026-01-10T09:00:00Z",
    )
    .await;

    let response = app
        .oneshot(common::get_request("/api/portfolio/export.pdf", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
    assert!(!String::from_utf8_lossy(&bytes).contains("Still pending"));
}

#[tokio::test]
async fn test_share_payload() {
    let (app, state) = common::create_test_app().await;
    let (user_id, token) =
        common::seed_user(&state, "s@example.edu", "Sam Doe", Role::Student).await;

    seed_activity(
        &state,
        &user_id,
        "Approved one",
        ActivityStatus::Approved,
        "2026-01-10T09:00:00Z",
    )
    .await;
    seed_activity(
        &state,
        &user_id,
        "Approved two",
        ActivityStatus::Approved,
        "2026-01-11T09:00:00Z",
    )
    .await;
    seed_activity(
        &state,
        &user_id,
        "Pending one",
        ActivityStatus::Pending,
        "2026-01-12T09:00:00Z",
    )
    .await;

    let response = app
        .oneshot(common::get_request("/api/portfolio/share", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["title"], "Sam Doe's Portfolio");
    let text = body["text"].as_str().unwrap();
    assert!(text.contains('2'), "share text should mention the approved count: {text}");

    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("http://localhost:5173/portfolio?student="));
    assert!(url.ends_with(&urlencoding::encode(&user_id).into_owned()));
}
