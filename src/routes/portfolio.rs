// SPDX-License-Identifier: MIT

//! Portfolio view and export routes.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Activity, ActivityStatus, Profile};
use crate::services::{pdf, portfolio, PortfolioEntry};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/portfolio", get(get_portfolio))
        .route("/api/portfolio/export.pdf", get(export_pdf))
        .route("/api/portfolio/share", get(get_share_payload))
}

#[derive(Serialize)]
pub struct PortfolioResponse {
    pub display_name: String,
    pub activities: Vec<Activity>,
    pub total: u32,
}

async fn load_profile(state: &Arc<AppState>, user_id: &str) -> Result<Profile> {
    state
        .db
        .get_profile(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
}

/// The caller's own activities, most recent first.
async fn get_portfolio(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<PortfolioResponse>> {
    let profile = load_profile(&state, &user.user_id).await?;
    let activities = state
        .db
        .list_activities_for_user(&user.user_id, None)
        .await?;

    let total = activities.len() as u32;
    Ok(Json(PortfolioResponse {
        display_name: profile.display_name,
        activities,
        total,
    }))
}

/// Export the caller's approved activities as a PDF document.
async fn export_pdf(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let profile = load_profile(&state, &user.user_id).await?;
    let approved = state
        .db
        .list_activities_for_user(&user.user_id, Some(ActivityStatus::Approved))
        .await?;

    let entries: Vec<PortfolioEntry> = approved
        .into_iter()
        .map(|a| PortfolioEntry {
            title: a.title,
            description: a.description,
            created_at: a.created_at,
        })
        .collect();

    let pages = portfolio::layout_document(&profile.display_name, &entries);
    let bytes = pdf::render(&pages);

    tracing::debug!(
        user_id = %user.user_id,
        pages = pages.len(),
        bytes = bytes.len(),
        "Portfolio PDF generated"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"portfolio.pdf\"".to_string(),
            ),
        ],
        bytes,
    ))
}

#[derive(Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// Payload for the client's native share / clipboard fallback.
async fn get_share_payload(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SharePayload>> {
    let profile = load_profile(&state, &user.user_id).await?;
    let approved = state
        .db
        .list_activities_for_user(&user.user_id, Some(ActivityStatus::Approved))
        .await?;

    let url = format!(
        "{}/portfolio?student={}",
        state.config.frontend_url,
        urlencoding::encode(&user.user_id)
    );

    Ok(Json(SharePayload {
        title: format!("{}'s Portfolio", profile.display_name),
        text: format!(
            "Check out {} approved achievements from {}.",
            approved.len(),
            profile.display_name
        ),
        url,
    }))
}
