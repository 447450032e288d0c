// SPDX-License-Identifier: MIT

//! Faculty review routes.
//!
//! Pending submissions move to `approved` or `request_more_info` via a
//! conditional update, so two reviewers acting on the same record cannot
//! silently overwrite each other: the second action gets a conflict.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Activity, ActivityStatus, ActivityWithAuthor};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/review/pending", get(list_pending))
        .route("/api/review/{id}/approve", post(approve))
        .route("/api/review/{id}/request-info", post(request_info))
}

#[derive(Serialize)]
pub struct PendingResponse {
    pub activities: Vec<ActivityWithAuthor>,
    pub total: u32,
}

/// Pending submissions awaiting this reviewer, oldest first. Never
/// includes the reviewer's own activities.
async fn list_pending(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<PendingResponse>> {
    user.require_faculty()?;

    let activities = state.db.list_pending_for_reviewer(&user.user_id).await?;
    let total = activities.len() as u32;

    Ok(Json(PendingResponse { activities, total }))
}

/// Approve a pending activity.
async fn approve(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Activity>> {
    review_action(&state, &user, &id, ActivityStatus::Approved).await
}

/// Ask the student for more information on a pending activity.
async fn request_info(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Activity>> {
    review_action(&state, &user, &id, ActivityStatus::RequestMoreInfo).await
}

/// Shared transition logic for both review actions. Touches only the
/// status and the approving-faculty reference.
async fn review_action(
    state: &Arc<AppState>,
    user: &AuthUser,
    activity_id: &str,
    to: ActivityStatus,
) -> Result<Json<Activity>> {
    user.require_faculty()?;

    let mut activity = state
        .db
        .get_activity(activity_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", activity_id)))?;

    if activity.user_id == user.user_id {
        return Err(AppError::Forbidden(
            "Reviewers cannot act on their own submissions".to_string(),
        ));
    }

    if !activity.status.can_transition_to(to) {
        return Err(AppError::Conflict(format!(
            "Activity is already {}",
            activity.status
        )));
    }

    let updated = state
        .db
        .transition_from_pending(activity_id, to, &user.user_id)
        .await?;

    if !updated {
        // Lost the race against another reviewer between read and update.
        return Err(AppError::Conflict(
            "Activity was reviewed concurrently".to_string(),
        ));
    }

    tracing::info!(
        activity_id = %activity_id,
        faculty_id = %user.user_id,
        status = %to,
        "Activity reviewed"
    );

    activity.status = to;
    activity.faculty_id = Some(user.user_id.clone());
    Ok(Json(activity))
}
