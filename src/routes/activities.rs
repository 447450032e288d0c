// SPDX-License-Identifier: MIT

//! Activity submission and listing routes.

use axum::{
    extract::{DefaultBodyLimit, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Activity, ActivityStatus, ActivityWithAuthor};
use crate::time_utils::now_rfc3339;
use crate::AppState;

/// Fixed size threshold for image attachments (decoded bytes).
pub const MAX_ATTACHMENT_BYTES: usize = 2 * 1024 * 1024;

/// Request body limit for submissions. Base64 inflates the attachment by
/// 4/3, and the JSON envelope adds a little more, so this must sit above
/// the encoded form of `MAX_ATTACHMENT_BYTES` for the handler's own
/// threshold to be the one that rejects oversized uploads.
pub const MAX_REQUEST_BODY_BYTES: usize = 3 * 1024 * 1024;

const ALLOWED_ATTACHMENT_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];
const MAX_TAGS: usize = 10;
const MAX_TAG_LEN: usize = 40;

const DEFAULT_FEED_LIMIT: u32 = 50;
const MAX_FEED_LIMIT: u32 = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/activities",
            post(submit_activity).get(list_my_activities),
        )
        .route("/api/feed", get(get_feed))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
}

/// Optional image upload accompanying a submission. Validated against the
/// size threshold and type whitelist, then discarded; attachments are not
/// persisted by this service.
#[derive(Deserialize)]
pub struct AttachmentUpload {
    pub filename: String,
    pub content_type: String,
    pub data_base64: String,
}

#[derive(Deserialize, Validate)]
pub struct SubmitActivityRequest {
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub title: String,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub description: Option<String>,
    /// Free-text tags. Accepted for client round-tripping, never persisted.
    #[serde(default)]
    pub tags: Vec<String>,
    pub attachment: Option<AttachmentUpload>,
}

fn validate_attachment(attachment: &AttachmentUpload) -> Result<()> {
    if !ALLOWED_ATTACHMENT_TYPES.contains(&attachment.content_type.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unsupported attachment type: {}",
            attachment.content_type
        )));
    }

    let decoded = BASE64
        .decode(attachment.data_base64.as_bytes())
        .map_err(|_| AppError::BadRequest("Attachment is not valid base64".to_string()))?;

    if decoded.len() > MAX_ATTACHMENT_BYTES {
        return Err(AppError::BadRequest(format!(
            "Attachment exceeds the {} byte limit",
            MAX_ATTACHMENT_BYTES
        )));
    }

    Ok(())
}

fn validate_tags(tags: &[String]) -> Result<()> {
    if tags.len() > MAX_TAGS {
        return Err(AppError::BadRequest(format!(
            "At most {} tags are allowed",
            MAX_TAGS
        )));
    }
    if tags.iter().any(|t| t.len() > MAX_TAG_LEN) {
        return Err(AppError::BadRequest(format!(
            "Tags must be at most {} characters",
            MAX_TAG_LEN
        )));
    }
    Ok(())
}

/// Submit a new achievement. Records always start pending review.
async fn submit_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<SubmitActivityRequest>,
) -> Result<(StatusCode, Json<Activity>)> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let title = req.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    validate_tags(&req.tags)?;

    if let Some(attachment) = &req.attachment {
        validate_attachment(attachment)?;
        // Attachments are checked so the client gets an immediate error,
        // but this service stores text records only.
        tracing::debug!(
            user_id = %user.user_id,
            filename = %attachment.filename,
            "Attachment validated and discarded"
        );
    }

    let description = req
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from);

    let activity = Activity {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.user_id.clone(),
        title: title.to_string(),
        description,
        status: ActivityStatus::Pending,
        faculty_id: None,
        created_at: now_rfc3339(),
    };

    state.db.insert_activity(&activity).await?;

    tracing::info!(
        activity_id = %activity.id,
        user_id = %user.user_id,
        "Activity submitted"
    );

    Ok((StatusCode::CREATED, Json(activity)))
}

#[derive(Deserialize)]
struct ActivitiesQuery {
    /// Filter by review status
    status: Option<ActivityStatus>,
}

#[derive(Serialize)]
pub struct ActivitiesResponse {
    pub activities: Vec<Activity>,
    pub total: u32,
}

/// Get the caller's own activities, most recent first.
async fn list_my_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ActivitiesQuery>,
) -> Result<Json<ActivitiesResponse>> {
    let activities = state
        .db
        .list_activities_for_user(&user.user_id, params.status)
        .await?;

    let total = activities.len() as u32;
    Ok(Json(ActivitiesResponse { activities, total }))
}

#[derive(Deserialize)]
struct FeedQuery {
    #[serde(default = "default_feed_limit")]
    limit: u32,
}

fn default_feed_limit() -> u32 {
    DEFAULT_FEED_LIMIT
}

#[derive(Serialize)]
pub struct FeedResponse {
    pub activities: Vec<ActivityWithAuthor>,
    pub total: u32,
}

/// Approved achievements across all students (the dashboard feed).
async fn get_feed(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeedQuery>,
) -> Result<Json<FeedResponse>> {
    if params.limit == 0 {
        return Err(AppError::BadRequest(
            "Limit must be greater than 0".to_string(),
        ));
    }
    let limit = params.limit.min(MAX_FEED_LIMIT);

    let activities = state.db.list_approved_with_authors(limit).await?;
    let total = activities.len() as u32;

    Ok(Json(FeedResponse { activities, total }))
}
