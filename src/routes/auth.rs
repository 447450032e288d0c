// SPDX-License-Identifier: MIT

//! Account registration and session routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, AuthUser, SESSION_COOKIE};
use crate::models::{Profile, Role};
use crate::services::password;
use crate::time_utils::now_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// Session-scoped routes (auth middleware applied in routes/mod.rs).
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/me", get(get_me))
}

#[derive(Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "must be 8-128 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 80, message = "must be 1-80 characters"))]
    pub display_name: String,
    pub role: Role,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Profile,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::days(30))
        .build()
}

/// Register a new account with its profile.
async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<Profile>)> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let email = normalize_email(&req.email);
    let display_name = req.display_name.trim();
    if display_name.is_empty() {
        return Err(AppError::BadRequest("Display name is required".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;
    let user_id = uuid::Uuid::new_v4().to_string();

    let profile = state
        .db
        .create_user(
            &user_id,
            &email,
            &password_hash,
            display_name,
            req.role,
            &now_rfc3339(),
        )
        .await?;

    tracing::info!(user_id = %profile.user_id, role = %profile.role, "Account created");

    Ok((StatusCode::CREATED, Json(profile)))
}

/// Verify credentials and mint a session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let email = normalize_email(&req.email);

    let account = state
        .db
        .get_account_by_email(&email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !password::verify_password(&account.password_hash, &req.password) {
        tracing::warn!(email = %email, "Failed login attempt");
        return Err(AppError::Unauthorized);
    }

    let profile = state
        .db
        .get_profile(&account.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile for user {} not found", account.id)))?;

    let token = create_jwt(&account.id, profile.role, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    tracing::info!(user_id = %account.id, "User logged in");

    let jar = jar.add(session_cookie(token.clone(), state.config.secure_cookies()));
    Ok((jar, Json(LoginResponse {
        token,
        user: profile,
    })))
}

/// Remove the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let removal = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    (jar.remove(removal), StatusCode::NO_CONTENT)
}

/// Get current user's profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Profile>> {
    let profile = state
        .db
        .get_profile(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    Ok(Json(profile))
}
