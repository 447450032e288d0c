// SPDX-License-Identifier: MIT

//! SQLite store with typed operations.
//!
//! Provides high-level operations for:
//! - Users and profiles (account storage, read-only author names)
//! - Activities (submission, listing, review transitions)
//!
//! The schema is created at startup; there is no separate migration
//! tooling for this service.

use crate::error::AppError;
use crate::models::{Activity, ActivityStatus, ActivityWithAuthor, Profile, Role, UserAccount};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// SQLite database handle.
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Open (creating if missing) the database at `url` and ensure the schema.
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| AppError::Database(format!("Invalid DATABASE_URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to SQLite: {}", e)))?;

        let db = Self { pool };
        db.init_schema().await?;

        tracing::info!(url, "Connected to SQLite");
        Ok(db)
    }

    /// In-memory database for tests.
    ///
    /// Uses a single connection so every query sees the same memory store.
    pub async fn connect_in_memory() -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| AppError::Database(format!("Failed to open in-memory DB: {}", e)))?;

        let db = Self { pool };
        db.init_schema().await?;
        Ok(db)
    }

    async fn init_schema(&self) -> Result<(), AppError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users(
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS profiles(
                user_id TEXT PRIMARY KEY,
                display_name TEXT NOT NULL,
                role TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES users(id)
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS activities(
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                status TEXT NOT NULL DEFAULT 'pending',
                faculty_id TEXT,
                created_at TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES users(id),
                FOREIGN KEY(faculty_id) REFERENCES users(id)
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_activities_user ON activities(user_id, created_at)",
        )
        .execute(&self.pool)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_activities_status ON activities(status)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Create a user account and its profile atomically.
    ///
    /// A duplicate email maps to a conflict error.
    pub async fn create_user(
        &self,
        id: &str,
        email: &str,
        password_hash: &str,
        display_name: &str,
        role: Role,
        created_at: &str,
    ) -> Result<Profile, AppError> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO users(id, email, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .bind(created_at)
        .execute(&mut *tx)
        .await;

        if let Err(sqlx::Error::Database(db_err)) = &inserted {
            if db_err.is_unique_violation() {
                return Err(AppError::Conflict("Email already registered".to_string()));
            }
        }
        inserted?;

        sqlx::query(
            "INSERT INTO profiles(user_id, display_name, role, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(id)
        .bind(display_name)
        .bind(role)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Profile {
            user_id: id.to_string(),
            display_name: display_name.to_string(),
            role,
            created_at: created_at.to_string(),
        })
    }

    /// Look up credentials by email (login path).
    pub async fn get_account_by_email(&self, email: &str) -> Result<Option<UserAccount>, AppError> {
        let account = sqlx::query_as::<_, UserAccount>(
            "SELECT id, email, password_hash FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    /// Get a profile by user ID.
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT user_id, display_name, role, created_at FROM profiles WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    // ─── Activity Operations ─────────────────────────────────────

    /// Insert a newly submitted activity.
    pub async fn insert_activity(&self, activity: &Activity) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO activities(id, user_id, title, description, status, faculty_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&activity.id)
        .bind(&activity.user_id)
        .bind(&activity.title)
        .bind(&activity.description)
        .bind(activity.status)
        .bind(&activity.faculty_id)
        .bind(&activity.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Get an activity by ID.
    pub async fn get_activity(&self, id: &str) -> Result<Option<Activity>, AppError> {
        let activity = sqlx::query_as::<_, Activity>(
            "SELECT id, user_id, title, description, status, faculty_id, created_at
             FROM activities WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(activity)
    }

    /// List a user's own activities, most recent first.
    pub async fn list_activities_for_user(
        &self,
        user_id: &str,
        status: Option<ActivityStatus>,
    ) -> Result<Vec<Activity>, AppError> {
        let activities = match status {
            Some(status) => {
                sqlx::query_as::<_, Activity>(
                    "SELECT id, user_id, title, description, status, faculty_id, created_at
                     FROM activities
                     WHERE user_id = ? AND status = ?
                     ORDER BY datetime(created_at) DESC, id DESC",
                )
                .bind(user_id)
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Activity>(
                    "SELECT id, user_id, title, description, status, faculty_id, created_at
                     FROM activities
                     WHERE user_id = ?
                     ORDER BY datetime(created_at) DESC, id DESC",
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(activities)
    }

    /// Approved activities across all students with author names, most
    /// recent first (the dashboard feed).
    pub async fn list_approved_with_authors(
        &self,
        limit: u32,
    ) -> Result<Vec<ActivityWithAuthor>, AppError> {
        let rows = sqlx::query_as::<_, ActivityWithAuthor>(
            "SELECT a.id, a.user_id, a.title, a.description, a.status, a.faculty_id,
                    a.created_at, p.display_name AS author_name
             FROM activities a
             JOIN profiles p ON p.user_id = a.user_id
             WHERE a.status = 'approved'
             ORDER BY datetime(a.created_at) DESC, a.id DESC
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Pending activities visible to a reviewer: unassigned or assigned to
    /// them, never their own submissions. Oldest first so the queue drains
    /// in submission order.
    pub async fn list_pending_for_reviewer(
        &self,
        faculty_id: &str,
    ) -> Result<Vec<ActivityWithAuthor>, AppError> {
        let rows = sqlx::query_as::<_, ActivityWithAuthor>(
            "SELECT a.id, a.user_id, a.title, a.description, a.status, a.faculty_id,
                    a.created_at, p.display_name AS author_name
             FROM activities a
             JOIN profiles p ON p.user_id = a.user_id
             WHERE a.status = 'pending'
               AND a.user_id != ?
               AND (a.faculty_id IS NULL OR a.faculty_id = ?)
             ORDER BY datetime(a.created_at) ASC, a.id ASC",
        )
        .bind(faculty_id)
        .bind(faculty_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Compare-and-set status transition from `pending`.
    ///
    /// Updates only the status and the approving-faculty reference, and only
    /// if the activity is still pending. Returns false when the row was
    /// already reviewed by someone else (the conditional WHERE matched
    /// nothing), so concurrent reviewers cannot silently overwrite each
    /// other.
    pub async fn transition_from_pending(
        &self,
        activity_id: &str,
        to: ActivityStatus,
        faculty_id: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE activities SET status = ?, faculty_id = ?
             WHERE id = ? AND status = 'pending'",
        )
        .bind(to)
        .bind(faculty_id)
        .bind(activity_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
