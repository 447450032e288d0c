// SPDX-License-Identifier: MIT

//! User account and profile models.

use serde::{Deserialize, Serialize};

/// Account role. Faculty members may review submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Role {
    Student,
    Faculty,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public profile joined read-only to annotate activities.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    /// Owning user ID (also the profile's primary key)
    pub user_id: String,
    /// Human-readable display name
    pub display_name: String,
    /// Account role
    pub role: Role,
    /// When the account was created (RFC3339)
    pub created_at: String,
}

/// Credential row used only by the auth layer. Never serialized to clients.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub password_hash: String,
}
