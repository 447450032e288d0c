// SPDX-License-Identifier: MIT

//! Achievement activity model for storage and API.

use serde::{Deserialize, Serialize};

/// Review state of an activity.
///
/// Stored as lowercase text in the `activities.status` column and
/// serialized identically on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ActivityStatus {
    Pending,
    Approved,
    RequestMoreInfo,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Pending => "pending",
            ActivityStatus::Approved => "approved",
            ActivityStatus::RequestMoreInfo => "request_more_info",
        }
    }

    /// Whether a faculty action may move an activity from `self` to `to`.
    ///
    /// Only pending activities are reviewable; approved and
    /// request-more-info records are terminal for faculty actions.
    pub fn can_transition_to(&self, to: ActivityStatus) -> bool {
        matches!(
            (self, to),
            (
                ActivityStatus::Pending,
                ActivityStatus::Approved | ActivityStatus::RequestMoreInfo
            )
        )
    }
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored activity record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Activity {
    /// Activity ID (UUID)
    pub id: String,
    /// Owning user ID
    pub user_id: String,
    /// Achievement title
    pub title: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Review status
    pub status: ActivityStatus,
    /// Faculty member who acted on this activity, if any
    pub faculty_id: Option<String>,
    /// When the activity was submitted (RFC3339)
    pub created_at: String,
}

/// Activity joined with its author's display name, for feed and review views.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ActivityWithAuthor {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: ActivityStatus,
    pub faculty_id: Option<String>,
    pub created_at: String,
    /// Author display name from the joined profile
    pub author_name: String,
}
