// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod activity;
pub mod profile;

pub use activity::{Activity, ActivityStatus, ActivityWithAuthor};
pub use profile::{Profile, Role, UserAccount};
