// SPDX-License-Identifier: MIT

//! Ignite Achieve: student achievement records with faculty review.
//!
//! This crate provides the backend API for submitting achievement
//! activities, running them through faculty approval, and exporting a
//! student's approved activities as a shareable portfolio.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Db;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
}
