// SPDX-License-Identifier: MIT

//! Ignite Achieve API Server
//!
//! Students submit achievement activities, faculty review and approve
//! them, and approved activities can be exported as a portfolio PDF.

use ignite_achieve::{config::Config, db::Db, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Ignite Achieve API");

    // Open the database and ensure the schema
    let db = Db::connect(&config.database_url)
        .await
        .expect("Failed to open database");

    // Build shared state
    let state = Arc::new(AppState { config: config.clone(), db });

    // Build router
    let app = ignite_achieve::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ignite_achieve=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
