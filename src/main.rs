// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Portfolio API Server
//!
//! Serves profile, experience and blog content for the portfolio site and
//! records contact messages and newsletter subscriptions in Google Sheets.

use portfolio_api::{config::Config, services::BlogService, services::SheetsClient, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env();
    tracing::info!(port = config.port, "Starting Portfolio API");

    // Initialize Google Sheets client
    let sheets = Arc::new(SheetsClient::new(&config)?);
    if !sheets.has_credentials() {
        tracing::warn!("No Google credentials loaded; forms will not be recorded");
    }

    // Load blog catalog
    tracing::info!(path = %config.blog_posts_path.display(), "Loading blog posts");
    let blog = BlogService::load_or_empty(&config.blog_posts_path);

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), sheets, blog));

    // Build router
    let app = portfolio_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("portfolio_api=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();

    Ok(())
}
