// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Portfolio API: content and lead-capture backend for a personal site.
//!
//! Profile and experience content is read from a Google Sheet (service
//! account or public export, with caching), contact messages and newsletter
//! subscriptions are appended to it, and blog posts are served from a local
//! catalog.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{BlogService, ContentService, LeadService, SheetsClient};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub content: ContentService,
    pub leads: LeadService,
    pub blog: BlogService,
}

impl AppState {
    /// Wire services around a shared sheets client.
    pub fn new(config: Config, sheets: Arc<SheetsClient>, blog: BlogService) -> Self {
        Self {
            content: ContentService::new(sheets.clone(), config.profile_defaults.clone()),
            leads: LeadService::new(sheets),
            blog,
            config,
        }
    }
}
