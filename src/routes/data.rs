// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Content routes backed by the spreadsheet.

use crate::error::Result;
use crate::models::{Experience, MainData};
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/data/main", get(get_main))
        .route("/api/data/experiences", get(get_experiences))
}

/// Profile data; blank or unreachable cells fall back to configured defaults.
async fn get_main(State(state): State<Arc<AppState>>) -> Result<Json<MainData>> {
    Ok(Json(state.content.get_main_data().await))
}

/// Experience timeline; empty when the sheet is unreachable.
async fn get_experiences(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Experience>>> {
    Ok(Json(state.content.get_experiences_data().await))
}
