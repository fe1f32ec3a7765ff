// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lead-capture form routes (contact, newsletter).

use crate::error::{AppError, Result};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/contact", post(contact))
        .route("/api/subscribe", post(subscribe))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[serde(default)]
    #[validate(length(max = 200, message = "Name is too long"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 320, message = "Email is too long"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 5000, message = "Message is too long"))]
    pub message: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubscribeRequest {
    #[serde(default)]
    #[validate(length(max = 320, message = "Email is too long"))]
    pub email: String,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub success: bool,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_limits<T: Validate>(form: &T) -> Result<()> {
    form.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid form data".to_string());
        AppError::BadRequest(message)
    })
}

/// Record a contact message.
async fn contact(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>> {
    let Json(form) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if is_blank(&form.name) || is_blank(&form.email) || is_blank(&form.message) {
        return Err(AppError::BadRequest(
            "Name, email, and message are required".to_string(),
        ));
    }
    check_limits(&form)?;

    if !state
        .leads
        .add_contact_message(&form.name, &form.email, &form.message)
        .await
    {
        return Err(AppError::Submission("Failed to send contact message"));
    }

    tracing::info!("Contact message recorded");
    Ok(Json(SubmitResponse { success: true }))
}

/// Record a newsletter subscription.
async fn subscribe(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<SubscribeRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>> {
    let Json(form) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if is_blank(&form.email) {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }
    check_limits(&form)?;

    if !state.leads.add_subscriber(&form.email).await {
        return Err(AppError::Submission("Failed to process subscription"));
    }

    tracing::info!("Subscriber recorded");
    Ok(Json(SubmitResponse { success: true }))
}
