// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Blog routes.

use crate::error::{AppError, Result};
use crate::models::{BlogPost, BlogPostTag, PostsPage};
use crate::services::blog::DEFAULT_PAGE_SIZE;
use crate::services::BlogMetadata;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/blog/posts", get(list_posts))
        .route("/api/blog/posts/{slug}", get(get_post))
        .route("/api/blog/tags", get(list_tags))
        .route("/api/blog/tags/{tag}", get(posts_by_tag))
        .route("/api/blog/meta", get(metadata))
}

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_page() -> u32 {
    1
}
fn default_limit() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl PageQuery {
    fn validate(&self) -> Result<()> {
        if self.page < 1 {
            return Err(AppError::BadRequest(
                "Page must be greater than 0".to_string(),
            ));
        }
        if self.limit < 1 {
            return Err(AppError::BadRequest(
                "Limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
) -> Result<Json<PostsPage>> {
    params.validate()?;
    Ok(Json(state.blog.get_blog_posts(params.page, params.limit)))
}

async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>> {
    state
        .blog
        .get_blog_post(&slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Post {slug} not found")))
}

async fn list_tags(State(state): State<Arc<AppState>>) -> Json<Vec<BlogPostTag>> {
    Json(state.blog.get_all_tags())
}

async fn posts_by_tag(
    State(state): State<Arc<AppState>>,
    Path(tag): Path<String>,
    Query(params): Query<PageQuery>,
) -> Result<Json<PostsPage>> {
    params.validate()?;
    Ok(Json(
        state
            .blog
            .get_posts_by_tag(&tag, params.page, params.limit),
    ))
}

async fn metadata(State(state): State<Arc<AppState>>) -> Json<BlogMetadata> {
    Json(BlogMetadata::from(&state.config.blog))
}
