// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Blog post models.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BlogPostTag {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    /// HTML body
    pub content: String,
    pub image: String,
    pub published_at: String,
    pub updated_at: String,
    pub created_at: String,
    #[serde(default)]
    pub tags: Vec<BlogPostTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub total_posts: u32,
    pub next_page: Option<u32>,
    pub prev_page: Option<u32>,
}

impl Pagination {
    /// Compute page links for a 1-based `page` over `total_posts`.
    pub fn new(page: u32, limit: u32, total_posts: u32) -> Self {
        let total_pages = total_posts.div_ceil(limit.max(1));
        Self {
            page,
            limit,
            total_pages,
            total_posts,
            next_page: (page < total_pages).then(|| page + 1),
            prev_page: (page > 1).then(|| page - 1),
        }
    }
}

/// One page of posts.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PostsPage {
    pub posts: Vec<BlogPost>,
    pub pagination: Pagination,
}
