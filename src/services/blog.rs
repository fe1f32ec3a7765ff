// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Blog post catalog: loading, pagination and tag lookup.

use crate::config::BlogSettings;
use crate::models::{BlogPost, BlogPostTag, Pagination, PostsPage};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub const DEFAULT_PAGE_SIZE: u32 = 4;
pub const MAX_PAGE_SIZE: u32 = 50;

/// Service over an in-memory post catalog, newest first as stored.
#[derive(Default, Clone)]
pub struct BlogService {
    posts: Vec<BlogPost>,
}

impl BlogService {
    /// Load posts from a JSON array file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, BlogError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| BlogError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load posts from a JSON array string.
    pub fn load_from_json(json_data: &str) -> Result<Self, BlogError> {
        let posts: Vec<BlogPost> =
            serde_json::from_str(json_data).map_err(|e| BlogError::ParseError(e.to_string()))?;
        tracing::info!(count = posts.len(), "Loaded blog posts");
        Ok(Self { posts })
    }

    /// Load the catalog, falling back to an empty one if the file is unusable.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        Self::load_from_file(path.as_ref()).unwrap_or_else(|e| {
            tracing::warn!(
                path = %path.as_ref().display(),
                error = %e,
                "Blog catalog unavailable, serving no posts"
            );
            Self::default()
        })
    }

    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    /// One page of all posts.
    pub fn get_blog_posts(&self, page: u32, limit: u32) -> PostsPage {
        paginate(self.posts.iter(), page, limit)
    }

    /// A single post by slug.
    pub fn get_blog_post(&self, slug: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|post| post.slug == slug)
    }

    /// One page of posts carrying `tag` (case-insensitive name match).
    pub fn get_posts_by_tag(&self, tag: &str, page: u32, limit: u32) -> PostsPage {
        let tag = tag.to_lowercase();
        paginate(
            self.posts
                .iter()
                .filter(|post| post.tags.iter().any(|t| t.name.to_lowercase() == tag)),
            page,
            limit,
        )
    }

    /// Unique tags across all posts, in first-seen order.
    pub fn get_all_tags(&self) -> Vec<BlogPostTag> {
        let mut seen = HashSet::new();
        self.posts
            .iter()
            .flat_map(|post| post.tags.iter())
            .filter(|tag| seen.insert(tag.id.clone()))
            .cloned()
            .collect()
    }
}

fn paginate<'a>(posts: impl Iterator<Item = &'a BlogPost>, page: u32, limit: u32) -> PostsPage {
    let matching: Vec<&BlogPost> = posts.collect();
    let page = page.max(1);
    let limit = limit.clamp(1, MAX_PAGE_SIZE);

    let start = ((page - 1) as usize).saturating_mul(limit as usize);
    let posts = matching
        .iter()
        .skip(start)
        .take(limit as usize)
        .map(|post| (*post).clone())
        .collect();

    PostsPage {
        posts,
        pagination: Pagination::new(page, limit, matching.len() as u32),
    }
}

/// Blog title metadata for page headers.
#[derive(Debug, Clone, Serialize)]
pub struct BlogTitle {
    pub absolute: String,
    pub default: String,
    pub template: String,
}

/// Blog presentation metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogMetadata {
    pub name: String,
    pub copyright: String,
    pub title: BlogTitle,
    pub description: String,
    pub base_url: String,
}

impl From<&BlogSettings> for BlogMetadata {
    fn from(settings: &BlogSettings) -> Self {
        Self {
            name: settings.display_name.clone(),
            copyright: settings.copyright.clone(),
            title: BlogTitle {
                absolute: settings.default_title.clone(),
                default: settings.default_title.clone(),
                template: format!("%s - {}", settings.default_title),
            },
            description: settings.description.clone(),
            base_url: settings.base_url.clone(),
        }
    }
}

/// Errors from blog catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum BlogError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse blog posts: {0}")]
    ParseError(String),
}
