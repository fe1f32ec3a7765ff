// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod blog;
pub mod experience;
pub mod profile;
pub mod sheet;

pub use blog::{BlogPost, BlogPostTag, Pagination, PostsPage};
pub use experience::Experience;
pub use profile::MainData;
pub use sheet::{Row, SheetData};
