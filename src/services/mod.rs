// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - data access and business logic.

pub mod blog;
pub mod content;
pub mod credentials;
pub mod google_auth;
pub mod gviz;
pub mod leads;
pub mod sheet_cache;
pub mod sheets;

pub use blog::{BlogMetadata, BlogService};
pub use content::ContentService;
pub use credentials::{load_credentials, ServiceAccountCredentials};
pub use google_auth::{AuthError, TokenIssuer};
pub use leads::LeadService;
pub use sheet_cache::SheetCache;
pub use sheets::{
    SheetFetch, SheetSource, SheetsClient, SheetsClientOptions, SheetsEndpoints, SheetsError,
};
