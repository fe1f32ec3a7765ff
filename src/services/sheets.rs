// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google Sheets client with caching and public-export fallback.
//!
//! Handles:
//! - Authenticated reads through the Sheets values API (service account)
//! - Fallback to the public gviz export when auth is unavailable or fails
//! - Per-sheet freshness caching
//! - Single-row appends with cache invalidation
//!
//! Read and append operations never return errors to their callers; failures
//! degrade to empty rows or `false` and are logged.

use crate::config::Config;
use crate::models::sheet::{cell_text, Row};
use crate::models::SheetData;
use crate::services::credentials::{load_credentials, ServiceAccountCredentials};
use crate::services::google_auth::{
    AuthError, TokenIssuer, GOOGLE_TOKEN_URL, SCOPE_SHEETS_READONLY, SCOPE_SHEETS_READWRITE,
};
use crate::services::gviz::parse_gviz_response;
use crate::services::sheet_cache::SheetCache;
use crate::time_utils::{Clock, SystemClock};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Sheet names as constants.
pub mod sheet_names {
    pub const EXPERIENCES: &str = "experiences";
    pub const MAIN: &str = "main";
    /// Contact form submissions (write-only)
    pub const MESSAGES: &str = "MESSAGES";
    /// Newsletter subscribers (write-only)
    pub const SUBSCRIBERS: &str = "SUBSCRIBERS";
}

pub const GOOGLE_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
pub const GOOGLE_DOCS_BASE: &str = "https://docs.google.com";

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Base URLs of the Google endpoints the client talks to.
#[derive(Debug, Clone)]
pub struct SheetsEndpoints {
    /// OAuth token endpoint (also the assertion audience)
    pub token_url: String,
    /// Sheets values API base
    pub api_base: String,
    /// Public gviz export base
    pub public_base: String,
}

impl Default for SheetsEndpoints {
    fn default() -> Self {
        Self {
            token_url: GOOGLE_TOKEN_URL.to_string(),
            api_base: GOOGLE_SHEETS_API_BASE.to_string(),
            public_base: GOOGLE_DOCS_BASE.to_string(),
        }
    }
}

/// Sheets client errors.
#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    #[error("No service-account credentials loaded")]
    MissingCredentials,

    #[error("Spreadsheet ID is not configured")]
    MissingSpreadsheetId,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Failed to fetch sheet data: {0}")]
    Fetch(String),

    #[error("Failed to parse sheet data: {0}")]
    Parse(String),

    #[error("Failed to send append request: {0}")]
    Request(String),

    #[error("Failed to append row: {status} - {body}")]
    Append {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Where the rows of a read came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSource {
    Cache,
    Authenticated,
    Public,
    /// Every path failed; the rows are empty.
    Unavailable { reason: String },
}

/// Rows of a read together with how they were obtained.
#[derive(Debug, Clone)]
pub struct SheetFetch {
    pub data: SheetData,
    pub source: SheetSource,
}

/// Construction parameters for [`SheetsClient`].
pub struct SheetsClientOptions {
    pub spreadsheet_id: String,
    pub credentials: Option<ServiceAccountCredentials>,
    pub endpoints: SheetsEndpoints,
    pub cache_ttl_ms: u64,
    pub clock: Arc<dyn Clock>,
}

impl SheetsClientOptions {
    /// Options from application config, decoding credentials once.
    pub fn from_config(config: &Config) -> Self {
        Self {
            spreadsheet_id: config.spreadsheet_id.clone(),
            credentials: load_credentials(config.google_api_key.as_deref()),
            endpoints: SheetsEndpoints::default(),
            cache_ttl_ms: config.sheets_cache_ttl_ms,
            clock: Arc::new(SystemClock),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    values: Option<Vec<Vec<serde_json::Value>>>,
}

/// Spreadsheet data-access client.
pub struct SheetsClient {
    http: reqwest::Client,
    spreadsheet_id: String,
    credentials: Option<ServiceAccountCredentials>,
    endpoints: SheetsEndpoints,
    issuer: TokenIssuer,
    cache: SheetCache,
    clock: Arc<dyn Clock>,
}

impl SheetsClient {
    /// Create a client for the configured spreadsheet.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Self::with_options(SheetsClientOptions::from_config(config))
    }

    pub fn with_options(options: SheetsClientOptions) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .context("failed building Sheets HTTP client")?;

        let issuer = TokenIssuer::new(
            http.clone(),
            options.endpoints.token_url.clone(),
            options.clock.clone(),
        );

        tracing::info!(
            authenticated = options.credentials.is_some(),
            cache_ttl_ms = options.cache_ttl_ms,
            "Initialized Google Sheets client"
        );

        Ok(Self {
            http,
            spreadsheet_id: options.spreadsheet_id,
            credentials: options.credentials,
            endpoints: options.endpoints,
            issuer,
            cache: SheetCache::new(options.cache_ttl_ms, options.clock.clone()),
            clock: options.clock,
        })
    }

    /// Whether an authenticated path is available.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn cache(&self) -> &SheetCache {
        &self.cache
    }

    /// Current time from the injected clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Drop cached rows for one sheet, or for all sheets.
    pub fn clear_cache(&self, sheet: Option<&str>) {
        self.cache.clear(sheet);
    }

    // ─── Reads ───────────────────────────────────────────────────────────────

    /// Fetch all rows of `sheet`. Never fails; empty rows on total failure.
    pub async fn fetch_sheet(&self, sheet: &str, force_refresh: bool) -> SheetData {
        self.fetch_sheet_outcome(sheet, force_refresh).await.data
    }

    /// Fetch all rows of `sheet`, reporting which path produced them.
    ///
    /// Order: fresh cache entry, authenticated API (when credentials are
    /// loaded), public export. Successful network reads refresh the cache.
    pub async fn fetch_sheet_outcome(&self, sheet: &str, force_refresh: bool) -> SheetFetch {
        if !force_refresh {
            if let Some(data) = self.cache.get(sheet) {
                tracing::debug!(
                    sheet,
                    remaining_mins = self
                        .cache
                        .remaining(sheet)
                        .map(|d| d.num_minutes())
                        .unwrap_or(0),
                    "Using cached sheet data"
                );
                return SheetFetch {
                    data,
                    source: SheetSource::Cache,
                };
            }
        }

        if self.spreadsheet_id.is_empty() {
            return unavailable(sheet, SheetsError::MissingSpreadsheetId);
        }

        tracing::info!(sheet, "Fetching fresh sheet data");

        if let Some(credentials) = &self.credentials {
            match self.fetch_authenticated(sheet, credentials).await {
                Ok(data) => {
                    tracing::info!(sheet, rows = data.len(), "Fetched sheet via API");
                    self.cache.insert(sheet, data.clone());
                    return SheetFetch {
                        data,
                        source: SheetSource::Authenticated,
                    };
                }
                Err(e) => {
                    tracing::warn!(
                        sheet,
                        error = %e,
                        "Authenticated fetch failed, falling back to public access"
                    );
                }
            }
        }

        match self.fetch_public(sheet).await {
            Ok(data) => {
                tracing::info!(sheet, rows = data.len(), "Fetched sheet via public export");
                self.cache.insert(sheet, data.clone());
                SheetFetch {
                    data,
                    source: SheetSource::Public,
                }
            }
            Err(e) => unavailable(sheet, e),
        }
    }

    async fn fetch_authenticated(
        &self,
        sheet: &str,
        credentials: &ServiceAccountCredentials,
    ) -> Result<SheetData, SheetsError> {
        let token = self
            .issuer
            .get_access_token(credentials, SCOPE_SHEETS_READONLY)
            .await?;

        let response = self
            .http
            .get(self.values_url(sheet))
            .bearer_auth(&token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SheetsError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Fetch(format!("HTTP {status}: {body}")));
        }

        let range: ValueRange = response
            .json()
            .await
            .map_err(|e| SheetsError::Parse(e.to_string()))?;

        let values = range
            .values
            .unwrap_or_default()
            .iter()
            .map(|row| row.iter().map(cell_text).collect::<Row>())
            .collect();

        Ok(SheetData::new(values))
    }

    async fn fetch_public(&self, sheet: &str) -> Result<SheetData, SheetsError> {
        let url = format!(
            "{}/spreadsheets/d/{}/gviz/tq",
            self.endpoints.public_base,
            urlencoding::encode(&self.spreadsheet_id)
        );

        tracing::debug!(sheet, url = %url, "Trying public access for sheet");

        let response = self
            .http
            .get(&url)
            .query(&[("tqx", "out:json"), ("sheet", sheet)])
            .send()
            .await
            .map_err(|e| SheetsError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SheetsError::Fetch(format!(
                "public export returned status {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SheetsError::Fetch(e.to_string()))?;

        parse_gviz_response(&body)
    }

    // ─── Writes ──────────────────────────────────────────────────────────────

    /// Append one row to `sheet`. Returns `false` on any failure.
    pub async fn append_row(&self, sheet: &str, cells: Vec<String>) -> bool {
        match self.try_append_row(sheet, cells).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(sheet, error = %e, "Failed to append row");
                false
            }
        }
    }

    /// Append one row to `sheet`, invalidating its cache entry on success.
    pub async fn try_append_row(&self, sheet: &str, cells: Vec<String>) -> Result<(), SheetsError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(SheetsError::MissingCredentials)?;

        if self.spreadsheet_id.is_empty() {
            return Err(SheetsError::MissingSpreadsheetId);
        }

        let token = self
            .issuer
            .get_access_token(credentials, SCOPE_SHEETS_READWRITE)
            .await?;

        let body = serde_json::json!({ "values": [cells] });

        let response = self
            .http
            .post(format!("{}:append", self.values_url(sheet)))
            .bearer_auth(&token)
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&body)
            .send()
            .await
            .map_err(|e| SheetsError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Append { status, body });
        }

        self.cache.clear(Some(sheet));
        tracing::info!(sheet, "Appended row");
        Ok(())
    }

    fn values_url(&self, sheet: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.endpoints.api_base,
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(sheet)
        )
    }
}

fn unavailable(sheet: &str, error: SheetsError) -> SheetFetch {
    tracing::error!(sheet, error = %error, "Sheet unavailable, returning no rows");
    SheetFetch {
        data: SheetData::default(),
        source: SheetSource::Unavailable {
            reason: error.to_string(),
        },
    }
}
