// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Service-account credential loading.
//!
//! Credentials arrive as a base64-encoded service-account JSON key. A missing
//! or malformed value is not an error for the caller: the sheets client simply
//! runs without an authenticated path.

use crate::config::ConfigError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use std::collections::HashMap;

/// Google service-account key fields used for signing token assertions.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountCredentials {
    #[serde(default)]
    pub private_key: String,
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub private_key_id: String,
    /// Remaining key fields (project_id, token_uri, ...), kept verbatim.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl std::fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl ServiceAccountCredentials {
    /// Decode a base64-encoded service-account JSON key.
    pub fn from_base64(encoded: &str) -> Result<Self, ConfigError> {
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| ConfigError::Credentials(format!("base64 decode failed: {e}")))?;
        let json = String::from_utf8(bytes)
            .map_err(|e| ConfigError::Credentials(format!("not valid UTF-8: {e}")))?;
        serde_json::from_str(&json)
            .map_err(|e| ConfigError::Credentials(format!("invalid JSON: {e}")))
    }
}

/// Load credentials from the configured blob.
///
/// Returns `None` when the value is absent or cannot be decoded.
pub fn load_credentials(encoded: Option<&str>) -> Option<ServiceAccountCredentials> {
    let encoded = encoded?;

    match ServiceAccountCredentials::from_base64(encoded) {
        Ok(credentials) => {
            tracing::info!(
                client_email = %credentials.client_email,
                "Decoded Google service-account credentials"
            );
            Some(credentials)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to decode Google credentials");
            None
        }
    }
}
