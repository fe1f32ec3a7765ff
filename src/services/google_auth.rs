// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google service-account token issuance.
//!
//! Builds an RS256-signed JWT assertion from the service-account key and
//! exchanges it at the OAuth token endpoint for a short-lived bearer token.
//! Tokens are not cached; every call performs a fresh exchange.

use crate::services::credentials::ServiceAccountCredentials;
use crate::time_utils::Clock;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Google OAuth token endpoint.
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Read-only scope used for sheet fetches.
pub const SCOPE_SHEETS_READONLY: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

/// Read-write scope used for row appends.
pub const SCOPE_SHEETS_READWRITE: &str = "https://www.googleapis.com/auth/spreadsheets";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Token issuance errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials: missing {0}")]
    MissingField(&'static str),

    #[error("Failed to sign assertion: {0}")]
    Signing(String),

    #[error("Token request failed: {0}")]
    Request(String),

    #[error("Failed to get access token: {status} - {body}")]
    Exchange {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Invalid token response: {0}")]
    InvalidResponse(String),
}

/// Claims of the signed assertion sent to the token endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Exchanges service-account assertions for bearer tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    http: reqwest::Client,
    token_url: String,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    pub fn new(http: reqwest::Client, token_url: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            http,
            token_url: token_url.into(),
            clock,
        }
    }

    /// Token endpoint this issuer exchanges assertions at (also the `aud` claim).
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Build the signed `header.payload.signature` assertion for `scope`.
    pub fn sign_assertion(
        &self,
        credentials: &ServiceAccountCredentials,
        scope: &str,
    ) -> Result<String, AuthError> {
        if credentials.private_key.is_empty() {
            return Err(AuthError::MissingField("private_key"));
        }
        if credentials.client_email.is_empty() {
            return Err(AuthError::MissingField("client_email"));
        }

        let now = self.clock.now().timestamp();
        let claims = AssertionClaims {
            iss: credentials.client_email.clone(),
            scope: scope.to_string(),
            aud: self.token_url.clone(),
            exp: now + ASSERTION_LIFETIME_SECS,
            iat: now,
        };

        let mut header = Header::new(Algorithm::RS256);
        if !credentials.private_key_id.is_empty() {
            header.kid = Some(credentials.private_key_id.clone());
        }

        // Keys pasted into env files often carry escaped newlines.
        let pem = credentials.private_key.replace("\\n", "\n");
        let key = EncodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        encode(&header, &claims, &key).map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Exchange a freshly signed assertion for an access token.
    pub async fn get_access_token(
        &self,
        credentials: &ServiceAccountCredentials,
        scope: &str,
    ) -> Result<String, AuthError> {
        let assertion = self.sign_assertion(credentials, scope)?;

        let response = self
            .http
            .post(&self.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)])
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Exchange { status, body });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::InvalidResponse("missing access_token".to_string()))
    }
}
