// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test helpers: an in-process mock of the Google token, Sheets values
//! and gviz export endpoints, plus app/client builders wired to it.

use axum::{
    extract::{Form, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::TimeZone;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use portfolio_api::config::Config;
use portfolio_api::routes::create_router;
use portfolio_api::services::google_auth::AssertionClaims;
use portfolio_api::services::{
    BlogService, ServiceAccountCredentials, SheetsClient, SheetsClientOptions, SheetsEndpoints,
};
use portfolio_api::time_utils::ManualClock;
use portfolio_api::AppState;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const PRIVATE_KEY: &str = include_str!("../fixtures/service_account_key.pem");
pub const PUBLIC_KEY: &str = include_str!("../fixtures/service_account_key.pub.pem");
pub const MOCK_ACCESS_TOKEN: &str = "mock-access-token";
pub const SPREADSHEET_ID: &str = "test-spreadsheet";

/// Recorded traffic and programmable failures of the mock Google backend.
#[derive(Default)]
#[allow(dead_code)]
pub struct MockGoogle {
    pub token_requests: AtomicUsize,
    pub api_reads: AtomicUsize,
    pub public_reads: AtomicUsize,
    pub append_requests: AtomicUsize,
    /// (sheet, row) of every accepted append
    pub appended: Mutex<Vec<(String, Vec<String>)>>,
    /// Scopes requested in token assertions, in order
    pub scopes: Mutex<Vec<String>>,
    sheets: Mutex<HashMap<String, Vec<Vec<String>>>>,
    pub fail_token: AtomicBool,
    /// Non-zero forces this status on authenticated reads
    pub api_status: AtomicU16,
    /// Non-zero forces this status on public reads
    pub public_status: AtomicU16,
    /// Non-zero forces this status on appends
    pub append_status: AtomicU16,
    /// Raw body served by the public endpoint instead of the sheet contents
    pub public_body: Mutex<Option<String>>,
    token_url: Mutex<String>,
}

#[allow(dead_code)]
impl MockGoogle {
    pub fn set_sheet(&self, name: &str, rows: &[&[&str]]) {
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        self.sheets.lock().unwrap().insert(name.to_string(), rows);
    }

    pub fn tokens(&self) -> usize {
        self.token_requests.load(Ordering::SeqCst)
    }

    pub fn api(&self) -> usize {
        self.api_reads.load(Ordering::SeqCst)
    }

    pub fn public(&self) -> usize {
        self.public_reads.load(Ordering::SeqCst)
    }

    pub fn appends(&self) -> Vec<(String, Vec<String>)> {
        self.appended.lock().unwrap().clone()
    }

    fn rows(&self, name: &str) -> Option<Vec<Vec<String>>> {
        self.sheets.lock().unwrap().get(name).cloned()
    }

    fn forced(status: &AtomicU16) -> Option<StatusCode> {
        match status.load(Ordering::SeqCst) {
            0 => None,
            code => StatusCode::from_u16(code).ok(),
        }
    }
}

/// Start the mock backend on an ephemeral port.
#[allow(dead_code)]
pub async fn start_mock_google() -> (Arc<MockGoogle>, SheetsEndpoints) {
    let mock = Arc::new(MockGoogle::default());

    let app = Router::new()
        .route("/token", post(token))
        .route(
            "/v4/spreadsheets/{id}/values/{range}",
            get(read_values).post(append_values),
        )
        .route("/spreadsheets/d/{id}/gviz/tq", get(public_export))
        .with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });

    let endpoints = SheetsEndpoints {
        token_url: format!("{base}/token"),
        api_base: base.clone(),
        public_base: base,
    };
    *mock.token_url.lock().unwrap() = endpoints.token_url.clone();

    (mock, endpoints)
}

async fn token(
    State(mock): State<Arc<MockGoogle>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    mock.token_requests.fetch_add(1, Ordering::SeqCst);

    if form.get("grant_type").map(String::as_str)
        != Some("urn:ietf:params:oauth:grant-type:jwt-bearer")
    {
        return (StatusCode::BAD_REQUEST, "unsupported_grant_type").into_response();
    }

    let assertion = form.get("assertion").cloned().unwrap_or_default();
    let token_url = mock.token_url.lock().unwrap().clone();
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[token_url.as_str()]);
    validation.validate_exp = false;
    let key = DecodingKey::from_rsa_pem(PUBLIC_KEY.as_bytes()).unwrap();

    let claims = match decode::<AssertionClaims>(&assertion, &key, &validation) {
        Ok(data) => data.claims,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, format!("invalid_grant: {e}")).into_response()
        }
    };
    mock.scopes.lock().unwrap().push(claims.scope);

    if mock.fail_token.load(Ordering::SeqCst) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid_client", "error_description": "disabled"})),
        )
            .into_response();
    }

    Json(json!({
        "access_token": MOCK_ACCESS_TOKEN,
        "expires_in": 3599,
        "token_type": "Bearer"
    }))
    .into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(&format!("Bearer {MOCK_ACCESS_TOKEN}"))
}

async fn read_values(
    State(mock): State<Arc<MockGoogle>>,
    Path((_id, range)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    mock.api_reads.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if let Some(status) = MockGoogle::forced(&mock.api_status) {
        return (status, "forced failure").into_response();
    }

    match mock.rows(&range) {
        Some(rows) => Json(json!({"range": range, "majorDimension": "ROWS", "values": rows})),
        None => Json(json!({"range": range, "majorDimension": "ROWS"})),
    }
    .into_response()
}

#[derive(Deserialize)]
struct AppendBody {
    values: Vec<Vec<String>>,
}

async fn append_values(
    State(mock): State<Arc<MockGoogle>>,
    Path((_id, range)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<AppendBody>,
) -> Response {
    mock.append_requests.fetch_add(1, Ordering::SeqCst);

    let Some(sheet) = range.strip_suffix(":append") else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if query.get("valueInputOption").map(String::as_str) != Some("RAW") {
        return (StatusCode::BAD_REQUEST, "valueInputOption required").into_response();
    }
    if let Some(status) = MockGoogle::forced(&mock.append_status) {
        return (status, "quota exceeded").into_response();
    }

    let mut sheets = mock.sheets.lock().unwrap();
    let rows = sheets.entry(sheet.to_string()).or_default();
    for row in body.values {
        mock.appended
            .lock()
            .unwrap()
            .push((sheet.to_string(), row.clone()));
        rows.push(row);
    }

    Json(json!({"spreadsheetId": SPREADSHEET_ID, "updates": {"updatedRows": 1}})).into_response()
}

async fn public_export(
    State(mock): State<Arc<MockGoogle>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    mock.public_reads.fetch_add(1, Ordering::SeqCst);

    if let Some(status) = MockGoogle::forced(&mock.public_status) {
        return (status, "<html>error</html>").into_response();
    }
    if let Some(body) = mock.public_body.lock().unwrap().clone() {
        return body.into_response();
    }

    let sheet = query.get("sheet").cloned().unwrap_or_default();
    let rows = mock.rows(&sheet).unwrap_or_default();
    let mut rows = rows.into_iter();
    let cols: Vec<_> = rows
        .next()
        .unwrap_or_default()
        .into_iter()
        .map(|label| json!({"label": label, "type": "string"}))
        .collect();
    let data: Vec<_> = rows
        .map(|row| {
            json!({"c": row
                .into_iter()
                .map(|v| if v.is_empty() { json!(null) } else { json!({"v": v}) })
                .collect::<Vec<_>>()})
        })
        .collect();

    let payload = json!({"version": "0.6", "status": "ok", "table": {"cols": cols, "rows": data}});
    format!("/*O_o*/\ngoogle.visualization.Query.setResponse({payload});").into_response()
}

/// Service-account credentials matching the fixture key pair.
#[allow(dead_code)]
pub fn test_credentials() -> ServiceAccountCredentials {
    ServiceAccountCredentials {
        private_key: PRIVATE_KEY.to_string(),
        client_email: "portfolio@test-project.iam.gserviceaccount.com".to_string(),
        private_key_id: "test-key-id".to_string(),
        extra: Default::default(),
    }
}

/// Clock pinned to 2024-03-05 14:07 UTC.
#[allow(dead_code)]
pub fn test_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        chrono::Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap(),
    ))
}

/// Sheets client pointed at the mock backend.
#[allow(dead_code)]
pub fn test_sheets_client(
    endpoints: SheetsEndpoints,
    credentials: Option<ServiceAccountCredentials>,
    clock: Arc<ManualClock>,
) -> Arc<SheetsClient> {
    Arc::new(
        SheetsClient::with_options(SheetsClientOptions {
            spreadsheet_id: SPREADSHEET_ID.to_string(),
            credentials,
            endpoints,
            cache_ttl_ms: 3_600_000,
            clock,
        })
        .expect("Failed to build sheets client"),
    )
}

/// Create a test app around the given sheets client.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(sheets: Arc<SheetsClient>) -> (Router, Arc<AppState>) {
    let config = Config {
        blog_id: Some("blog_123".to_string()),
        ..Config::default()
    };
    let blog = BlogService::load_from_file("data/blog_posts.json")
        .expect("Failed to load blog posts - is data/ committed?");

    let state = Arc::new(AppState::new(config, sheets, blog));
    (create_router(state.clone()), state)
}

/// Endpoints on a loopback port with no listener, so every call fails to connect.
#[allow(dead_code)]
pub async fn closed_endpoints() -> SheetsEndpoints {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback port");
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    SheetsEndpoints {
        token_url: format!("{base}/token"),
        api_base: base.clone(),
        public_base: base,
    }
}
