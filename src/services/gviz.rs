// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Parser for the public visualization-query export.
//!
//! The endpoint answers with JSONP-style framing such as
//! `/*O_o*/ google.visualization.Query.setResponse({...});`. The payload is
//! everything from the first `{` to the last `}`.

use crate::models::sheet::{cell_text, Row};
use crate::models::SheetData;
use crate::services::sheets::SheetsError;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct GvizResponse {
    table: Option<GvizTable>,
}

#[derive(Debug, Deserialize)]
struct GvizTable {
    cols: Option<Vec<GvizColumn>>,
    rows: Option<Vec<GvizRow>>,
}

#[derive(Debug, Deserialize)]
struct GvizColumn {
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GvizRow {
    #[serde(default)]
    c: Vec<Option<GvizCell>>,
}

#[derive(Debug, Deserialize)]
struct GvizCell {
    #[serde(default)]
    v: Value,
}

/// Extract the embedded JSON object from a wrapped response body.
fn extract_payload(body: &str) -> Result<&str, SheetsError> {
    let start = body.find('{');
    let end = body.rfind('}');

    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(&body[start..=end]),
        _ => Err(SheetsError::Parse(
            "Invalid response format from Google Sheets".to_string(),
        )),
    }
}

/// Parse a wrapped gviz response into rows, prepending a header row built
/// from column labels when the table declares columns.
pub fn parse_gviz_response(body: &str) -> Result<SheetData, SheetsError> {
    let payload = extract_payload(body)?;

    let response: GvizResponse = serde_json::from_str(payload)
        .map_err(|e| SheetsError::Parse(format!("invalid gviz JSON: {e}")))?;

    let table = response
        .table
        .ok_or_else(|| SheetsError::Parse("No table data found in response".to_string()))?;
    let rows = table
        .rows
        .ok_or_else(|| SheetsError::Parse("No table data found in response".to_string()))?;

    let mut values: Vec<Row> = Vec::with_capacity(rows.len() + 1);

    if let Some(cols) = table.cols {
        values.push(
            cols.into_iter()
                .map(|col| col.label.unwrap_or_default())
                .collect(),
        );
    }

    values.extend(rows.into_iter().map(|row| {
        row.c
            .iter()
            .map(|cell| cell.as_ref().map(|c| cell_text(&c.v)).unwrap_or_default())
            .collect::<Row>()
    }));

    Ok(SheetData::new(values))
}
