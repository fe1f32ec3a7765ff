// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Generic row/column sheet contents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One sheet row: ordered string cells.
pub type Row = Vec<String>;

/// Full contents of a sheet. Row 0 is conventionally the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetData {
    #[serde(default)]
    pub values: Vec<Row>,
}

impl SheetData {
    pub fn new(values: Vec<Row>) -> Self {
        Self { values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of rows, header included.
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Read a cell by column position; missing columns read as blank.
pub fn cell(row: &[String], column: usize) -> &str {
    row.get(column).map(String::as_str).unwrap_or("")
}

/// Render a JSON cell value as sheet text. Null becomes blank.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
