// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lead capture: contact messages and newsletter subscribers.
//!
//! Both forms append a single row stamped with the submission time.

use crate::services::sheets::{sheet_names, SheetsClient};
use crate::time_utils::format_submission_timestamp;
use std::sync::Arc;

#[derive(Clone)]
pub struct LeadService {
    sheets: Arc<SheetsClient>,
}

impl LeadService {
    pub fn new(sheets: Arc<SheetsClient>) -> Self {
        Self { sheets }
    }

    /// Append `[name, email, message, timestamp]` to the MESSAGES sheet.
    pub async fn add_contact_message(&self, name: &str, email: &str, message: &str) -> bool {
        let row = vec![
            name.to_string(),
            email.to_string(),
            message.to_string(),
            self.timestamp(),
        ];
        self.sheets.append_row(sheet_names::MESSAGES, row).await
    }

    /// Append `[email, timestamp]` to the SUBSCRIBERS sheet.
    pub async fn add_subscriber(&self, email: &str) -> bool {
        let row = vec![email.to_string(), self.timestamp()];
        self.sheets.append_row(sheet_names::SUBSCRIBERS, row).await
    }

    fn timestamp(&self) -> String {
        format_submission_timestamp(self.sheets.now())
    }
}
