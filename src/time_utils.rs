// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time: an injectable clock and timestamp formatting.

use chrono::{DateTime, FixedOffset, Utc};
use std::sync::RwLock;

/// Offset used when stamping form submissions (UTC-3).
const SUBMISSION_UTC_OFFSET_SECS: i32 = -3 * 60 * 60;

/// Source of the current time.
///
/// The sheets cache and form timestamps read time through this trait so
/// tests can drive TTL expiry without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock for tests.
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.write().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.write().unwrap_or_else(|e| e.into_inner()) = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(|e| e.into_inner())
    }
}

/// Format a timestamp as `DD/MM/YYYY-HH:MM` (24h) in UTC-3.
///
/// This is the format written into the MESSAGES and SUBSCRIBERS sheets.
pub fn format_submission_timestamp(date: DateTime<Utc>) -> String {
    const FORMAT: &str = "%d/%m/%Y-%H:%M";

    match FixedOffset::east_opt(SUBMISSION_UTC_OFFSET_SECS) {
        Some(offset) => date.with_timezone(&offset).format(FORMAT).to_string(),
        None => date.format(FORMAT).to_string(),
    }
}
