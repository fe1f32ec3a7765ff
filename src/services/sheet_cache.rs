// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory freshness cache for sheet contents.
//!
//! One entry per sheet name (case-sensitive). An entry is served while
//! `now - fetched_at < ttl`; it is replaced by successful reads and dropped by
//! successful appends or explicit clears. Nothing is persisted.

use crate::models::SheetData;
use crate::time_utils::Clock;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;

/// Cached sheet contents with fetch time.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: SheetData,
    pub fetched_at: DateTime<Utc>,
}

pub struct SheetCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SheetCache {
    pub fn new(ttl_ms: u64, clock: Arc<dyn Clock>) -> Self {
        let ttl = Duration::milliseconds(i64::try_from(ttl_ms).unwrap_or(i64::MAX));
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// True iff an entry exists and is younger than the TTL.
    pub fn is_valid(&self, sheet: &str) -> bool {
        self.entries
            .get(sheet)
            .is_some_and(|entry| self.is_fresh(&entry))
    }

    /// Return the cached rows if still fresh.
    pub fn get(&self, sheet: &str) -> Option<SheetData> {
        self.entries
            .get(sheet)
            .filter(|entry| self.is_fresh(entry))
            .map(|entry| entry.data.clone())
    }

    /// Time left before the entry for `sheet` goes stale.
    pub fn remaining(&self, sheet: &str) -> Option<Duration> {
        let entry = self.entries.get(sheet)?;
        let left = self.ttl - (self.clock.now() - entry.fetched_at);
        (left > Duration::zero()).then_some(left)
    }

    /// Store rows for `sheet`, stamped with the current time.
    pub fn insert(&self, sheet: &str, data: SheetData) {
        self.entries.insert(
            sheet.to_string(),
            CacheEntry {
                data,
                fetched_at: self.clock.now(),
            },
        );
    }

    /// Remove one entry, or every entry when `sheet` is `None`.
    pub fn clear(&self, sheet: Option<&str>) {
        match sheet {
            Some(name) => {
                self.entries.remove(name);
                tracing::debug!(sheet = name, "Cache cleared for sheet");
            }
            None => {
                self.entries.clear();
                tracing::debug!("All cached sheet data cleared");
            }
        }
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        self.clock.now() - entry.fetched_at < self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_utils::ManualClock;
    use chrono::TimeZone;

    fn cache_with_clock(ttl_ms: u64) -> (SheetCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        ));
        (SheetCache::new(ttl_ms, clock.clone()), clock)
    }

    fn rows(cells: &[&str]) -> SheetData {
        SheetData::new(vec![cells.iter().map(|c| c.to_string()).collect()])
    }

    #[test]
    fn test_entry_valid_until_ttl_elapses() {
        let (cache, clock) = cache_with_clock(1_000);
        cache.insert("main", rows(&["a"]));

        assert!(cache.is_valid("main"));
        clock.advance(Duration::milliseconds(999));
        assert_eq!(cache.get("main"), Some(rows(&["a"])));

        clock.advance(Duration::milliseconds(1));
        assert!(!cache.is_valid("main"));
        assert_eq!(cache.get("main"), None);
        assert_eq!(cache.remaining("main"), None);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let (cache, _) = cache_with_clock(1_000);
        cache.insert("Main", rows(&["a"]));
        assert!(cache.is_valid("Main"));
        assert!(!cache.is_valid("main"));
    }

    #[test]
    fn test_clear_one_and_all() {
        let (cache, _) = cache_with_clock(60_000);
        cache.insert("main", rows(&["a"]));
        cache.insert("experiences", rows(&["b"]));

        cache.clear(Some("main"));
        assert!(!cache.is_valid("main"));
        assert!(cache.is_valid("experiences"));

        cache.clear(None);
        assert!(!cache.is_valid("experiences"));
    }

    #[test]
    fn test_remaining_counts_down() {
        let (cache, clock) = cache_with_clock(60_000);
        cache.insert("main", rows(&["a"]));
        clock.advance(Duration::seconds(20));
        assert_eq!(cache.remaining("main"), Some(Duration::seconds(40)));
    }
}
