use chrono::{DateTime, FixedOffset};
use std::{cmp::Reverse, collections::HashMap};

use crate::{invariants::Resource, models::LogRecord};

/// Counters accumulated over a single pass of the log.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AggregateStats {
    total_requests: u64,
    total_bytes: i64,
    resources: HashMap<Resource, u64>,
    statuses: HashMap<i32, u64>,
    skipped_lines: u64,
    malformed_lines: u64,
    first_seen: Option<DateTime<FixedOffset>>,
    last_seen: Option<DateTime<FixedOffset>>,
}

impl AggregateStats {
    pub fn record(&mut self, record: LogRecord) {
        let LogRecord {
            timestamp,
            resource,
            status,
            bytes,
        } = record;

        self.total_requests += 1;
        self.total_bytes = self.total_bytes.saturating_add(bytes);
        *self.resources.entry(resource).or_default() += 1;
        *self.statuses.entry(status).or_default() += 1;

        if self.first_seen.is_none_or(|first| timestamp < first) {
            self.first_seen = Some(timestamp);
        }
        if self.last_seen.is_none_or(|last| timestamp > last) {
            self.last_seen = Some(timestamp);
        }
    }
    pub fn record_skipped(&mut self) {
        self.skipped_lines += 1;
    }
    pub fn record_malformed(&mut self) {
        self.malformed_lines += 1;
    }

    pub fn total_requests(&self) -> u64 {
        self.total_requests
    }
    pub fn total_bytes(&self) -> i64 {
        self.total_bytes
    }
    pub fn skipped_lines(&self) -> u64 {
        self.skipped_lines
    }
    pub fn malformed_lines(&self) -> u64 {
        self.malformed_lines
    }
    pub fn first_seen(&self) -> Option<DateTime<FixedOffset>> {
        self.first_seen
    }
    pub fn last_seen(&self) -> Option<DateTime<FixedOffset>> {
        self.last_seen
    }

    /// Mean bytes per request, truncated. Zero when nothing was recorded.
    pub fn average_response_size(&self) -> i64 {
        i64::try_from(self.total_requests)
            .ok()
            .and_then(|requests| self.total_bytes.checked_div(requests))
            .unwrap_or_default()
    }

    /// Most requested first; ties broken by resource.
    pub fn resource_frequency(&self) -> Vec<(&Resource, u64)> {
        let mut entries: Vec<_> = self.resources.iter().map(|(k, v)| (k, *v)).collect();
        entries.sort_unstable_by_key(|(resource, count)| (Reverse(*count), *resource));
        entries
    }
    pub fn status_frequency(&self) -> Vec<(i32, u64)> {
        let mut entries: Vec<_> = self.statuses.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_unstable_by_key(|(status, _)| *status);
        entries
    }
}

#[cfg(test)]
impl AggregateStats {
    pub fn resource_count(&self, resource: &str) -> u64 {
        self.resources
            .get(&Resource::from(resource))
            .copied()
            .unwrap_or_default()
    }
    pub fn status_count(&self, status: i32) -> u64 {
        self.statuses.get(&status).copied().unwrap_or_default()
    }
}
