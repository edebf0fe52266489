use chrono::{DateTime, FixedOffset};

use crate::invariants::Resource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: DateTime<FixedOffset>,
    pub resource: Resource,
    pub status: i32,
    pub bytes: i64,
}
