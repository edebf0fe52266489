use std::num::ParseIntError;

use chrono::DateTime;
use derive_more::{Display, Error};

use crate::models::LogRecord;

// Timestamp format for log entries: [10/Oct/2023:13:55:36 -0700]
const TS_FORMAT: &str = "[%d/%b/%Y:%H:%M:%S %z]";

#[derive(Debug, Display, Error)]
pub enum ParseError {
    #[display("line has {found} fields, at least {required} are required")]
    TooFewFields { found: usize, required: usize },
    #[display("invalid timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },
    #[display("invalid status code {value:?}: {source}")]
    StatusCode { value: String, source: ParseIntError },
    #[display("invalid byte count {value:?}: {source}")]
    BytesSent { value: String, source: ParseIntError },
}

impl ParseError {
    /// True when the line is too short to be a log entry at all, as opposed
    /// to a well-shaped line carrying a bad field.
    pub fn is_unparseable(&self) -> bool {
        matches!(self, Self::TooFewFields { .. })
    }
}

/// Turns one raw log line into a [`LogRecord`].
pub trait LineLayout {
    fn parse(&self, line: &str) -> Result<LogRecord, ParseError>;
}

/// Positional layout: fields are separated by single spaces, the timestamp
/// spans two fields and status/bytes are always the last two fields.
#[derive(Debug, Clone, Copy)]
pub struct FixedFieldLayout {
    pub min_fields: usize,
    pub timestamp_at: usize,
    pub resource_at: usize,
}

impl Default for FixedFieldLayout {
    fn default() -> Self {
        Self {
            min_fields: 12,
            timestamp_at: 3,
            resource_at: 6,
        }
    }
}

impl LineLayout for FixedFieldLayout {
    fn parse(&self, line: &str) -> Result<LogRecord, ParseError> {
        let fields = split_fields(line);
        if fields.len() < self.min_fields {
            return Err(ParseError::TooFewFields {
                found: fields.len(),
                required: self.min_fields,
            });
        }

        let ts = format!(
            "{} {}",
            fields[self.timestamp_at],
            fields[self.timestamp_at + 1]
        );
        let timestamp = DateTime::parse_from_str(&ts, TS_FORMAT)
            .map_err(|source| ParseError::Timestamp { value: ts, source })?;

        let status_str = fields[fields.len() - 2];
        let status = status_str
            .parse()
            .map_err(|source| ParseError::StatusCode {
                value: status_str.into(),
                source,
            })?;

        let bytes_str = fields[fields.len() - 1];
        let bytes = bytes_str
            .parse()
            .map_err(|source| ParseError::BytesSent {
                value: bytes_str.into(),
                source,
            })?;

        Ok(LogRecord {
            timestamp,
            resource: fields[self.resource_at].into(),
            status,
            bytes,
        })
    }
}

/// Splits on every single space. Runs of spaces produce empty fields that
/// keep their position; trailing empty fields are dropped.
fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(' ').collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use asserting::prelude::*;
    use chrono::{FixedOffset, TimeZone};

    const LINE: &str = r#"127.0.0.1 - - [10/Oct/2023:13:55:36 -0700] "GET /index.html HTTP/1.1" "-" "curl/8.4.0" 200 1024"#;

    fn parse(line: &str) -> Result<LogRecord, ParseError> {
        FixedFieldLayout::default().parse(line)
    }

    #[test]
    fn parse_log_line_valid() {
        let record = parse(LINE).unwrap();
        assert_eq!(
            record,
            LogRecord {
                timestamp: FixedOffset::west_opt(7 * 3600)
                    .unwrap()
                    .with_ymd_and_hms(2023, 10, 10, 13, 55, 36)
                    .unwrap(),
                resource: "/index.html".into(),
                status: 200,
                bytes: 1024,
            }
        );
    }

    #[test]
    fn short_line_is_unparseable() {
        let line = r#"127.0.0.1 - - [10/Oct/2023:13:55:36 -0700] "GET /index.html HTTP/1.1" 200 1024"#;
        let err = parse(line).unwrap_err();
        assert_that!(err.is_unparseable()).is_true();
        assert!(matches!(
            err,
            ParseError::TooFewFields {
                found: 10,
                required: 12
            }
        ));
    }

    #[test]
    fn empty_line_is_unparseable() {
        assert_that!(parse("").unwrap_err().is_unparseable()).is_true();
    }

    #[test]
    fn repeated_spaces_count_as_fields() {
        // The doubled space shifts the resource one position to the right.
        let line = r#"127.0.0.1 - - [10/Oct/2023:13:55:36 -0700]  "GET /index.html HTTP/1.1" "-" 200 512"#;
        let record = parse(line).unwrap();
        assert_eq!(record.resource.to_string(), "\"GET");
        assert_eq!(record.bytes, 512);
    }

    #[test]
    fn trailing_spaces_are_ignored() {
        let line = format!("{LINE}   ");
        let record = parse(&line).unwrap();
        assert_eq!(record.status, 200);
        assert_eq!(record.bytes, 1024);
    }

    #[test]
    fn dash_bytes_are_malformed() {
        let line = LINE.replace(" 1024", " -");
        let err = parse(&line).unwrap_err();
        assert_that!(err.is_unparseable()).is_false();
        assert!(matches!(err, ParseError::BytesSent { value, .. } if value == "-"));
    }

    #[test]
    fn bad_timestamp_is_malformed() {
        let line = LINE.replace("10/Oct/2023", "10/Foo/2023");
        let err = parse(&line).unwrap_err();
        assert_that!(err.is_unparseable()).is_false();
        assert!(matches!(err, ParseError::Timestamp { .. }));
    }

    #[test]
    fn missing_brackets_are_malformed() {
        let line = LINE.replace('[', "");
        assert!(matches!(
            parse(&line).unwrap_err(),
            ParseError::Timestamp { .. }
        ));
    }

    #[test]
    fn non_numeric_status_is_malformed() {
        let line = LINE.replace(" 200 ", " OK ");
        assert!(matches!(
            parse(&line).unwrap_err(),
            ParseError::StatusCode { value, .. } if value == "OK"
        ));
    }

    #[test]
    fn negative_bytes_are_accepted() {
        let line = LINE.replace(" 1024", " -5");
        assert_that!(parse(&line).unwrap().bytes).is_equal_to(-5);
    }

    #[test]
    fn bytes_beyond_64_bits_are_malformed() {
        let line = LINE.replace(" 1024", " 9223372036854775808");
        assert!(matches!(
            parse(&line).unwrap_err(),
            ParseError::BytesSent { .. }
        ));
    }

    #[test]
    fn status_is_any_32_bit_integer() {
        let line = LINE.replace(" 200 ", " 70000 ");
        assert_that!(parse(&line).unwrap().status).is_equal_to(70000);
    }
}
