use chrono::{DateTime, Duration, FixedOffset};
use rand::Rng;
use std::io::{self, Write};

use crate::generator::{generate_access_line, generate_short_line};

const MAX_STEP_SECS: i64 = 5;

/// Writes `count` lines with non-decreasing timestamps starting at `start`.
pub fn write_log_stream<W: Write, R: Rng + ?Sized>(
    out: &mut W,
    rng: &mut R,
    count: usize,
    malformed_ratio: f64,
    start: DateTime<FixedOffset>,
) -> io::Result<()> {
    let mut at = start;
    for _ in 0..count {
        let line = if rng.random_bool(malformed_ratio) {
            generate_short_line(rng, at)
        } else {
            generate_access_line(rng, at)
        };
        writeln!(out, "{line}")?;
        at += Duration::seconds(rng.random_range(0..=MAX_STEP_SECS));
    }
    out.flush()
}
