use chrono::{DateTime, FixedOffset};
use clap::Parser;
use derive_getters::Getters;
use std::path::PathBuf;

#[derive(Parser, Debug, Getters)]
#[command(name = "noise-maker")]
#[command(about = "Generate fake access logs for log-analyzer", long_about = None)]
pub struct CliArgs {
    #[arg(long, default_value_t = 1000)]
    count: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Timestamp of the first line (RFC 3339), defaults to now
    #[arg(long, value_parser = DateTime::parse_from_rfc3339)]
    start: Option<DateTime<FixedOffset>>,

    /// Fraction of lines that are too short to be log entries
    #[arg(long, default_value_t = 0.0, value_parser = parse_ratio)]
    malformed_ratio: f64,

    /// Write to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn parse_ratio(s: &str) -> Result<f64, String> {
    let ratio: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(format!("{ratio} is not between 0 and 1"))
    }
}
