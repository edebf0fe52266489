use chrono::{DateTime, FixedOffset};
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};

use crate::analytics::AggregateStats;

const TS_DISPLAY: &str = "%d/%b/%Y:%H:%M:%S %z";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total_requests: u64,
    pub total_bytes: i64,
    pub average_response_size: i64,
    pub first_request: Option<DateTime<FixedOffset>>,
    pub last_request: Option<DateTime<FixedOffset>>,
    pub resources: Vec<ResourceRow>,
    pub status_codes: Vec<StatusRow>,
    pub skipped_lines: u64,
    pub malformed_lines: u64,
}

#[derive(Debug, Serialize)]
pub struct ResourceRow {
    pub resource: String,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct StatusRow {
    pub code: i32,
    pub count: u64,
}

impl From<&AggregateStats> for Summary {
    fn from(stats: &AggregateStats) -> Self {
        Self {
            total_requests: stats.total_requests(),
            total_bytes: stats.total_bytes(),
            average_response_size: stats.average_response_size(),
            first_request: stats.first_seen(),
            last_request: stats.last_seen(),
            resources: stats
                .resource_frequency()
                .into_iter()
                .map(|(resource, count)| ResourceRow {
                    resource: resource.to_string(),
                    count,
                })
                .collect(),
            status_codes: stats
                .status_frequency()
                .into_iter()
                .map(|(code, count)| StatusRow { code, count })
                .collect(),
            skipped_lines: stats.skipped_lines(),
            malformed_lines: stats.malformed_lines(),
        }
    }
}

pub fn render<W: Write>(
    stats: &AggregateStats,
    format: ReportFormat,
    out: &mut W,
) -> io::Result<()> {
    let summary = Summary::from(stats);
    match format {
        ReportFormat::Table => render_table(&summary, out),
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &summary)?;
            writeln!(out)
        }
    }?;
    out.flush()
}

fn render_table<W: Write>(summary: &Summary, out: &mut W) -> io::Result<()> {
    writeln!(out, "# Overview")?;
    writeln!(out)?;
    writeln!(out, "| {:<22} | {:<13} |", "Metric", "Value")?;
    writeln!(out, "|{:-<24}|{:-<15}|", "", "")?;
    writeln!(out, "| {:<22} | {:<13} |", "Total requests", summary.total_requests)?;
    writeln!(
        out,
        "| {:<22} | {:<13} |",
        "Average response size",
        format!("{}b", summary.average_response_size)
    )?;
    if let (Some(first), Some(last)) = (summary.first_request, summary.last_request) {
        writeln!(out, "| {:<22} | {} |", "First request", first.format(TS_DISPLAY))?;
        writeln!(out, "| {:<22} | {} |", "Last request", last.format(TS_DISPLAY))?;
    }
    writeln!(out)?;

    writeln!(out, "# Requested resources")?;
    writeln!(out)?;
    writeln!(out, "| {:<22} | {:<13} |", "Resource", "Count")?;
    writeln!(out, "|{:-<24}|{:-<15}|", "", "")?;
    for row in &summary.resources {
        writeln!(
            out,
            "| {:<22} | {:<13} |",
            format!("\"{}\"", row.resource),
            row.count
        )?;
    }
    writeln!(out)?;

    writeln!(out, "# Response codes")?;
    writeln!(out)?;
    writeln!(out, "| {:<6} | {:<13} | {:<13} |", "Code", "Name", "Count")?;
    writeln!(out, "|{:-<8}|{:-<15}|{:-<15}|", "", "", "")?;
    for row in &summary.status_codes {
        writeln!(out, "| {:<6} | {:<13} | {:<13} |", row.code, "...", row.count)?;
    }
    Ok(())
}
