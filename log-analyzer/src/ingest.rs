use clap::ValueEnum;
use derive_more::{Display, Error};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

use crate::{
    analytics::AggregateStats,
    parser::{LineLayout, ParseError},
};

/// What to do with a line that has enough fields but one of them does not parse.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MalformedPolicy {
    /// Count the line as malformed and keep going.
    #[default]
    Skip,
    /// Stop the run and report the offending line.
    Abort,
}

#[derive(Debug, Display, Error)]
pub enum AnalyzeError {
    #[display("log file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[display("cannot open log file {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("error reading log file at line {line}: {source}")]
    Read { line: usize, source: io::Error },
    #[display("malformed entry at line {line}: {source}")]
    Malformed { line: usize, source: ParseError },
}

pub fn analyze_file<L: LineLayout + ?Sized>(
    path: &Path,
    layout: &L,
    policy: MalformedPolicy,
) -> Result<AggregateStats, AnalyzeError> {
    if !path.exists() {
        return Err(AnalyzeError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| AnalyzeError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), ?policy, "analyzing access log");
    analyze(BufReader::new(file), layout, policy)
}

pub fn analyze<R: BufRead, L: LineLayout + ?Sized>(
    reader: R,
    layout: &L,
    policy: MalformedPolicy,
) -> Result<AggregateStats, AnalyzeError> {
    let mut stats = AggregateStats::default();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| AnalyzeError::Read {
            line: line_no,
            source,
        })?;
        match layout.parse(&line) {
            Ok(record) => stats.record(record),
            Err(err) if err.is_unparseable() => stats.record_skipped(),
            Err(err) => match policy {
                MalformedPolicy::Skip => {
                    warn!(line = line_no, error = %err, "skipping malformed entry");
                    stats.record_malformed();
                }
                MalformedPolicy::Abort => {
                    return Err(AnalyzeError::Malformed {
                        line: line_no,
                        source: err,
                    });
                }
            },
        }
    }
    debug!(
        requests = stats.total_requests(),
        skipped = stats.skipped_lines(),
        malformed = stats.malformed_lines(),
        "finished reading log"
    );
    Ok(stats)
}
