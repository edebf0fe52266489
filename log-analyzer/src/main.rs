mod analytics;
mod ingest;
mod invariants;
mod models;
mod parser;
mod report;

use clap::{CommandFactory, Parser};
use ingest::{MalformedPolicy, analyze_file};
use parser::FixedFieldLayout;
use report::ReportFormat;
use std::{
    io::{self, IsTerminal},
    path::PathBuf,
    process::ExitCode,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Summarise a web-server access log", long_about = None)]
struct Args {
    /// Access log to analyze
    log_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    format: ReportFormat,

    /// How to treat lines whose timestamp, status or byte count does not parse
    #[arg(long, value_enum, default_value_t = MalformedPolicy::Skip)]
    on_malformed: MalformedPolicy,
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let Some(path) = args.log_file else {
        println!("{}", Args::command().render_usage());
        return ExitCode::SUCCESS;
    };

    let stats = match analyze_file(&path, &FixedFieldLayout::default(), args.on_malformed) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = report::render(&stats, args.format, &mut io::stdout().lock())
        && e.kind() != io::ErrorKind::BrokenPipe
    {
        eprintln!("Error writing report: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}
