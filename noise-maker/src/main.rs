mod args;
mod generator;
mod stream;

use args::CliArgs;
use chrono::Local;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use std::{
    fs::File,
    io::{self, BufWriter},
};
use stream::write_log_stream;

fn main() -> io::Result<()> {
    let args = CliArgs::parse();
    let mut rng = match args.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };
    let start = args.start().unwrap_or_else(|| Local::now().fixed_offset());

    match args.output() {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_log_stream(&mut out, &mut rng, *args.count(), *args.malformed_ratio(), start)?;
            eprintln!("Wrote {} log lines to {}", args.count(), path.display());
        }
        None => {
            let mut out = BufWriter::new(io::stdout().lock());
            write_log_stream(&mut out, &mut rng, *args.count(), *args.malformed_ratio(), start)?;
        }
    }
    Ok(())
}
