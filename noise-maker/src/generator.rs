use chrono::{DateTime, FixedOffset};
use rand::{Rng, seq::IndexedRandom};

const METHODS: [(&str, u8); 4] = [("GET", 6), ("POST", 2), ("PUT", 1), ("DELETE", 1)];
const PATHS: [(&str, u8); 6] = [
    ("/", 10),
    ("/login", 10),
    ("/api", 50),
    ("/admin", 5),
    ("/splash", 20),
    ("/gallery", 10),
];
const STATUS: [(u16, u8); 6] = [
    (200, 50),
    (201, 10),
    (400, 10),
    (401, 20),
    (404, 50),
    (500, 5),
];
const AGENTS: [(&str, u8); 4] = [
    ("Mozilla/5.0", 30),
    ("curl/8.4.0", 5),
    ("Wget/1.21.4", 2),
    ("Googlebot/2.1", 3),
];

fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, table: &'a [(T, u8)]) -> &'a T {
    // Tables are non-empty constants with positive weights.
    &table.choose_weighted(rng, |(_, w)| *w).unwrap().0
}

/// One entry in the layout log-analyzer reads: referrer and agent sit
/// between the request and the status/bytes pair, giving 12 fields.
pub fn generate_access_line<R: Rng + ?Sized>(rng: &mut R, at: DateTime<FixedOffset>) -> String {
    let ip = format!(
        "192.168.{}.{}",
        rng.random_range(0..256),
        rng.random_range(0..256)
    );
    let timestamp = at.format("%d/%b/%Y:%H:%M:%S %z");
    let method = pick(rng, &METHODS);
    let path = pick(rng, &PATHS);
    let agent = pick(rng, &AGENTS);
    let status = pick(rng, &STATUS);
    let size = rng.random_range(100..2000);

    format!("{ip} - - [{timestamp}] \"{method} {path} HTTP/1.1\" \"-\" \"{agent}\" {status} {size}")
}

/// A truncated entry with too few fields to be counted.
pub fn generate_short_line<R: Rng + ?Sized>(rng: &mut R, at: DateTime<FixedOffset>) -> String {
    let timestamp = at.format("%d/%b/%Y:%H:%M:%S %z");
    let status = pick(rng, &STATUS);
    let host = rng.random_range(0..256);
    format!("192.168.0.{host} - - [{timestamp}] \"-\" {status} 0")
}
