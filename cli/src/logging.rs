//! Minimal stderr logger for the `log` facade

use std::env;
use std::io::{self, Write};

use log::{LevelFilter, Log, Metadata, Record};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:<5} {}] {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Install the logger. `--log-level` wins over `RUST_LOG`; the default is `warn`.
pub fn init(cli_level: Option<LevelFilter>) {
    let level = cli_level
        .or_else(|| env::var("RUST_LOG").ok().and_then(|raw| parse_level(&raw)))
        .unwrap_or(LevelFilter::Warn);

    // Fails only when a logger is already installed; the level still applies.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Accepts a bare level (`debug`); module filters are not supported.
pub fn parse_level(raw: &str) -> Option<LevelFilter> {
    raw.trim().parse().ok()
}
