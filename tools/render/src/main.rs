//! herald-render
//!
//! Reads newline-delimited envelope records (commands, domain events, domain
//! errors) and prints one human-readable line per record.
//!
//! Rendered lines go to stdout; logs go to stderr.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{Context, Result};
use clap::Parser;
use herald_domain::DomainError;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod record;

use config::{Cli, Config};

/// Tag given to records that fail to parse.
const INVALID_RECORD: &str = "InvalidRecord";

/// Counts reported once input is exhausted.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    rendered: usize,
    skipped: usize,
}

fn main() -> Result<()> {
    let config = Config::from_cli(Cli::parse())?;

    // Prefer RUST_LOG, fall back to the configured level
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!(
        input = ?config.input,
        kind = ?config.kind,
        tag_width = config.render.tag_width,
        strict = config.strict,
        "Configuration loaded"
    );

    let reader: Box<dyn BufRead> = match &config.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let summary = run(&config, reader, stdout.lock())?;

    info!(
        rendered = summary.rendered,
        skipped = summary.skipped,
        "Input exhausted"
    );
    Ok(())
}

fn run(config: &Config, reader: impl BufRead, mut out: impl Write) -> Result<Summary> {
    let mut summary = Summary::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }

        match record::render_line(&line, config.kind, &config.render) {
            Ok(rendered) => {
                writeln!(out, "{rendered}").context("failed to write output")?;
                summary.rendered += 1;
            }
            Err(err) => {
                let failure = DomainError::from_caught(INVALID_RECORD, err);
                if config.strict {
                    return Err(anyhow::Error::new(failure)
                        .context(format!("line {line_no} is not a valid record")));
                }
                warn!(line = line_no, error = failure.message(), "Skipping record");
                summary.skipped += 1;
            }
        }
    }

    out.flush().context("failed to flush output")?;
    Ok(summary)
}
