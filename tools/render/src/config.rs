//! herald-render configuration.
//!
//! Every flag can also be set through a `HERALD_*` environment variable.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use herald_domain::render::{DEFAULT_TAG_WIDTH, UNSERIALIZABLE_PLACEHOLDER};
use herald_domain::RenderOptions;

/// Widest tag column accepted.
const MAX_TAG_WIDTH: usize = 64;

/// Which envelope a record holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    /// Detect from the record's fields.
    Auto,
    Command,
    Event,
    Error,
}

/// Render newline-delimited envelope records as log lines.
#[derive(Debug, Parser)]
#[command(name = "herald-render", version)]
pub struct Cli {
    /// Read records from this file instead of stdin.
    #[arg(long, short, env = "HERALD_INPUT")]
    pub input: Option<PathBuf>,

    /// Envelope kind of every record.
    #[arg(long, value_enum, default_value_t = RecordKind::Auto, env = "HERALD_KIND")]
    pub kind: RecordKind,

    /// Width of the tag column.
    #[arg(long, default_value_t = DEFAULT_TAG_WIDTH, env = "HERALD_TAG_WIDTH")]
    pub tag_width: usize,

    /// Text shown for payloads that cannot be serialized.
    #[arg(long, default_value = UNSERIALIZABLE_PLACEHOLDER, env = "HERALD_PLACEHOLDER")]
    pub placeholder: String,

    /// Stop at the first malformed record.
    #[arg(long, env = "HERALD_STRICT")]
    pub strict: bool,

    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, default_value = "info", env = "HERALD_LOG_LEVEL")]
    pub log_level: String,
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: Option<PathBuf>,
    pub kind: RecordKind,
    pub render: RenderOptions,
    pub strict: bool,
    pub log_level: String,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        if cli.tag_width == 0 || cli.tag_width > MAX_TAG_WIDTH {
            bail!(
                "--tag-width must be between 1 and {MAX_TAG_WIDTH}, got {}",
                cli.tag_width
            );
        }

        let render = RenderOptions::default()
            .with_tag_width(cli.tag_width)
            .with_placeholder(cli.placeholder);

        Ok(Self {
            input: cli.input,
            kind: cli.kind,
            render,
            strict: cli.strict,
            log_level: cli.log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config> {
        let argv = std::iter::once("herald-render").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv)?;
        Config::from_cli(cli)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.kind, RecordKind::Auto);
        assert_eq!(config.render, RenderOptions::DEFAULT);
        assert!(!config.strict);
        assert!(config.input.is_none());
    }

    #[test]
    fn test_flags() {
        let config = parse(&[
            "--kind",
            "event",
            "--tag-width",
            "20",
            "--placeholder",
            "<?>",
            "--strict",
            "-i",
            "events.jsonl",
        ])
        .unwrap();

        assert_eq!(config.kind, RecordKind::Event);
        assert_eq!(config.render.tag_width, 20);
        assert_eq!(config.render.placeholder, "<?>");
        assert!(config.strict);
        assert_eq!(config.input, Some(PathBuf::from("events.jsonl")));
    }

    #[test]
    fn test_tag_width_bounds() {
        assert!(parse(&["--tag-width", "0"]).is_err());
        assert!(parse(&["--tag-width", "65"]).is_err());
        assert!(parse(&["--tag-width", "64"]).is_ok());
    }
}
