//! Run configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::ingest::{Compression, MalformedPolicy};

/// Input file used when none is given.
pub const DEFAULT_INPUT: &str = "10K.github.jsonl.bz2";

/// Output file used when none is given.
pub const DEFAULT_OUTPUT: &str = "top_5_trigrams.csv";

/// Command line and environment configuration for one run.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "commitgram")]
#[command(about = "Top commit message trigrams per author from a GitHub event dump")]
#[command(version)]
pub struct RunConfig {
    /// Event dump in JSON-lines format, optionally .bz2 or .gz compressed
    #[arg(long, short, env = "COMMITGRAM_INPUT", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Destination of the `;`-separated result table
    #[arg(long, short, env = "COMMITGRAM_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// How to treat records that cannot be decoded
    #[arg(long, env = "COMMITGRAM_ON_MALFORMED", value_enum, default_value_t = MalformedPolicy::Strict)]
    pub on_malformed: MalformedPolicy,

    /// Input compression; `auto` decides from the file extension
    #[arg(long, value_enum, default_value_t = Compression::Auto)]
    pub compression: Compression,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            on_malformed: MalformedPolicy::default(),
            compression: Compression::default(),
        }
    }
}

impl RunConfig {
    /// Creates a configuration for explicit paths with default policies.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_paths() {
        let config = RunConfig::try_parse_from(["commitgram"]).unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.input, PathBuf::from("10K.github.jsonl.bz2"));
        assert_eq!(config.output, PathBuf::from("top_5_trigrams.csv"));
    }

    #[test]
    fn parses_overrides() {
        let config = RunConfig::try_parse_from([
            "commitgram",
            "--input",
            "events.jsonl.gz",
            "-o",
            "out.csv",
            "--on-malformed",
            "skip",
            "--compression",
            "gzip",
        ])
        .unwrap();

        assert_eq!(config.input, PathBuf::from("events.jsonl.gz"));
        assert_eq!(config.output, PathBuf::from("out.csv"));
        assert_eq!(config.on_malformed, MalformedPolicy::Skip);
        assert_eq!(config.compression, Compression::Gzip);
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(RunConfig::try_parse_from(["commitgram", "--on-malformed", "ignore"]).is_err());
    }
}
