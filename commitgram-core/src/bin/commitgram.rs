//! commitgram - top commit message trigrams per author.
//!
//! ```bash
//! # Defaults: 10K.github.jsonl.bz2 -> top_5_trigrams.csv
//! commitgram
//!
//! # Explicit paths, skipping undecodable records
//! commitgram --input events.jsonl.gz --output top.csv --on-malformed skip
//!
//! # More detail on stderr
//! RUST_LOG=debug commitgram
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commitgram_core::RunConfig;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = RunConfig::parse();

    commitgram_core::run(&config).with_context(|| {
        format!(
            "failed to profile {} into {}",
            config.input.display(),
            config.output.display()
        )
    })?;

    Ok(())
}
