//! One complete run: read, profile, rank, write.

use std::time::{Duration, Instant};

use commitgram_types::IngestError;
use thiserror::Error;
use tracing::info;

use crate::config::RunConfig;
use crate::ingest::{self, EventReader, IngestSummary};
use crate::output::OutputError;

/// Failure of a complete run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Reading or decoding the input failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),
    /// Writing the table failed.
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// What a successful run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Ingestion counters.
    pub summary: IngestSummary,
    /// Data rows written (one per author).
    pub rows: usize,
    /// Wall time of the run.
    pub elapsed: Duration,
}

/// Reads `config.input`, profiles every push event and writes the table to
/// `config.output`.
///
/// The output file is only touched after the whole input has been
/// consumed, so a failed run never leaves a partial table behind.
pub fn run(config: &RunConfig) -> Result<RunReport, RunError> {
    let start = Instant::now();

    let reader = EventReader::open(&config.input, config.compression)?;
    let (table, summary) = ingest::run(reader, config.on_malformed)?;
    table.write_atomic(&config.output)?;

    let report = RunReport {
        summary,
        rows: table.len(),
        elapsed: start.elapsed(),
    };

    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        rows = report.rows,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "{}",
        report.summary
    );

    Ok(report)
}
