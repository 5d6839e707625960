//! Reading event dumps and driving them through the profiler.

pub mod driver;
pub mod reader;

pub use driver::{build_table, ingest, run, IngestSummary, MalformedPolicy};
pub use reader::{Compression, EventReader};
