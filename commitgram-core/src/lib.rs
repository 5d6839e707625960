//! Per-author commit message trigram profiles from GitHub event dumps.
//!
//! The pipeline is a single pass:
//!
//! 1. [`ingest::EventReader`] decompresses and decodes JSON-lines events
//! 2. [`ingest::ingest`] keeps `PushEvent`s and feeds their commit messages
//!    through the [`analyzer`]
//! 3. [`profile::AuthorProfiles`] counts trigrams per author
//! 4. [`output::TrigramTable`] holds each author's top five and writes them
//!
//! [`pipeline::run`] wires these together for one configured run.

pub mod analyzer;
pub mod config;
pub mod ingest;
pub mod output;
pub mod pipeline;
pub mod profile;

pub use commitgram_types as types;
pub use config::RunConfig;
pub use pipeline::{run, RunError, RunReport};
