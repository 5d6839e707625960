//! Per-author trigram aggregation.
//!
//! [`AuthorProfiles`] owns one insertion-ordered frequency table per author
//! and turns each into a fixed-width [`OutputRow`] on demand.
//!
//! Threading:
//! - [`AuthorProfiles`] keeps a reusable normalization buffer and is meant
//!   to be driven from a single thread.
//!
//! [`OutputRow`]: commitgram_types::OutputRow

mod api;
mod rank;
mod stats;
mod types;

pub use rank::top_n;
pub use stats::ProfileStats;
pub use types::{AuthorProfiles, FrequencyTable, ProfileMetrics};
