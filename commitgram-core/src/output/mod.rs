//! Result table output.

use std::path::PathBuf;

use thiserror::Error;

mod table;

pub use table::{TrigramTable, DELIMITER, HEADER};

/// Errors that can occur while writing the result table.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Creating, writing, syncing or renaming the file failed.
    #[error("failed to write table to {}: {source}", .path.display())]
    Io {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
