//! Delimited table rendering.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use commitgram_types::OutputRow;
use tracing::debug;

use super::OutputError;

/// Field separator.
pub const DELIMITER: u8 = b';';

/// Fixed header row.
pub const HEADER: [&str; 6] = [
    "author",
    "first trigram",
    "second trigram",
    "third trigram",
    "fourth trigram",
    "fifth trigram",
];

const QUOTE: char = '"';

/// Result table: one row per author, in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrigramTable {
    rows: Vec<OutputRow>,
}

impl TrigramTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects rows in iteration order.
    pub fn from_rows(rows: impl IntoIterator<Item = OutputRow>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
        }
    }

    /// Returns the data rows (header excluded).
    #[inline]
    pub fn rows(&self) -> &[OutputRow] {
        &self.rows
    }

    /// Returns the number of data rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no data rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes the header and every row to `w`.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        write!(w, "{self}")?;
        w.flush()
    }

    /// Writes the table to `path` using write-to-temp-then-rename, so the
    /// target either keeps its old contents or holds the complete table.
    pub fn write_atomic(&self, path: &Path) -> Result<(), OutputError> {
        let tmp_path = temp_path(path);
        let io_err = |source| OutputError::Io {
            path: path.to_path_buf(),
            source,
        };

        let result = (|| {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            self.write_to(&mut writer)?;
            writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
            fs::rename(&tmp_path, path)
        })();

        if let Err(source) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(io_err(source));
        }

        debug!(path = %path.display(), rows = self.rows.len(), "table written");
        Ok(())
    }
}

/// Renders the header and every row, exactly as [`TrigramTable::write_to`]
/// writes them.
impl fmt::Display for TrigramTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_record(f, HEADER.iter().copied())?;
        for row in &self.rows {
            write_record(f, row.fields())?;
        }
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Fields containing the delimiter, a quote or a line break are quoted, with
/// embedded quotes doubled.
fn needs_quoting(field: &str) -> bool {
    field
        .bytes()
        .any(|b| matches!(b, DELIMITER | b'"' | b'\n' | b'\r'))
}

fn write_field<W: fmt::Write>(w: &mut W, field: &str) -> fmt::Result {
    if !needs_quoting(field) {
        return w.write_str(field);
    }

    w.write_char(QUOTE)?;
    for (i, part) in field.split(QUOTE).enumerate() {
        if i > 0 {
            w.write_str("\"\"")?;
        }
        w.write_str(part)?;
    }
    w.write_char(QUOTE)
}

fn write_record<'a, W, I>(w: &mut W, fields: I) -> fmt::Result
where
    W: fmt::Write,
    I: IntoIterator<Item = &'a str>,
{
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            w.write_char(DELIMITER as char)?;
        }
        write_field(w, field)?;
    }
    w.write_char('\n')
}
