//! JSON-lines event reader.
//!
//! Opens an event dump, picks a decompressor and yields one decoded
//! [`LocatedEvent`] per non-blank line. The reader never interprets events;
//! it only turns bytes into records and attaches line numbers.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use bzip2::read::MultiBzDecoder;
use clap::ValueEnum;
use commitgram_types::{DecodeError, Event, IngestError, LocatedEvent};
use flate2::read::MultiGzDecoder;
use tracing::debug;

/// Compression applied to the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Compression {
    /// Decide from the file extension (`.bz2`, `.gz`, anything else is plain).
    #[default]
    Auto,
    /// Uncompressed JSON lines.
    None,
    /// gzip, possibly multi-member.
    Gzip,
    /// bzip2, possibly multi-stream.
    Bzip2,
}

impl Compression {
    /// Resolves [`Compression::Auto`] against a path; other values are returned as is.
    pub fn resolve(self, path: &Path) -> Self {
        if self != Compression::Auto {
            return self;
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bz2") => Compression::Bzip2,
            Some(ext) if ext.eq_ignore_ascii_case("gz") => Compression::Gzip,
            _ => Compression::None,
        }
    }
}

/// Iterator over the events of a JSON-lines stream.
///
/// Line numbers are 1-based and count blank lines, so they match what an
/// editor shows for the decompressed text. After an I/O error the iterator
/// is exhausted.
pub struct EventReader<R> {
    reader: R,
    buf: Vec<u8>,
    line: u64,
    done: bool,
}

impl EventReader<Box<dyn BufRead>> {
    /// Opens `path`, decompressing according to `compression`.
    pub fn open(path: &Path, compression: Compression) -> Result<Self, IngestError> {
        let file = File::open(path).map_err(|source| IngestError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let resolved = compression.resolve(path);
        debug!(path = %path.display(), compression = ?resolved, "opened event input");

        let reader: Box<dyn BufRead> = match resolved {
            Compression::Bzip2 => Box::new(BufReader::new(MultiBzDecoder::new(file))),
            Compression::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(file))),
            Compression::None | Compression::Auto => Box::new(BufReader::new(file)),
        };

        Ok(Self::new(reader))
    }
}

impl<R: BufRead> EventReader<R> {
    /// Wraps an already decompressed line source.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(4096),
            line: 0,
            done: false,
        }
    }

    /// Number of lines consumed so far.
    #[inline]
    pub fn lines_read(&self) -> u64 {
        self.line
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<LocatedEvent, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => self.line += 1,
                Err(source) => {
                    self.done = true;
                    return Some(Err(IngestError::Io {
                        line: self.line + 1,
                        source,
                    }));
                }
            }

            let line = self.line;
            let text = match std::str::from_utf8(&self.buf) {
                Ok(text) => text.trim(),
                Err(err) => {
                    return Some(Err(IngestError::Malformed {
                        line,
                        source: DecodeError::Utf8(err),
                    }))
                }
            };

            if text.is_empty() {
                continue;
            }

            return Some(
                Event::from_json_line(text)
                    .map(|event| LocatedEvent { line, event })
                    .map_err(|source| IngestError::Malformed { line, source }),
            );
        }

        None
    }
}
