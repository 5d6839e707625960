//! Core types shared across the commitgram workspace.
//!
//! This crate holds the plain data that flows between stages:
//!
//! - **Events**: decoded input records ([`Event`], [`PushEvent`], [`Commit`])
//! - **Rankings**: trigram frequency entries ordered for top-N selection
//! - **Rows**: the fixed-width [`OutputRow`] written to the result table
//! - **Errors**: decode and ingest failures with their input line number
//!
//! Keeping these separate from the analysis code means the reader, the
//! profiler and the table writer agree on one vocabulary without depending
//! on each other.

#![warn(missing_docs)]

use core::cmp::Ordering;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Number of trigram slots in every output row.
pub const TOP_N: usize = 5;

/// The only event type whose commits are profiled.
pub const PUSH_EVENT: &str = "PushEvent";

/// Occurrence count of a trigram for one author.
pub type Count = u64;

/// A single commit inside a push payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Commit {
    /// Free-text commit message.
    pub message: String,
}

/// The user that triggered an event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Actor {
    /// Account login, used as the author key.
    pub login: String,
}

/// Payload of a push event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PushPayload {
    /// Commits in push order.
    pub commits: Vec<Commit>,
}

/// A `PushEvent` record with the fields the profiler needs.
///
/// Every other field of the record is ignored during decoding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PushEvent {
    /// Who pushed.
    pub actor: Actor,
    /// What was pushed.
    pub payload: PushPayload,
}

impl PushEvent {
    /// Returns the author login.
    #[inline]
    pub fn author(&self) -> &str {
        &self.actor.login
    }

    /// Iterates over the commit messages in push order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.payload.commits.iter().map(|c| c.message.as_str())
    }
}

/// A decoded input record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A push event; the only kind that contributes trigrams.
    Push(PushEvent),
    /// Any other event type. Only the type tag is kept.
    Other {
        /// The record's `type` value.
        kind: String,
    },
}

impl Event {
    /// Decodes one JSON-lines record.
    ///
    /// The `type` field is required on every record. Push events must also
    /// carry `actor.login` and `payload.commits[].message`; other event types
    /// are not inspected further.
    pub fn from_json_line(line: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(line)?;

        match value.get("type") {
            Some(Value::String(kind)) if kind == PUSH_EVENT => {}
            Some(Value::String(kind)) => return Ok(Event::Other { kind: kind.clone() }),
            Some(_) => return Err(DecodeError::InvalidType),
            None => return Err(DecodeError::MissingType),
        }

        PushEvent::deserialize(value)
            .map(Event::Push)
            .map_err(DecodeError::PushShape)
    }

    /// Returns the record's type tag.
    pub fn kind(&self) -> &str {
        match self {
            Event::Push(_) => PUSH_EVENT,
            Event::Other { kind } => kind,
        }
    }
}

/// A decoded event together with the 1-based input line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedEvent {
    /// Input line number.
    pub line: u64,
    /// The decoded record.
    pub event: Event,
}

/// A trigram with its frequency and first-insertion index.
///
/// Ordering follows rank: a higher count is "greater", and when counts are
/// equal the trigram seen first is "greater". Sorting descending therefore
/// yields the top-N order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedTrigram {
    /// Space-joined trigram text.
    pub text: String,
    /// Number of occurrences.
    pub count: Count,
    /// Position of the trigram in its author's insertion order.
    pub first_seen: usize,
}

impl RankedTrigram {
    /// Creates a ranked entry.
    #[inline]
    pub fn new(text: impl Into<String>, count: Count, first_seen: usize) -> Self {
        Self {
            text: text.into(),
            count,
            first_seen,
        }
    }
}

impl PartialOrd for RankedTrigram {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankedTrigram {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        // Earlier insertion wins a tie, so the index comparison is reversed.
        self.count
            .cmp(&other.count)
            .then_with(|| other.first_seen.cmp(&self.first_seen))
            .then_with(|| other.text.cmp(&self.text))
    }
}

/// One line of the result table: an author and exactly [`TOP_N`] slots.
///
/// Slots are filled from the highest-ranked trigram down and padded with
/// empty strings, so an empty slot is never followed by a filled one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    /// Author login.
    pub author: String,
    /// Trigram texts, best first; empty when the author has fewer trigrams.
    pub slots: [String; TOP_N],
}

impl OutputRow {
    /// Builds a row from an already ranked list. Entries past [`TOP_N`] are ignored.
    pub fn from_ranked(author: impl Into<String>, ranked: &[RankedTrigram]) -> Self {
        Self {
            author: author.into(),
            slots: core::array::from_fn(|i| {
                ranked.get(i).map(|r| r.text.clone()).unwrap_or_default()
            }),
        }
    }

    /// Number of non-empty slots.
    pub fn filled(&self) -> usize {
        self.slots.iter().take_while(|s| !s.is_empty()).count()
    }

    /// Iterates over the author followed by every slot.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        core::iter::once(self.author.as_str()).chain(self.slots.iter().map(String::as_str))
    }
}

/// Reasons a single input line could not be turned into an [`Event`].
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8: {0}")]
    Utf8(#[from] core::str::Utf8Error),

    /// The line is not a JSON value.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The record has no `type` field.
    #[error("record has no `type` field")]
    MissingType,

    /// The `type` field is not a string.
    #[error("record `type` field is not a string")]
    InvalidType,

    /// A push event lacks `actor.login` or `payload.commits[].message`,
    /// or one of them has the wrong JSON type.
    #[error("malformed PushEvent: {0}")]
    PushShape(#[source] serde_json::Error),
}

/// Errors raised while reading events from the input.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The input file could not be opened.
    #[error("cannot open input {}: {source}", .path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Reading or decompressing the stream failed.
    #[error("I/O error reading input at line {line}: {source}")]
    Io {
        /// Line being read when the failure happened.
        line: u64,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A record could not be decoded.
    #[error("malformed record at line {line}: {source}")]
    Malformed {
        /// Offending input line.
        line: u64,
        /// Why decoding failed.
        #[source]
        source: DecodeError,
    },
}

impl IngestError {
    /// Returns `true` for per-record decode failures, which a lenient run may skip.
    #[inline]
    pub fn is_malformed(&self) -> bool {
        matches!(self, IngestError::Malformed { .. })
    }

    /// Returns the input line the error refers to, if any.
    pub fn line(&self) -> Option<u64> {
        match self {
            IngestError::Open { .. } => None,
            IngestError::Io { line, .. } | IngestError::Malformed { line, .. } => Some(*line),
        }
    }
}
