//! Event filtering and the single ingestion pass.

use clap::ValueEnum;
use commitgram_types::{Event, IngestError, LocatedEvent};
use tracing::{debug, warn};

use crate::output::TrigramTable;
use crate::profile::AuthorProfiles;

/// What to do with a record that cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MalformedPolicy {
    /// Abort the run at the first malformed record.
    #[default]
    Strict,
    /// Log the record's line number and continue.
    Skip,
}

/// Counters gathered during one ingestion pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestSummary {
    /// Records decoded successfully.
    pub records: u64,
    /// Push events profiled.
    pub push_events: u64,
    /// Records of any other type.
    pub skipped_events: u64,
    /// Malformed records passed over under [`MalformedPolicy::Skip`].
    pub malformed: u64,
    /// Commits analyzed.
    pub commits: u64,
    /// Trigram occurrences counted.
    pub trigrams: u64,
}

impl core::fmt::Display for IngestSummary {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} records: {} push events, {} other, {} commits, {} trigrams",
            self.records, self.push_events, self.skipped_events, self.commits, self.trigrams
        )?;
        if self.malformed > 0 {
            write!(f, ", {} malformed skipped", self.malformed)?;
        }
        Ok(())
    }
}

/// Feeds every push event of `events` into `profiles`.
///
/// Non-push events are skipped without side effects. Malformed records are
/// handled according to `policy`; I/O and open failures always abort.
pub fn ingest<I>(
    events: I,
    profiles: &mut AuthorProfiles,
    policy: MalformedPolicy,
) -> Result<IngestSummary, IngestError>
where
    I: IntoIterator<Item = Result<LocatedEvent, IngestError>>,
{
    let mut summary = IngestSummary::default();

    for item in events {
        let LocatedEvent { line, event } = match item {
            Ok(located) => located,
            Err(err) if err.is_malformed() && policy == MalformedPolicy::Skip => {
                warn!(line = ?err.line(), error = %err, "skipping malformed record");
                summary.malformed += 1;
                continue;
            }
            Err(err) => return Err(err),
        };

        summary.records += 1;
        match event {
            Event::Push(push) => {
                summary.push_events += 1;
                summary.commits += push.payload.commits.len() as u64;
                summary.trigrams += profiles.add_push(&push) as u64;
            }
            Event::Other { kind } => {
                debug!(line, kind = %kind, "skipping non-push event");
                summary.skipped_events += 1;
            }
        }
    }

    Ok(summary)
}

/// Ranks every author's trigrams into the output table, in first-encounter order.
pub fn build_table(profiles: &AuthorProfiles) -> TrigramTable {
    TrigramTable::from_rows(profiles.rows())
}

/// Runs one full pass over `events` and returns the finished table.
pub fn run<I>(events: I, policy: MalformedPolicy) -> Result<(TrigramTable, IngestSummary), IngestError>
where
    I: IntoIterator<Item = Result<LocatedEvent, IngestError>>,
{
    let mut profiles = AuthorProfiles::new();
    let summary = ingest(events, &mut profiles, policy)?;
    debug!(stats = %profiles.stats(), "profiles built");
    Ok((build_table(&profiles), summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use commitgram_types::DecodeError;

    fn decoded(lines: &[&str]) -> Vec<Result<LocatedEvent, IngestError>> {
        lines
            .iter()
            .enumerate()
            .map(|(i, l)| {
                let line = i as u64 + 1;
                Event::from_json_line(l)
                    .map(|event| LocatedEvent { line, event })
                    .map_err(|source| IngestError::Malformed { line, source })
            })
            .collect()
    }

    const ALICE_PUSH: &str = r#"{"type":"PushEvent","actor":{"login":"alice"},"payload":{"commits":[{"message":"do the thing now"}]}}"#;

    #[test]
    fn two_pushes_from_alice() {
        let (table, summary) = run(decoded(&[ALICE_PUSH, ALICE_PUSH]), MalformedPolicy::Strict)
            .expect("well-formed input");

        assert_eq!(summary.push_events, 2);
        assert_eq!(summary.trigrams, 4);
        assert_eq!(table.len(), 1);

        let row = &table.rows()[0];
        assert_eq!(row.author, "alice");
        assert_eq!(row.slots[0], "do the thing");
        assert_eq!(row.slots[1], "the thing now");
        assert!(row.slots[2..].iter().all(String::is_empty));
    }

    #[test]
    fn non_push_events_contribute_nothing() {
        let lines = [
            r#"{"type":"IssuesEvent","actor":{"login":"mallory"},"payload":{"commits":[{"message":"one two three"}]}}"#,
            r#"{"type":"WatchEvent"}"#,
        ];
        let mut profiles = AuthorProfiles::new();
        let summary = ingest(decoded(&lines), &mut profiles, MalformedPolicy::Strict).unwrap();

        assert_eq!(summary.skipped_events, 2);
        assert_eq!(summary.push_events, 0);
        assert!(profiles.is_empty());
        assert!(build_table(&profiles).is_empty());
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let (table, summary) = run(Vec::new(), MalformedPolicy::Strict).unwrap();
        assert!(table.is_empty());
        assert_eq!(summary, IngestSummary::default());
    }

    #[test]
    fn strict_fails_at_malformed_line() {
        let lines = [
            ALICE_PUSH,
            r#"{"type":"PushEvent","payload":{"commits":[]}}"#,
            ALICE_PUSH,
        ];
        let err = run(decoded(&lines), MalformedPolicy::Strict).unwrap_err();

        assert_eq!(err.line(), Some(2));
        assert!(matches!(
            err,
            IngestError::Malformed {
                source: DecodeError::PushShape(_),
                ..
            }
        ));
    }

    #[test]
    fn skip_continues_past_malformed_line() {
        let lines = [ALICE_PUSH, "{broken", ALICE_PUSH];
        let (table, summary) = run(decoded(&lines), MalformedPolicy::Skip).unwrap();

        assert_eq!(summary.malformed, 1);
        assert_eq!(summary.push_events, 2);
        assert_eq!(table.rows()[0].slots[0], "do the thing");
        assert!(summary.to_string().contains("1 malformed skipped"));
    }

    #[test]
    fn io_errors_abort_even_when_skipping() {
        let events = vec![
            decoded(&[ALICE_PUSH]).remove(0),
            Err(IngestError::Io {
                line: 2,
                source: std::io::Error::other("truncated stream"),
            }),
        ];
        let err = run(events, MalformedPolicy::Skip).unwrap_err();
        assert!(matches!(err, IngestError::Io { line: 2, .. }));
    }

    #[test]
    fn authors_in_first_encounter_order() {
        let lines = [
            r#"{"type":"PushEvent","actor":{"login":"zed"},"payload":{"commits":[{"message":"a b c"}]}}"#,
            r#"{"type":"PushEvent","actor":{"login":"amy"},"payload":{"commits":[]}}"#,
            r#"{"type":"PushEvent","actor":{"login":"zed"},"payload":{"commits":[{"message":"x y z"}]}}"#,
        ];
        let (table, _) = run(decoded(&lines), MalformedPolicy::Strict).unwrap();
        let authors: Vec<_> = table.rows().iter().map(|r| r.author.as_str()).collect();
        assert_eq!(authors, ["zed", "amy"]);
        assert_eq!(table.rows()[1].filled(), 0);
    }
}
