//! Statistics and ProfileStats.

use crate::profile::types::AuthorProfiles;

/// A snapshot of profile statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileStats {
    /// Number of distinct authors.
    pub num_authors: usize,
    /// Sum over authors of their distinct trigrams.
    pub distinct_trigrams: usize,
    /// Trigram occurrences counted, including repeats.
    pub total_trigrams: u64,
    /// Commit messages analyzed.
    pub messages: u64,
    /// Authors with no trigram at all.
    pub empty_authors: usize,
}

impl AuthorProfiles {
    /// Returns profile statistics.
    pub fn stats(&self) -> ProfileStats {
        ProfileStats::from_profiles(self)
    }
}

impl ProfileStats {
    /// Constructs stats from a set of profiles.
    pub fn from_profiles(profiles: &AuthorProfiles) -> Self {
        let (distinct, empty) = profiles
            .authors
            .values()
            .fold((0usize, 0usize), |(distinct, empty), table| {
                (distinct + table.len(), empty + usize::from(table.is_empty()))
            });

        Self {
            num_authors: profiles.authors.len(),
            distinct_trigrams: distinct,
            total_trigrams: profiles.trigrams_counted,
            messages: profiles.messages_added,
            empty_authors: empty,
        }
    }

    /// Mean trigram occurrences per message, or 0 when nothing was analyzed.
    pub fn trigrams_per_message(&self) -> f64 {
        if self.messages == 0 {
            0.0
        } else {
            self.total_trigrams as f64 / self.messages as f64
        }
    }
}

impl core::fmt::Display for ProfileStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} authors, {} messages, {} trigrams ({} distinct)",
            self.num_authors, self.messages, self.total_trigrams, self.distinct_trigrams
        )?;

        if self.empty_authors > 0 {
            write!(f, ", {} authors without trigrams", self.empty_authors)?;
        }

        Ok(())
    }
}
