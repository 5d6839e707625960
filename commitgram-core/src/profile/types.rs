//! Profile types.

use crate::analyzer::normalizer::MessageNormalizer;

use commitgram_types::Count;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// Trigram → occurrence count, in first-insertion order.
pub type FrequencyTable = IndexMap<String, Count, FxBuildHasher>;

pub(crate) type AuthorMap = IndexMap<String, FrequencyTable, FxBuildHasher>;

/// Inline token capacity before the per-message buffer spills to the heap.
pub const INLINE_TOKENS: usize = 32;

/// Per-author trigram frequency profiles.
///
/// Authors are kept in the order they were first recorded, and each author's
/// trigrams in the order they were first counted. That order is the
/// tie-breaker for ranking and the row order of the output table.
pub struct AuthorProfiles {
    pub(crate) authors: AuthorMap,
    pub(crate) normalizer: MessageNormalizer,
    /// Reusable buffer for message normalization
    pub(crate) norm_buf: String,
    /// Total number of messages analyzed
    pub(crate) messages_added: u64,
    /// Total number of trigram occurrences counted
    pub(crate) trigrams_counted: u64,
}

impl Default for AuthorProfiles {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthorProfiles {
    /// Creates an empty set of profiles.
    pub fn new() -> Self {
        Self {
            authors: IndexMap::default(),
            normalizer: MessageNormalizer::new(),
            norm_buf: String::with_capacity(256),
            messages_added: 0,
            trigrams_counted: 0,
        }
    }

    /// Returns the number of authors seen.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.authors.len()
    }

    /// Returns `true` if no author has been recorded.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    /// Returns an author's frequency table.
    #[inline]
    pub fn get(&self, author: &str) -> Option<&FrequencyTable> {
        self.authors.get(author)
    }

    /// Iterates over authors and their tables in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrequencyTable)> {
        self.authors.iter().map(|(a, t)| (a.as_str(), t))
    }

    /// Removes all authors and resets counters.
    pub fn clear(&mut self) {
        self.authors.clear();
        self.messages_added = 0;
        self.trigrams_counted = 0;
    }

    /// Returns basic counters about ingestion so far.
    #[inline(always)]
    #[must_use]
    pub fn metrics(&self) -> ProfileMetrics {
        ProfileMetrics {
            messages_analyzed: self.messages_added,
            trigrams_counted: self.trigrams_counted,
            authors: self.authors.len() as u64,
        }
    }
}

/// Basic operational counters for [`AuthorProfiles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileMetrics {
    /// Commit messages passed through the analyzer.
    pub messages_analyzed: u64,
    /// Trigram occurrences counted, including repeats.
    pub trigrams_counted: u64,
    /// Distinct authors.
    pub authors: u64,
}
