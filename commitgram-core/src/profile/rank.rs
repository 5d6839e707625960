//! Top-N selection.

use core::cmp::Ordering;

use crate::profile::types::{AuthorProfiles, FrequencyTable};
use commitgram_types::{Count, OutputRow, RankedTrigram, TOP_N};

/// Rank order over `(count, insertion index)`: higher count first, then the
/// earlier insertion.
#[inline(always)]
fn by_rank(a: &(Count, usize), b: &(Count, usize)) -> Ordering {
    b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1))
}

/// Returns the `limit` most frequent trigrams of a table, best first.
///
/// Equal counts are ordered by first insertion, so the trigram counted first
/// wins a tie. Fewer than `limit` entries are returned when the table is
/// smaller.
pub fn top_n(table: &FrequencyTable, limit: usize) -> Vec<RankedTrigram> {
    if limit == 0 || table.is_empty() {
        return Vec::new();
    }

    let mut order: Vec<(Count, usize)> = table
        .values()
        .enumerate()
        .map(|(idx, &count)| (count, idx))
        .collect();

    if order.len() > limit {
        order.select_nth_unstable_by(limit, by_rank);
        order.truncate(limit);
    }
    order.sort_unstable_by(by_rank);

    order
        .into_iter()
        .filter_map(|(count, idx)| {
            table
                .get_index(idx)
                .map(|(text, _)| RankedTrigram::new(text.as_str(), count, idx))
        })
        .collect()
}

impl AuthorProfiles {
    /// Returns an author's `limit` most frequent trigrams, or `None` for an
    /// unknown author.
    pub fn top_trigrams(&self, author: &str, limit: usize) -> Option<Vec<RankedTrigram>> {
        self.authors.get(author).map(|table| top_n(table, limit))
    }

    /// Builds one output row per author, in first-encounter order.
    pub fn rows(&self) -> impl Iterator<Item = OutputRow> + '_ {
        self.authors
            .iter()
            .map(|(author, table)| OutputRow::from_ranked(author.as_str(), &top_n(table, TOP_N)))
    }
}
