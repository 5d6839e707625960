//! Public API for recording trigrams.

use crate::analyzer::trigram::extract_trigrams;
use crate::analyzer::Tokenizer;
use crate::profile::types::{AuthorMap, AuthorProfiles, FrequencyTable, INLINE_TOKENS};
use commitgram_types::PushEvent;
use smallvec::SmallVec;

#[inline]
fn bump(table: &mut FrequencyTable, trigram: &str) {
    match table.get_mut(trigram) {
        Some(count) => *count += 1,
        None => {
            table.insert(trigram.to_owned(), 1);
        }
    }
}

impl AuthorProfiles {
    /// Returns the author's slot, creating an empty table on first sight.
    fn author_slot(authors: &mut AuthorMap, author: &str) -> usize {
        match authors.get_index_of(author) {
            Some(idx) => idx,
            None => authors.insert_full(author.to_owned(), FrequencyTable::default()).0,
        }
    }

    /// Counts each trigram once per occurrence for `author`.
    ///
    /// The author gets an entry even when `trigrams` is empty.
    pub fn record<I, S>(&mut self, author: &str, trigrams: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let slot = Self::author_slot(&mut self.authors, author);
        let table = &mut self.authors[slot];

        for trigram in trigrams {
            bump(table, trigram.as_ref());
            self.trigrams_counted += 1;
        }
    }

    /// Normalizes and tokenizes a commit message and counts its trigrams
    /// for `author`.
    ///
    /// Returns the number of trigram occurrences counted.
    pub fn add_message(&mut self, author: &str, message: &str) -> usize {
        self.normalizer.normalize_into(message, &mut self.norm_buf);

        let mut tokens: SmallVec<[&str; INLINE_TOKENS]> = SmallVec::new();
        Tokenizer::new().tokenize_into(&self.norm_buf, &mut tokens);

        let slot = Self::author_slot(&mut self.authors, author);
        let table = &mut self.authors[slot];

        let mut added = 0usize;
        extract_trigrams(tokens.as_slice(), |gram| {
            bump(table, gram);
            added += 1;
        });

        self.messages_added += 1;
        self.trigrams_counted += added as u64;
        added
    }

    /// Counts every commit message of a push for its actor.
    ///
    /// A push with no commits still registers the actor.
    /// Returns the number of trigram occurrences counted.
    pub fn add_push(&mut self, push: &PushEvent) -> usize {
        let author = push.author();
        Self::author_slot(&mut self.authors, author);

        push.messages()
            .map(|message| self.add_message(author, message))
            .sum()
    }
}
