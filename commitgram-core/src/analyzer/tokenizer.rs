//! Streaming tokenizer.
//!
//! Splits normalized text into tokens. It is the second stage of the message
//! pipeline: [`MessageNormalizer`] produces clean, single-spaced text and the
//! tokenizer breaks it into words, each emitted with its position.
//!
//! ```ignore
//! "fix the bug" -> ("fix", 0), ("the", 1), ("bug", 2)
//! ```
//!
//! Tokens are slices of the input, never copies.
//!
//! ## The Input Contract
//!
//! The tokenizer expects **pre-normalized** input:
//! - Tokens separated by exactly one ASCII space
//! - No leading or trailing whitespace
//!
//! Violations panic in debug builds.
//!
//! [`MessageNormalizer`]: super::MessageNormalizer

use memchr::memchr_iter;
use smallvec::{Array, SmallVec};

/// Streaming tokenizer - splits normalized text into tokens.
///
/// ## Example
///
/// ```
/// use commitgram_core::analyzer::Tokenizer;
///
/// let mut tokens = Vec::new();
/// Tokenizer::new().tokenize("fix the bug", |text, _pos| tokens.push(text));
///
/// assert_eq!(tokens, ["fix", "the", "bug"]);
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct Tokenizer;

impl Tokenizer {
    /// Creates a new tokenizer.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Tokenizes normalized input and emits `(text, position)`.
    ///
    /// Position is `u32`. After emitting a token at position `u32::MAX`,
    /// further emissions stop.
    #[inline(always)]
    pub fn tokenize<'n, F>(&self, normalized: &'n str, mut emit: F)
    where
        F: FnMut(&'n str, u32),
    {
        let bytes = normalized.as_bytes();

        debug_assert!(
            bytes.first().is_none_or(|&b| b != b' '),
            "tokenizer: leading whitespace: normalizer contract violated"
        );

        debug_assert!(
            bytes.last().is_none_or(|&b| b != b' '),
            "tokenizer: trailing whitespace: normalizer contract violated"
        );

        debug_assert!(
            !normalized.contains("  "),
            "tokenizer: consecutive spaces: normalizer contract violated"
        );

        if bytes.is_empty() {
            return;
        }

        let mut start = 0usize;
        let mut pos = 0u32;

        for i in memchr_iter(b' ', bytes) {
            if start < i {
                // Splitting on an ASCII space always lands on a char boundary.
                emit(&normalized[start..i], pos);
                if pos == u32::MAX {
                    return;
                }
                pos += 1;
            }
            start = i + 1;
        }

        if start < bytes.len() {
            emit(&normalized[start..], pos);
        }
    }

    /// Collects every token into `out`, clearing it first.
    #[inline]
    pub fn tokenize_into<'n, A>(&self, normalized: &'n str, out: &mut SmallVec<A>)
    where
        A: Array<Item = &'n str>,
    {
        out.clear();
        self.tokenize(normalized, |text, _| out.push(text));
    }
}
