//! Word trigram generation.
//!
//! A trigram is three consecutive tokens joined by a single space. Windows
//! overlap and repeats are kept, so `"a b a b"` yields `"a b a"` and
//! `"b a b"`, and a phrase used twice in one message counts twice.

/// Window width used for commit message profiles.
pub const TRIGRAM_WIDTH: usize = 3;

/// Emits every contiguous `n`-token window joined with single spaces.
///
/// For fewer than `n` tokens (or `n == 0`) nothing is emitted.
/// For `L` tokens exactly `L - n + 1` windows are emitted, in input order.
///
/// The callback receives a view into a scratch buffer that is reused for the
/// next window; copy it if it must outlive the call.
///
/// # Example
///
/// ```
/// use commitgram_core::analyzer::trigram::extract_ngrams;
///
/// let mut grams = Vec::new();
/// extract_ngrams(&["do", "the", "thing", "now"], 3, |g| grams.push(g.to_owned()));
///
/// assert_eq!(grams, ["do the thing", "the thing now"]);
/// ```
#[inline]
pub fn extract_ngrams<S, F>(tokens: &[S], n: usize, mut callback: F)
where
    S: AsRef<str>,
    F: FnMut(&str),
{
    if n == 0 || tokens.len() < n {
        return;
    }

    let mut gram = String::new();
    for window in tokens.windows(n) {
        gram.clear();
        for (i, token) in window.iter().enumerate() {
            if i > 0 {
                gram.push(' ');
            }
            gram.push_str(token.as_ref());
        }
        callback(&gram);
    }
}

/// Emits every trigram of `tokens`. See [`extract_ngrams`].
#[inline(always)]
pub fn extract_trigrams<S, F>(tokens: &[S], callback: F)
where
    S: AsRef<str>,
    F: FnMut(&str),
{
    extract_ngrams(tokens, TRIGRAM_WIDTH, callback);
}

/// Returns the trigrams of `tokens` as owned strings.
pub fn trigrams<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut out = Vec::with_capacity(count_trigrams(tokens.len()));
    extract_trigrams(tokens, |g| out.push(g.to_owned()));
    out
}

/// Number of `n`-token windows over `len` tokens, without generating them.
#[inline(always)]
pub const fn count_ngrams(len: usize, n: usize) -> usize {
    if n == 0 || len < n {
        0
    } else {
        len - n + 1
    }
}

/// Number of trigrams over `len` tokens: `max(0, len - 2)`.
#[inline(always)]
pub const fn count_trigrams(len: usize) -> usize {
    count_ngrams(len, TRIGRAM_WIDTH)
}
