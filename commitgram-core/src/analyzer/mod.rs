//! Commit message analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Lowercases and strips punctuation from raw messages
//! - **Tokenizer**: Splits normalized text into words
//! - **Trigram**: Joins every 3 consecutive words into a trigram

pub mod normalizer;
pub mod tokenizer;
pub mod trigram;

pub use normalizer::MessageNormalizer;
pub use tokenizer::Tokenizer;
pub use trigram::{extract_trigrams, trigrams, TRIGRAM_WIDTH};
