//! lingolens-game: practice-game engine over static bilingual dictionaries.
//!
//! Two independent modes: word matching (pair source words with shuffled
//! target translations) and sentence translation (free-text input graded by
//! token-level comparison). Both sample from read-only dictionaries bundled
//! with the binary; sampling is unseeded by design, this is a practice aid,
//! not a scored assessment.

mod dictionary;
mod sentences;
mod word_match;

pub use dictionary::{Dictionary, IndexedPair};
pub use sentences::{
    SENTENCES_PER_SESSION, SentenceSession, TokenMatch, TokenVerdict, compare_translation,
};
pub use word_match::{TOTAL_ROUNDS, WORDS_PER_ROUND, WordMatchSession};
