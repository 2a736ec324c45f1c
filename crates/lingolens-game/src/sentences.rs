//! Sentence-translation practice mode.

use lingolens_types::LanguagePair;

use crate::dictionary::{Dictionary, IndexedPair};

/// Sentences sampled per session.
pub const SENTENCES_PER_SESSION: usize = 5;

/// Classification of one user token against the reference translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMatch {
    /// Exact match to some reference token.
    Correct,
    /// Substring relationship with some reference token, either direction.
    Partial,
    Incorrect,
}

/// A user token with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenVerdict {
    pub token: String,
    pub verdict: TokenMatch,
}

/// Lowercased tokens with surrounding punctuation stripped.
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

/// Compare a user translation against the reference, token by token.
///
/// Punctuation-insensitive and case-insensitive; word order is not checked.
/// No numeric score is derived, the verdicts are the whole result.
pub fn compare_translation(user_input: &str, reference: &str) -> Vec<TokenVerdict> {
    let reference_tokens = tokenize(reference);
    tokenize(user_input)
        .into_iter()
        .map(|token| {
            let verdict = if reference_tokens.iter().any(|r| *r == token) {
                TokenMatch::Correct
            } else if reference_tokens
                .iter()
                .any(|r| r.contains(&token) || token.contains(r.as_str()))
            {
                TokenMatch::Partial
            } else {
                TokenMatch::Incorrect
            };
            TokenVerdict { token, verdict }
        })
        .collect()
}

/// One sentence-translation session: a fixed sample worked through
/// sequentially, with no reshuffling mid-session.
pub struct SentenceSession {
    items: Vec<IndexedPair>,
    position: usize,
}

impl SentenceSession {
    pub fn new(dict: &Dictionary, pair: LanguagePair) -> Self {
        Self {
            items: dict.random_subset(pair, SENTENCES_PER_SESSION),
            position: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current position, 0-based.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> Option<&IndexedPair> {
        self.items.get(self.position)
    }

    /// Grade the user's translation of the current sentence.
    pub fn check(&self, user_input: &str) -> Option<Vec<TokenVerdict>> {
        self.current()
            .map(|pair| compare_translation(user_input, &pair.target))
    }

    /// Move to the next sentence. Returns false at the end of the sample.
    pub fn advance(&mut self) -> bool {
        if self.position + 1 < self.items.len() {
            self.position += 1;
            true
        } else {
            false
        }
    }
}
