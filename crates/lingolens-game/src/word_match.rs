//! Word-matching practice mode.

use lingolens_types::LanguagePair;

use crate::dictionary::{Dictionary, IndexedPair};

/// Words sampled per round.
pub const WORDS_PER_ROUND: usize = 10;
/// Rounds per session; the final round has no "next" action.
pub const TOTAL_ROUNDS: usize = 5;

/// One word-matching session: a fixed number of rounds, each a fresh sample
/// of dictionary entries. Source words keep sample order; target words are
/// presented in a shuffled permutation. A match counts only when the chosen
/// source and target share the same original dictionary index.
pub struct WordMatchSession<'a> {
    dict: &'a Dictionary,
    pair: LanguagePair,
    round: usize,
    items: Vec<IndexedPair>,
    /// Permutation mapping display position -> sample position.
    target_order: Vec<usize>,
    matched: Vec<bool>,
}

impl<'a> WordMatchSession<'a> {
    pub fn new(dict: &'a Dictionary, pair: LanguagePair) -> Self {
        let mut session = Self {
            dict,
            pair,
            round: 1,
            items: Vec::new(),
            target_order: Vec::new(),
            matched: Vec::new(),
        };
        session.deal();
        session
    }

    fn deal(&mut self) {
        self.items = self.dict.random_subset(self.pair, WORDS_PER_ROUND);
        let mut order: Vec<usize> = (0..self.items.len()).collect();
        fastrand::shuffle(&mut order);
        self.target_order = order;
        self.matched = vec![false; self.items.len()];
    }

    /// Current round, 1-based.
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn total_rounds(&self) -> usize {
        TOTAL_ROUNDS
    }

    pub fn round_size(&self) -> usize {
        self.items.len()
    }

    /// Source-language words, in sample order.
    pub fn source_items(&self) -> Vec<&str> {
        self.items.iter().map(|p| p.source.as_str()).collect()
    }

    /// Target-language words, in the shuffled display order.
    pub fn target_items(&self) -> Vec<&str> {
        self.target_order
            .iter()
            .map(|&i| self.items[i].target.as_str())
            .collect()
    }

    pub fn is_matched(&self, source_pos: usize) -> bool {
        self.matched.get(source_pos).copied().unwrap_or(false)
    }

    /// Attempt to pair the source word at `source_pos` with the displayed
    /// target word at `target_pos`. Returns whether the pairing is correct;
    /// out-of-range positions and already-matched sources count as incorrect.
    pub fn try_match(&mut self, source_pos: usize, target_pos: usize) -> bool {
        let Some(&sample_pos) = self.target_order.get(target_pos) else {
            return false;
        };
        let Some(source) = self.items.get(source_pos) else {
            return false;
        };
        if self.matched[source_pos] {
            return false;
        }
        let correct = source.index == self.items[sample_pos].index;
        if correct {
            self.matched[source_pos] = true;
        }
        correct
    }

    /// Matched words in the current round.
    pub fn matched_count(&self) -> usize {
        self.matched.iter().filter(|&&m| m).count()
    }

    pub fn is_round_complete(&self) -> bool {
        !self.items.is_empty() && self.matched.iter().all(|&m| m)
    }

    pub fn has_next_round(&self) -> bool {
        self.round < TOTAL_ROUNDS
    }

    /// Move to the next round with a fresh sample. Returns false on the
    /// final round.
    pub fn advance_round(&mut self) -> bool {
        if !self.has_next_round() {
            return false;
        }
        self.round += 1;
        self.deal();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> WordMatchSession<'static> {
        WordMatchSession::new(Dictionary::words(), LanguagePair::default())
    }

    /// Display position of the correct target for the given source position.
    fn correct_target_pos(session: &WordMatchSession, source_pos: usize) -> usize {
        let want = session.items[source_pos].index;
        session
            .target_order
            .iter()
            .position(|&i| session.items[i].index == want)
            .unwrap()
    }

    #[test]
    fn test_round_has_full_sample() {
        let s = session();
        assert_eq!(s.round(), 1);
        assert_eq!(s.round_size(), WORDS_PER_ROUND);
        assert_eq!(s.source_items().len(), WORDS_PER_ROUND);
        assert_eq!(s.target_items().len(), WORDS_PER_ROUND);
    }

    #[test]
    fn test_targets_are_a_permutation_of_sources() {
        let s = session();
        let mut targets: Vec<&str> = s.target_items();
        let mut expected: Vec<&str> = s.items.iter().map(|p| p.target.as_str()).collect();
        targets.sort_unstable();
        expected.sort_unstable();
        assert_eq!(targets, expected);
    }

    #[test]
    fn test_match_scored_by_dictionary_index() {
        let mut s = session();
        let good = correct_target_pos(&s, 0);
        assert!(s.try_match(0, good));
        assert!(s.is_matched(0));
        assert_eq!(s.matched_count(), 1);

        // wrong pairing for source 1
        let good1 = correct_target_pos(&s, 1);
        let bad = (0..s.round_size()).find(|&p| p != good1).unwrap();
        assert!(!s.try_match(1, bad));
        assert!(!s.is_matched(1));
    }

    #[test]
    fn test_rematch_and_out_of_range_rejected() {
        let mut s = session();
        let good = correct_target_pos(&s, 0);
        assert!(s.try_match(0, good));
        assert!(!s.try_match(0, good), "already matched");
        assert!(!s.try_match(99, 0));
        assert!(!s.try_match(0, 99));
    }

    #[test]
    fn test_round_completion_and_advancement() {
        let mut s = session();
        for pos in 0..s.round_size() {
            let good = correct_target_pos(&s, pos);
            assert!(s.try_match(pos, good));
        }
        assert!(s.is_round_complete());

        assert!(s.advance_round());
        assert_eq!(s.round(), 2);
        assert_eq!(s.matched_count(), 0, "fresh round resets progress");
    }

    #[test]
    fn test_final_round_has_no_next() {
        let mut s = session();
        for _ in 0..TOTAL_ROUNDS - 1 {
            assert!(s.advance_round());
        }
        assert_eq!(s.round(), TOTAL_ROUNDS);
        assert!(!s.has_next_round());
        assert!(!s.advance_round());
        assert_eq!(s.round(), TOTAL_ROUNDS);
    }
}
