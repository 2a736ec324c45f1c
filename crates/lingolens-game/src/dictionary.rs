//! Static bilingual dictionaries and subset sampling.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;

use lingolens_types::{Language, LanguagePair};

static WORDS: Lazy<Dictionary> = Lazy::new(|| {
    Dictionary::from_json(include_str!("../data/words.json"))
        .expect("bundled word dictionary is valid")
});

static SENTENCES: Lazy<Dictionary> = Lazy::new(|| {
    Dictionary::from_json(include_str!("../data/sentences.json"))
        .expect("bundled sentence dictionary is valid")
});

/// One concept with its localized strings, keyed by language code. The
/// concept id is the entry's position in the dictionary.
#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryEntry(HashMap<Language, String>);

impl DictionaryEntry {
    fn get(&self, language: Language) -> Option<&str> {
        self.0
            .get(&language)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// A read-only list of dictionary entries, loaded once per session.
#[derive(Debug, Clone)]
pub struct Dictionary {
    entries: Vec<DictionaryEntry>,
}

/// A sampled entry carrying its original dictionary index; matching in the
/// word game is scored against this index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedPair {
    pub index: usize,
    pub source: String,
    pub target: String,
}

impl Dictionary {
    /// The bundled word dictionary.
    pub fn words() -> &'static Dictionary {
        &WORDS
    }

    /// The bundled sentence dictionary.
    pub fn sentences() -> &'static Dictionary {
        &SENTENCES
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<DictionaryEntry> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn translation(&self, index: usize, language: Language) -> Option<&str> {
        self.entries.get(index).and_then(|e| e.get(language))
    }

    /// Sample up to `count` unique entries that have non-empty strings in
    /// both languages of the pair, via an unseeded uniform shuffle.
    pub fn random_subset(&self, pair: LanguagePair, count: usize) -> Vec<IndexedPair> {
        let mut candidates: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.get(pair.source).is_some() && e.get(pair.target).is_some())
            .map(|(i, _)| i)
            .collect();
        fastrand::shuffle(&mut candidates);
        candidates
            .into_iter()
            .take(count)
            .map(|index| {
                let entry = &self.entries[index];
                IndexedPair {
                    index,
                    // both lookups were filtered non-empty above
                    source: entry.get(pair.source).unwrap_or_default().to_string(),
                    target: entry.get(pair.target).unwrap_or_default().to_string(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> LanguagePair {
        LanguagePair::default()
    }

    #[test]
    fn test_bundled_words_cover_all_languages() {
        let dict = Dictionary::words();
        assert!(dict.len() >= 10);
        for index in 0..dict.len() {
            for language in Language::ALL {
                assert!(
                    dict.translation(index, language).is_some(),
                    "word {index} missing {language}"
                );
            }
        }
    }

    #[test]
    fn test_bundled_sentences_cover_all_languages() {
        let dict = Dictionary::sentences();
        assert!(dict.len() >= 5);
        for index in 0..dict.len() {
            for language in Language::ALL {
                assert!(
                    dict.translation(index, language).is_some(),
                    "sentence {index} missing {language}"
                );
            }
        }
    }

    #[test]
    fn test_random_subset_unique_and_bounded() {
        let dict = Dictionary::words();
        let subset = dict.random_subset(pair(), 10);
        assert_eq!(subset.len(), 10usize.min(dict.len()));
        let mut indexes: Vec<usize> = subset.iter().map(|p| p.index).collect();
        indexes.sort_unstable();
        indexes.dedup();
        assert_eq!(indexes.len(), subset.len(), "no duplicate entries");
    }

    #[test]
    fn test_random_subset_caps_at_dictionary_size() {
        let dict = Dictionary::words();
        let subset = dict.random_subset(pair(), 1000);
        assert_eq!(subset.len(), dict.len());
    }

    #[test]
    fn test_random_subset_skips_incomplete_entries() {
        let dict = Dictionary::from_json(
            r#"[
                { "english": "house", "spanish": "casa" },
                { "english": "water", "spanish": "" },
                { "english": "bread" }
            ]"#,
        )
        .unwrap();
        let subset = dict.random_subset(pair(), 10);
        assert_eq!(subset.len(), 1);
        assert_eq!(subset[0].source, "house");
        assert_eq!(subset[0].target, "casa");
        assert_eq!(subset[0].index, 0);
    }

    #[test]
    fn test_pairs_keep_original_index() {
        let dict = Dictionary::words();
        for sampled in dict.random_subset(pair(), 10) {
            assert_eq!(
                dict.translation(sampled.index, Language::English),
                Some(sampled.source.as_str())
            );
            assert_eq!(
                dict.translation(sampled.index, Language::Spanish),
                Some(sampled.target.as_str())
            );
        }
    }
}
