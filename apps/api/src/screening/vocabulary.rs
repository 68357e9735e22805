//! Keyword space construction.
//!
//! Text is lowercased and split into runs of word characters (alphanumeric or
//! `_`). Tokens shorter than two characters and English stop words are dropped.
//! The vocabulary keeps presence only; the similarity scorer uses the
//! frequency view of the same tokenizer.

use std::collections::{BTreeMap, BTreeSet};

use crate::screening::stopwords::is_stop_word;

/// Normalized, stop-word-free set of terms found in a text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary(BTreeSet<String>);

impl Vocabulary {
    pub fn contains(&self, term: &str) -> bool {
        self.0.contains(term)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Terms in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    /// Terms present in `self` but not in `other`, in lexicographic order.
    pub fn difference<'a>(&'a self, other: &'a Vocabulary) -> impl Iterator<Item = &'a str> + 'a {
        self.0.difference(&other.0).map(String::as_str)
    }
}

impl FromIterator<String> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Vocabulary(iter.into_iter().collect())
    }
}

/// Splits `text` into normalized tokens, in document order, duplicates kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2 && !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

/// Builds the vocabulary of `text`. Empty or stop-word-only input yields an empty set.
pub fn build_vocabulary(text: &str) -> Vocabulary {
    tokenize(text).into_iter().collect()
}

/// Counts each normalized term of `text`.
pub fn term_frequencies(text: &str) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_removes_stop_words() {
        let vocab = build_vocabulary("Looking for a Python developer with experience in Django and SQL");
        let terms: Vec<&str> = vocab.iter().collect();
        assert_eq!(
            terms,
            vec!["developer", "django", "experience", "looking", "python", "sql"]
        );
    }

    #[test]
    fn test_single_character_tokens_dropped() {
        let vocab = build_vocabulary("C R x ai");
        assert!(vocab.contains("ai"));
        assert!(!vocab.contains("c"));
        assert!(!vocab.contains("r"));
    }

    #[test]
    fn test_punctuation_splits_tokens() {
        let vocab = build_vocabulary("rust/tokio, axum; sql_server (postgres)");
        assert!(vocab.contains("rust"));
        assert!(vocab.contains("tokio"));
        assert!(vocab.contains("axum"));
        assert!(vocab.contains("sql_server"));
        assert!(vocab.contains("postgres"));
    }

    #[test]
    fn test_empty_and_stop_word_only_input() {
        assert!(build_vocabulary("").is_empty());
        assert!(build_vocabulary("the and of with").is_empty());
    }

    #[test]
    fn test_vocabulary_is_a_set() {
        let vocab = build_vocabulary("rust Rust RUST");
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn test_term_frequencies_count_repeats() {
        let tf = term_frequencies("Rust and rust and ML");
        assert_eq!(tf.get("rust"), Some(&2));
        assert_eq!(tf.get("ml"), Some(&1));
        assert!(!tf.contains_key("and"));
    }

    #[test]
    fn test_two_letter_stop_words_dropped() {
        // "go" and "me" are both on the English stop list despite passing the length filter.
        let vocab = build_vocabulary("go me ai");
        assert!(!vocab.contains("go"));
        assert!(!vocab.contains("me"));
        assert!(vocab.contains("ai"));
        assert_eq!(vocab.len(), 1);
    }
}
