//! TF-IDF vectorization of short text documents.
//!
//! ## Algorithm
//! 1. Tokenize: lowercase, keep runs of alphanumeric/`_` chars of length >= 2
//! 2. Drop English stop words
//! 3. Count term frequency across the corpus and document frequency per term
//! 4. Keep the `max_features` most frequent terms (ties alphabetical),
//!    columns ordered alphabetically
//! 5. Weight = raw count * (ln((1 + n) / (1 + df)) + 1), then L2-normalize
//!    each row

use crate::error::{FeatureError, Result};
use crate::stopwords::is_stop_word;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 500;

/// Sparse row: strictly increasing column indices with their values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    pub indices: Vec<usize>,
    pub values: Vec<f32>,
}

impl SparseVector {
    /// Build from (column, value) pairs; pairs are sorted by column.
    pub fn from_pairs(mut pairs: Vec<(usize, f32)>) -> Self {
        pairs.sort_by_key(|&(idx, _)| idx);
        let (indices, values) = pairs.into_iter().unzip();
        Self { indices, values }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Value at `column`, 0.0 when not stored
    pub fn get(&self, column: usize) -> f32 {
        self.indices
            .binary_search(&column)
            .map(|pos| self.values[pos])
            .unwrap_or(0.0)
    }
}

/// Split text into lowercase word tokens of at least two characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(String::from)
        .collect()
}

/// TF-IDF vectorizer with English stop-word removal and a vocabulary cap.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f32>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
        }
    }

    /// Configure the vocabulary cap (default: 500, must be at least 1)
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Learned term -> column mapping
    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn idf_values(&self) -> &[f32] {
        &self.idf
    }

    fn analyze(text: &str) -> Vec<String> {
        tokenize(text)
            .into_iter()
            .filter(|token| !is_stop_word(token))
            .collect()
    }

    /// Learn the vocabulary and IDF weights, then transform the documents.
    pub fn fit_transform<S: AsRef<str> + Sync>(&mut self, documents: &[S]) -> Result<Vec<SparseVector>> {
        if self.max_features == 0 {
            return Err(FeatureError::InvalidMaxFeatures(self.max_features));
        }
        if documents.is_empty() {
            return Err(FeatureError::EmptyCorpus);
        }

        let analyzed: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| Self::analyze(doc.as_ref()))
            .collect();

        let mut term_freq: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &analyzed {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in tokens {
                *term_freq.entry(token.as_str()).or_insert(0) += 1;
                if seen.insert(token.as_str()) {
                    *doc_freq.entry(token.as_str()).or_insert(0) += 1;
                }
            }
        }

        if term_freq.is_empty() {
            return Err(FeatureError::EmptyVocabulary);
        }

        // Most frequent terms first, alphabetical among equals
        let mut ranked: Vec<(&str, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        let kept: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        self.vocabulary = kept
            .iter()
            .map(|term| term.to_string())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();

        let n_docs = documents.len() as f32;
        self.idf = self
            .vocabulary
            .keys()
            .map(|term| {
                let df = doc_freq.get(term.as_str()).copied().unwrap_or(0) as f32;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        debug!(
            "TF-IDF vocabulary built: {} terms from {} documents",
            self.vocabulary.len(),
            documents.len()
        );

        Ok(analyzed
            .par_iter()
            .map(|tokens| self.weigh(tokens))
            .collect())
    }

    /// Transform documents with the already learned vocabulary.
    pub fn transform<S: AsRef<str> + Sync>(&self, documents: &[S]) -> Result<Vec<SparseVector>> {
        if self.vocabulary.is_empty() {
            return Err(FeatureError::EmptyVocabulary);
        }
        Ok(documents
            .par_iter()
            .map(|doc| self.weigh(&Self::analyze(doc.as_ref())))
            .collect())
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for token in tokens {
            if let Some(&col) = self.vocabulary.get(token) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut pairs: Vec<(usize, f32)> = counts
            .into_iter()
            .map(|(col, tf)| (col, tf * self.idf[col]))
            .collect();

        let norm = pairs.iter().map(|(_, v)| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, v) in &mut pairs {
                *v /= norm;
            }
        }
        SparseVector::from_pairs(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Action|Sci-Fi Christopher_Nolan a B"),
            vec!["action", "sci", "fi", "christopher_nolan"]
        );
    }

    #[test]
    fn test_stop_words_removed() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit_transform(&["the action and the drama"]).unwrap();
        let terms: Vec<&String> = vectorizer.vocabulary().keys().collect();
        assert_eq!(terms, vec!["action", "drama"]);
    }

    #[test]
    fn test_rows_are_l2_normalized() {
        let mut vectorizer = TfidfVectorizer::new();
        let rows = vectorizer
            .fit_transform(&["action scifi", "action", "drama drama romance"])
            .unwrap();

        for row in &rows {
            let norm: f32 = row.values.iter().map(|v| v * v).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_idf_rarer_terms_weigh_more() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit_transform(&["action drama", "action", "action"]).unwrap();

        let action = vectorizer.vocabulary()["action"];
        let drama = vectorizer.vocabulary()["drama"];
        assert!(vectorizer.idf_values()[drama] > vectorizer.idf_values()[action]);
        assert!((vectorizer.idf_values()[action] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let mut vectorizer = TfidfVectorizer::new().with_max_features(2);
        vectorizer
            .fit_transform(&["action action drama", "action comedy drama", "western"])
            .unwrap();

        let terms: Vec<&String> = vectorizer.vocabulary().keys().collect();
        assert_eq!(terms, vec!["action", "drama"]);
    }

    #[test]
    fn test_empty_vocabulary_is_an_error() {
        let mut vectorizer = TfidfVectorizer::new();
        assert_eq!(
            vectorizer.fit_transform(&["the of", ""]).unwrap_err(),
            FeatureError::EmptyVocabulary
        );
        let empty: [&str; 0] = [];
        assert_eq!(vectorizer.fit_transform(&empty).unwrap_err(), FeatureError::EmptyCorpus);
    }

    #[test]
    fn test_zero_max_features_is_rejected() {
        let mut vectorizer = TfidfVectorizer::new().with_max_features(0);
        assert_eq!(
            vectorizer.fit_transform(&["action drama"]).unwrap_err(),
            FeatureError::InvalidMaxFeatures(0)
        );
        assert_eq!(vectorizer.vocabulary_size(), 0);
    }

    #[test]
    fn test_transform_uses_fitted_vocabulary() {
        let mut vectorizer = TfidfVectorizer::new();
        let fitted = vectorizer.fit_transform(&["action drama", "comedy"]).unwrap();

        // Unknown terms are ignored; known ones get the fitted weights
        let rows = vectorizer.transform(&["drama western action", "western"]).unwrap();
        assert_eq!(rows[0], fitted[0]);
        assert!(rows[1].is_empty());

        let unfitted = TfidfVectorizer::new();
        assert_eq!(
            unfitted.transform(&["action"]).unwrap_err(),
            FeatureError::EmptyVocabulary
        );
    }

    #[test]
    fn test_document_without_known_terms_is_zero_row() {
        let mut vectorizer = TfidfVectorizer::new();
        let rows = vectorizer.fit_transform(&["action", "the"]).unwrap();
        assert!(rows[1].is_empty());
        assert!((rows[0].get(0) - 1.0).abs() < 1e-6);
    }
}
