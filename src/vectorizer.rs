//! TF-IDF vectorization over the two documents of a comparison.
//!
//! Terms are the whitespace-separated tokens of a normalized string. The
//! vocabulary is sorted, so both vectors of a fit index the same terms by
//! position.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SimilarityError};

/// Vectorizer options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Keep only the K terms with the highest corpus frequency
    pub max_features: Option<usize>,
    /// Fold terms to lowercase before counting
    pub lowercase: bool,
}

impl VectorizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_features == Some(0) {
            return Err(SimilarityError::InvalidConfig {
                message: "max_features must be at least 1 when set".to_string(),
            });
        }
        Ok(())
    }
}

/// Terms and their IDF weights, in vector order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Vocabulary {
    terms: Vec<String>,
    idf: Vec<f64>,
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn position(&self, term: &str) -> Option<usize> {
        self.positions.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.position(term).map(|i| self.idf[i])
    }
}

/// Weights over a vocabulary, one slot per term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermVector {
    weights: Vec<f64>,
}

impl TermVector {
    pub fn from_weights(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn dimension(&self) -> usize {
        self.weights.len()
    }

    pub fn norm(&self) -> f64 {
        self.weights.iter().map(|w| w * w).sum::<f64>().sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.weights.iter().all(|&w| w == 0.0)
    }

    /// Dot product; slots missing on either side count as zero
    pub fn dot(&self, other: &TermVector) -> f64 {
        self.weights
            .iter()
            .zip(&other.weights)
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Scale to unit length. The zero vector stays zero.
    fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for w in &mut self.weights {
                *w /= norm;
            }
        }
    }
}

/// Outcome of vectorizing a pair of token strings
#[derive(Debug, Clone, PartialEq)]
pub enum Vectorized {
    /// Both vectors share the fitted vocabulary
    Vectors(TermVector, TermVector),
    /// Neither document had a single term
    EmptyVocabulary,
}

/// Smoothed inverse document frequency
pub fn smoothed_idf(total_docs: usize, doc_frequency: usize) -> f64 {
    ((1.0 + total_docs as f64) / (1.0 + doc_frequency as f64)).ln() + 1.0
}

/// TF-IDF vectorizer. Each `fit` replaces the previous vocabulary entirely.
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    config: VectorizerConfig,
    vocabulary: Vocabulary,
}

impl TfidfVectorizer {
    pub fn new(config: VectorizerConfig) -> Self {
        Self {
            config,
            vocabulary: Vocabulary::default(),
        }
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Count term occurrences in a token string
    fn term_counts(&self, tokens: &str) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for token in tokens.split_whitespace() {
            let term = if self.config.lowercase {
                token.to_lowercase()
            } else {
                token.to_string()
            };
            *counts.entry(term).or_insert(0) += 1;
        }
        counts
    }

    /// Build the vocabulary and IDF table from `documents`
    pub fn fit(&mut self, documents: &[&str]) -> &Vocabulary {
        let per_doc: Vec<HashMap<String, usize>> =
            documents.iter().map(|d| self.term_counts(d)).collect();

        let mut corpus_freq: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for counts in &per_doc {
            for (term, &count) in counts {
                *corpus_freq.entry(term.as_str()).or_insert(0) += count;
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<&str> = corpus_freq.keys().copied().collect();
        if let Some(limit) = self.config.max_features {
            if terms.len() > limit {
                terms.sort_by(|a, b| corpus_freq[b].cmp(&corpus_freq[a]).then_with(|| a.cmp(b)));
                terms.truncate(limit);
            }
        }
        terms.sort_unstable();

        let idf = terms
            .iter()
            .map(|t| smoothed_idf(documents.len(), doc_freq[t]))
            .collect();
        let terms: Vec<String> = terms.into_iter().map(str::to_string).collect();
        let positions = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();

        self.vocabulary = Vocabulary {
            terms,
            idf,
            positions,
        };
        debug!(terms = self.vocabulary.len(), "fitted vocabulary");
        &self.vocabulary
    }

    /// L2-normalized TF-IDF vector of `tokens` over the fitted vocabulary.
    /// Terms outside the vocabulary are ignored.
    pub fn transform(&self, tokens: &str) -> TermVector {
        let mut weights = vec![0.0; self.vocabulary.len()];
        for (term, count) in self.term_counts(tokens) {
            if let Some(i) = self.vocabulary.position(&term) {
                weights[i] = count as f64 * self.vocabulary.idf[i];
            }
        }

        let mut vector = TermVector::from_weights(weights);
        vector.l2_normalize();
        vector
    }

    pub fn fit_transform(&mut self, first: &str, second: &str) -> Vectorized {
        self.fit(&[first, second]);
        if self.vocabulary.is_empty() {
            return Vectorized::EmptyVocabulary;
        }
        Vectorized::Vectors(self.transform(first), self.transform(second))
    }
}

/// Vectorize a pair of token strings with a fresh vectorizer
pub fn vectorize(first: &str, second: &str, config: &VectorizerConfig) -> Vectorized {
    TfidfVectorizer::new(config.clone()).fit_transform(first, second)
}
