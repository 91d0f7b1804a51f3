use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vectorizer::{TermVector, Vectorized};

/// Cosine similarity between two term vectors.
///
/// A zero vector on either side scores exactly 0.0 rather than dividing by a
/// zero norm.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    if a.is_zero() || b.is_zero() {
        return 0.0;
    }

    a.dot(b) / (a.norm() * b.norm())
}

/// Score a vectorized pair; an empty vocabulary scores 0.0
pub fn score(vectors: &Vectorized) -> f64 {
    match vectors {
        Vectorized::Vectors(a, b) => cosine_similarity(a, b),
        Vectorized::EmptyVocabulary => 0.0,
    }
}

/// Similarity of two documents in [0, 1].
///
/// Holds the full-precision value; `Display` rounds to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimilarityScore(f64);

impl SimilarityScore {
    pub const ZERO: SimilarityScore = SimilarityScore(0.0);

    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<SimilarityScore> for f64 {
    fn from(score: SimilarityScore) -> Self {
        score.0
    }
}

impl fmt::Display for SimilarityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical_vectors() {
        let v = TermVector::from_weights(vec![0.6, 0.8]);
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        let a = TermVector::from_weights(vec![1.0, 0.0]);
        let b = TermVector::from_weights(vec![0.0, 1.0]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_does_not_assume_unit_length() {
        let a = TermVector::from_weights(vec![3.0, 4.0]);
        let b = TermVector::from_weights(vec![6.0, 8.0]);
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let zero = TermVector::from_weights(vec![0.0, 0.0]);
        let v = TermVector::from_weights(vec![1.0, 0.0]);
        assert_eq!(cosine_similarity(&zero, &v), 0.0);
        assert_eq!(cosine_similarity(&v, &zero), 0.0);
        assert_eq!(score(&Vectorized::EmptyVocabulary), 0.0);
    }

    #[test]
    fn test_score_display_two_decimals() {
        assert_eq!(SimilarityScore::new(0.8834).to_string(), "0.88");
        assert_eq!(SimilarityScore::new(1.0).to_string(), "1.00");
        assert_eq!(SimilarityScore::ZERO.to_string(), "0.00");
    }
}
