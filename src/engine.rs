use crate::cache::{CacheStats, NormalizationCache};
use crate::config::SimilarityConfig;
use crate::document::Corpus;
use crate::error::{DocumentRole, Result};
use crate::profile::Profiler;
use crate::similarity::{score, SimilarityScore};
use crate::storage::read_document;
use crate::tokenizer::{Tokenizer, RULESET_VERSION};
use crate::vectorizer::{TfidfVectorizer, Vectorized};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of comparing two documents
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub score: SimilarityScore,
    pub original_tokens: String,
    pub candidate_tokens: String,
    pub vocabulary_size: usize,
    /// Terms weighted in both documents
    pub shared_terms: usize,
    pub ruleset_version: u32,
}

/// Normalize → vectorize → score pipeline.
///
/// Every comparison fits its own vectorizer, so engines can be shared
/// between threads; the only shared state is the normalization cache.
pub struct SimilarityEngine {
    config: SimilarityConfig,
    tokenizer: Tokenizer,
}

impl SimilarityEngine {
    /// Create an engine with its own normalization cache (unless
    /// `cache_capacity` is 0)
    pub fn new(config: SimilarityConfig) -> Result<Self> {
        config.validate()?;

        let tokenizer = if config.cache_capacity > 0 {
            let cache = NormalizationCache::new(config.cache_capacity)?;
            Tokenizer::with_cache(Arc::new(cache))
        } else {
            Tokenizer::new()
        };

        Ok(Self { config, tokenizer })
    }

    /// Create an engine that memoizes into an existing, possibly shared, cache
    pub fn with_cache(config: SimilarityConfig, cache: Arc<NormalizationCache>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tokenizer: Tokenizer::with_cache(cache),
        })
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.tokenizer.cache().map(|c| c.stats())
    }

    /// Normalize a single text
    pub fn normalize(&self, text: &str) -> Result<String> {
        self.tokenizer.normalize(text)
    }

    /// Score an already normalized corpus
    pub fn compare(&self, corpus: &Corpus) -> Comparison {
        let (value, vocabulary_size, shared_terms) = if corpus.is_degenerate() {
            debug!("both documents normalized to nothing");
            (0.0, 0, 0)
        } else {
            let mut vectorizer = TfidfVectorizer::new(self.config.vectorizer_config());
            let vectors = vectorizer
                .fit_transform(&corpus.original.normalized, &corpus.candidate.normalized);
            let shared = match &vectors {
                Vectorized::Vectors(a, b) => a
                    .weights()
                    .iter()
                    .zip(b.weights())
                    .filter(|(x, y)| **x > 0.0 && **y > 0.0)
                    .count(),
                Vectorized::EmptyVocabulary => 0,
            };
            (score(&vectors), vectorizer.vocabulary().len(), shared)
        };

        Comparison {
            score: SimilarityScore::new(value),
            original_tokens: corpus.original.normalized.clone(),
            candidate_tokens: corpus.candidate.normalized.clone(),
            vocabulary_size,
            shared_terms,
            ruleset_version: RULESET_VERSION,
        }
    }

    /// Normalize both texts and compare them
    pub fn compare_texts(&self, original: &str, candidate: &str) -> Result<Comparison> {
        let corpus = Corpus::from_texts(original, candidate, &self.tokenizer)?;
        Ok(self.compare(&corpus))
    }

    /// Similarity of two raw texts in [0, 1]
    pub fn compute_similarity(&self, original: &str, candidate: &str) -> Result<f64> {
        let comparison = self.compare_texts(original, candidate)?;
        info!(
            score = comparison.score.value(),
            vocabulary = comparison.vocabulary_size,
            "computed similarity"
        );
        Ok(comparison.score.value())
    }

    /// Read two documents from disk and compare them, timing each stage
    pub fn compare_files<P, Q>(
        &self,
        original: P,
        candidate: Q,
        profiler: &mut Profiler,
    ) -> Result<Comparison>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let (original, candidate) = profiler.time("read", || -> Result<(String, String)> {
            Ok((
                read_document(DocumentRole::Original, original)?,
                read_document(DocumentRole::Candidate, candidate)?,
            ))
        })?;

        let corpus = profiler.time("normalize", || {
            Corpus::from_texts(&original, &candidate, &self.tokenizer)
        })?;

        let comparison = profiler.time("score", || self.compare(&corpus));
        info!(score = comparison.score.value(), "compared files");
        Ok(comparison)
    }
}
