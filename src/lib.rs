// Re-export main components
pub mod cache;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod profile;
pub mod similarity;
pub mod storage;
pub mod tokenizer;
pub mod vectorizer;

// Re-export commonly used types
pub use cache::{CacheStats, NormalizationCache};
pub use config::SimilarityConfig;
pub use document::{Corpus, Document};
pub use engine::{Comparison, SimilarityEngine};
pub use similarity::{cosine_similarity, SimilarityScore};
pub use tokenizer::Tokenizer;
pub use vectorizer::{vectorize, TermVector, TfidfVectorizer, VectorizerConfig, Vectorized};

// Re-export error types
pub use error::{DocumentRole, Result, SimilarityError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Similarity of two raw texts with the default configuration
pub fn compute_similarity(original: &str, candidate: &str) -> Result<f64> {
    SimilarityEngine::new(SimilarityConfig::default())?.compute_similarity(original, candidate)
}
