use serde::{Deserialize, Serialize};

use crate::error::{DocumentRole, Result};
use crate::tokenizer::Tokenizer;

/// A raw text together with its normalized token string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub role: DocumentRole,
    pub raw: String,
    pub normalized: String,
}

impl Document {
    /// Normalize `raw` with `tokenizer`, tagging any failure with `role`.
    pub fn normalize(role: DocumentRole, raw: String, tokenizer: &Tokenizer) -> Result<Self> {
        let normalized = tokenizer.normalize(&raw).map_err(|e| e.for_role(role))?;
        Ok(Self {
            role,
            raw,
            normalized,
        })
    }

    /// Tokens of the normalized form, in segmentation order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.normalized.split_whitespace()
    }

    pub fn is_blank(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// The two documents of a single comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corpus {
    pub original: Document,
    pub candidate: Document,
}

impl Corpus {
    pub fn new(original: Document, candidate: Document) -> Self {
        Self {
            original,
            candidate,
        }
    }

    /// Normalize both raw texts with the same tokenizer
    pub fn from_texts(original: &str, candidate: &str, tokenizer: &Tokenizer) -> Result<Self> {
        let original = Document::normalize(DocumentRole::Original, original.to_string(), tokenizer)?;
        let candidate =
            Document::normalize(DocumentRole::Candidate, candidate.to_string(), tokenizer)?;
        Ok(Self::new(original, candidate))
    }

    /// Both sides normalized to nothing
    pub fn is_degenerate(&self) -> bool {
        self.original.is_blank() && self.candidate.is_blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_normalize() -> Result<()> {
        let tokenizer = Tokenizer::new();
        let doc = Document::normalize(
            DocumentRole::Original,
            "Rust, is fast!".to_string(),
            &tokenizer,
        )?;

        assert_eq!(doc.normalized, "Rust is fast");
        assert_eq!(doc.tokens().collect::<Vec<_>>(), vec!["Rust", "is", "fast"]);
        assert!(!doc.is_blank());
        Ok(())
    }

    #[test]
    fn test_corpus_degenerate() -> Result<()> {
        let tokenizer = Tokenizer::new();
        let corpus = Corpus::from_texts("  ", "。！", &tokenizer)?;
        assert!(corpus.is_degenerate());
        assert_eq!(corpus.candidate.role, DocumentRole::Candidate);

        let corpus = Corpus::from_texts("", "text", &tokenizer)?;
        assert!(!corpus.is_degenerate());
        Ok(())
    }
}
