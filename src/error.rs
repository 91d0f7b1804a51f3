use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which side of the comparison a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentRole {
    Original,
    Candidate,
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRole::Original => write!(f, "original"),
            DocumentRole::Candidate => write!(f, "candidate"),
        }
    }
}

/// Errors surfaced by the similarity pipeline and its file collaborators.
///
/// Two empty documents are not an error: they score 0.0.
#[derive(Debug, Error)]
pub enum SimilarityError {
    #[error("{role} document unavailable at {}: {source}", .path.display())]
    SourceUnavailable {
        role: DocumentRole,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("segmentation failed{}: {message}", role_suffix(.role))]
    NormalizationFailure {
        role: Option<DocumentRole>,
        message: String,
    },

    #[error("failed to write result to {}: {source}", .path.display())]
    ResultWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl SimilarityError {
    /// Attach the document role to an error raised before the role was known.
    pub fn for_role(self, role: DocumentRole) -> Self {
        match self {
            SimilarityError::NormalizationFailure { role: None, message } => {
                SimilarityError::NormalizationFailure {
                    role: Some(role),
                    message,
                }
            }
            other => other,
        }
    }
}

fn role_suffix(role: &Option<DocumentRole>) -> String {
    role.map(|r| format!(" for the {} document", r))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, SimilarityError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_source_unavailable_names_role_and_path() {
        let err = SimilarityError::SourceUnavailable {
            role: DocumentRole::Candidate,
            path: PathBuf::from("/tmp/missing.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("candidate"));
        assert!(msg.contains("/tmp/missing.txt"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_normalization_failure_names_role() {
        let err = SimilarityError::NormalizationFailure {
            role: None,
            message: "boom".to_string(),
        }
        .for_role(DocumentRole::Original);
        assert!(err.to_string().contains("for the original document"));
        assert!(err.to_string().contains("boom"));
    }
}
