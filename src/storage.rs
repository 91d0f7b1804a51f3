use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{DocumentRole, Result, SimilarityError};
use crate::similarity::SimilarityScore;

// ========== Document Input ==========

/// Read a UTF-8 document from disk
pub fn read_document<P: AsRef<Path>>(role: DocumentRole, path: P) -> Result<String> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SimilarityError::SourceUnavailable {
        role,
        path: path.to_path_buf(),
        source,
    })?;
    debug!(%role, path = %path.display(), bytes = text.len(), "read document");
    Ok(text)
}

// ========== Result Output ==========

/// Write the score with exactly two decimals and no trailing newline
pub fn write_result<P: AsRef<Path>>(path: P, score: SimilarityScore) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, score.to_string()).map_err(|source| SimilarityError::ResultWriteFailure {
        path: path.to_path_buf(),
        source,
    })
}
