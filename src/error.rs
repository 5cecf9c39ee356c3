use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn one document into a record. Never escapes the batch loop.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("document {id} has no question container")]
    MissingQuestion { id: String },
}

impl ExtractError {
    /// Short label for skip logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::Read { .. } => "unreadable",
            ExtractError::MissingQuestion { .. } => "no question",
        }
    }
}
