//! Error types for ingestion and the viewer API.

use thiserror::Error;

/// Errors raised while ingesting a folder selection into a forest.
///
/// Failures on individual subtrees are absorbed by the walker (the branch is
/// omitted and siblings continue); these variants cover whole-pass failures.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Not a file: {0}")]
    NotAFile(String),

    #[error("Ingestion pass superseded by a newer selection")]
    Superseded,
}

/// Top-level viewer API error
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Ingestion error: {0}")]
    IngestError(#[from] IngestError),

    #[error("Not a recognized video file: {0}")]
    NotAVideo(String),

    #[error("No node found at path: {0}")]
    NodeNotFound(String),

    #[error("Playback handle {0} has been revoked")]
    HandleRevoked(crate::types::HandleId),
}
