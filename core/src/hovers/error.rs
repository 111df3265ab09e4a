//! Error types for hover definition loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors during hover document loading.
///
/// None of these abort a load: a bad file is skipped, a bad directory
/// yields no documents.
#[derive(Debug, Error)]
pub enum HoverError {
    #[error("failed to read hover directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create hover directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read hover file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse hover JSON in {path}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} is not a hover map (is_hover_map must be \"absolutely\")")]
    NotHoverMap { path: PathBuf },
}
