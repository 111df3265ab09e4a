//! Error types for name table loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading a symbol table
#[derive(Debug, Error)]
pub enum NameError {
    #[error("failed to read symbol table {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse symbol table TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unsupported symbol table version {version} in {path} (expected {expected})")]
    UnsupportedVersion {
        path: PathBuf,
        version: u32,
        expected: u32,
    },
}
