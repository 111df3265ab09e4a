//! Error types for context operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors while starting the hover directory watcher
#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("failed to initialize file watcher")]
    InitWatcher(#[source] notify::Error),

    #[error("failed to watch path {path}")]
    WatchPath {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[from] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),
}
