//! Error types for sysfont-core

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures that are reported to the caller.
///
/// Missing fonts are never an error: resolution always lands on the default
/// font. Only caller mistakes and unreadable configuration end up here.
#[derive(Debug, Error)]
pub enum SysfontError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Unreadable or malformed configuration; `path` is set when it came from a file.
    #[error("config{}: {source}", config_origin(path.as_deref()))]
    Config {
        path: Option<PathBuf>,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn config_origin(path: Option<&Path>) -> String {
    path.map(|p| format!(" {}", p.display())).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, SysfontError>;
