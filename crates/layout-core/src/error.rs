//! Error types for layout-core

use std::path::PathBuf;

use crate::manifest::ParseError;

/// Result type for layout-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in layout-core operations
///
/// Consistency problems are not errors: they are collected as
/// [`crate::check::Problem`] values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A manifest file could not be parsed
    #[error("Failed to load manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// Manifest text could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Invalid tool configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Installation target is missing or not a directory
    #[error("Target directory {path} doesn't exist or is not a directory")]
    TargetNotDirectory { path: PathBuf },

    /// The user declined to continue after the merge tool failed
    #[error("Installation aborted: merge tool returned {status} for {path}")]
    MergeAborted { path: PathBuf, status: String },

    /// An external program could not be started
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The design description could not be read
    #[error("Invalid design description {path}: {message}")]
    Design { path: PathBuf, message: String },

    /// An interactive prompt could not be answered
    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    /// I/O error on a specific path
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem error from layout-fs
    #[error(transparent)]
    Fs(#[from] layout_fs::Error),

    /// Version-control error from layout-vcs
    #[error(transparent)]
    Vcs(#[from] layout_vcs::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
