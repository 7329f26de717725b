//! Error types for layout-vcs

use std::path::PathBuf;

/// Result type for layout-vcs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in layout-vcs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] layout_fs::Error),

    #[error("Repository at {path} has no working directory")]
    BareRepository { path: PathBuf },

    #[error("Path {path} is outside the working copy {workdir}")]
    OutsideWorkdir { path: PathBuf, workdir: PathBuf },

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Operation '{operation}' not supported by the {backend} backend")]
    Unsupported { operation: String, backend: String },
}
