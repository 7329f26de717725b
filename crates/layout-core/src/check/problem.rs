//! Consistency problems

use std::fmt;

use layout_fs::NormalizedPath;
use serde::Serialize;

/// Why a manifest entry does not match the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProblemKind {
    /// `must_exist` file is absent
    Missing,
    /// `must_be_versioned` file exists but is not tracked
    NotVersioned,
    /// `md5` file is absent, so it cannot be checksummed
    ChecksumMissingFile,
    /// Content does not match the recorded checksum
    ChecksumMismatch { obtained: String, expected: String },
    /// `md5` flag without a recorded value
    ChecksumUnrecorded,
    /// File exists but could not be read for checksumming
    ChecksumUnreadable { message: String },
    /// `deprecated` file is still present
    Deprecated,
    /// The version-control backend could not answer
    VersionControl { message: String },
    /// Remediation was accepted but failed
    RemediationFailed { message: String },
}

/// One consistency problem found for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub path: NormalizedPath,
    #[serde(flatten)]
    pub kind: ProblemKind,
}

impl Problem {
    pub fn new(path: &NormalizedPath, kind: ProblemKind) -> Self {
        Self {
            path: path.clone(),
            kind,
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = &self.path;
        match &self.kind {
            ProblemKind::Missing => write!(f, "File must exist but it doesnt: {path}"),
            ProblemKind::NotVersioned => write!(f, "File not versioned: {path}"),
            ProblemKind::ChecksumMissingFile => {
                write!(f, "Cant checksum because the file doesnt exist: {path}")
            }
            ProblemKind::ChecksumMismatch { obtained, expected } => write!(
                f,
                "MD5 Failure at file: {path} md5_obtained={obtained} md5_expected={expected}"
            ),
            ProblemKind::ChecksumUnrecorded => {
                write!(f, "No checksum recorded for file: {path}")
            }
            ProblemKind::ChecksumUnreadable { message } => {
                write!(f, "Cant checksum file: {path}: {message}")
            }
            ProblemKind::Deprecated => {
                write!(f, "This file is deprecated, please remove it: {path}")
            }
            ProblemKind::VersionControl { message } => {
                write!(f, "Version control query failed for file: {path}: {message}")
            }
            ProblemKind::RemediationFailed { message } => {
                write!(f, "Could not fix file: {path}: {message}")
            }
        }
    }
}
