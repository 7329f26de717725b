//! Version-control metadata directory names.

use std::path::Path;

/// Metadata directories kept by version-control systems inside a checkout.
///
/// Tree scans treat these as opaque: they are never descended into and
/// nothing below them is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcsDir {
    /// The `.git` directory
    Git,
    /// The `.svn` directory
    Subversion,
}

impl VcsDir {
    /// Every known metadata directory.
    pub const ALL: [VcsDir; 2] = [VcsDir::Git, VcsDir::Subversion];

    /// Get the string representation of the directory name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Git => ".git",
            Self::Subversion => ".svn",
        }
    }

    /// Whether `name` is the name of a metadata directory.
    pub fn matches(name: &str) -> bool {
        Self::ALL.iter().any(|dir| dir.as_str() == name)
    }
}

impl AsRef<Path> for VcsDir {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for VcsDir {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for VcsDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
