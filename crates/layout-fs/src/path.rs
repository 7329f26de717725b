//! Forward-slash paths shared by the manifest, the scanner and the installer

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// A path stored with forward slashes only.
///
/// Manifest entries, scan results and installer targets are all compared as
/// normalized strings, so `Device\src` and `Device/src` name the same entry.
/// Conversion to a platform-native path happens only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedPath {
    inner: String,
}

fn slashed(text: &str) -> String {
    text.replace('\\', "/")
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: slashed(&path.as_ref().to_string_lossy()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Append a relative segment.
    ///
    /// Empty segments and `.` leave the path unchanged, so joining the
    /// project-root directory entry does not introduce `/./`.
    pub fn join(&self, segment: &str) -> Self {
        let segment = slashed(segment);
        let segment = segment.trim_end_matches('/');
        if segment.is_empty() || segment == "." {
            return self.clone();
        }
        let inner = match self.inner.as_str() {
            "" => segment.to_string(),
            base if base.ends_with('/') => format!("{base}{segment}"),
            base => format!("{base}/{segment}"),
        };
        Self { inner }
    }

    fn trimmed(&self) -> &str {
        self.inner.trim_end_matches('/')
    }

    /// Last component, ignoring any trailing slash.
    fn file_name(&self) -> Option<&str> {
        self.trimmed().rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Text after the last dot of the file name. Dotfiles have none.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(idx) if idx > 0 => Some(&name[idx + 1..]),
            _ => None,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
