//! Backends that need no version-control system

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result, VersionControl};

/// Keeps the tracked set in memory.
///
/// Removing a path also deletes it from disk, like `git rm` would.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tracked: RefCell<BTreeSet<PathBuf>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `paths` already tracked.
    pub fn with_tracked<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            tracked: RefCell::new(paths.into_iter().map(Into::into).collect()),
        }
    }

    /// Snapshot of the tracked paths.
    pub fn tracked(&self) -> Vec<PathBuf> {
        self.tracked.borrow().iter().cloned().collect()
    }
}

impl VersionControl for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn is_versioned(&self, path: &Path) -> Result<bool> {
        Ok(self.tracked.borrow().contains(path))
    }

    fn add(&self, path: &Path) -> Result<()> {
        self.tracked.borrow_mut().insert(path.to_path_buf());
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<()> {
        self.tracked.borrow_mut().remove(path);
        if path.exists() {
            fs::remove_file(path).map_err(|e| layout_fs::Error::io(path, e))?;
        }
        Ok(())
    }
}

/// A checkout without version control: nothing is tracked.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoVcs;

impl VersionControl for NoVcs {
    fn name(&self) -> &'static str {
        "none"
    }

    fn is_versioned(&self, _path: &Path) -> Result<bool> {
        Ok(false)
    }

    fn add(&self, _path: &Path) -> Result<()> {
        Err(Error::Unsupported {
            operation: "add".into(),
            backend: self.name().into(),
        })
    }

    fn remove(&self, _path: &Path) -> Result<()> {
        Err(Error::Unsupported {
            operation: "remove".into(),
            backend: self.name().into(),
        })
    }
}
