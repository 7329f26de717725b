//! Git backend built on the repository index

use std::fs;
use std::path::{Path, PathBuf};

use git2::Repository;

use crate::{Error, Result, VersionControl};

/// Answers tracking questions from a git index.
///
/// A path counts as versioned once it is in the index, which includes files
/// that were added but not yet committed.
pub struct GitBackend {
    repo: Repository,
    workdir: PathBuf,
}

impl GitBackend {
    /// Open the repository containing `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)?;
        let workdir = repo.workdir().ok_or_else(|| Error::BareRepository {
            path: repo.path().to_path_buf(),
        })?;
        let workdir = canonical(workdir)?;
        tracing::debug!(workdir = %workdir.display(), "Opened git repository");
        Ok(Self { repo, workdir })
    }

    /// The canonical working directory of the repository.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Path of `path` relative to the working directory, as the index
    /// expects it.
    fn index_path(&self, path: &Path) -> Result<PathBuf> {
        let absolute = match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
                canonical(parent)?.join(name)
            }
            (_, Some(name)) => canonical(Path::new("."))?.join(name),
            _ => canonical(path)?,
        };

        absolute
            .strip_prefix(&self.workdir)
            .map(Path::to_path_buf)
            .map_err(|_| Error::OutsideWorkdir {
                path: absolute.clone(),
                workdir: self.workdir.clone(),
            })
    }
}

impl VersionControl for GitBackend {
    fn name(&self) -> &'static str {
        "git"
    }

    fn is_versioned(&self, path: &Path) -> Result<bool> {
        let relative = self.index_path(path)?;
        let mut index = self.repo.index()?;
        index.read(false)?;
        Ok(index.get_path(&relative, 0).is_some())
    }

    fn add(&self, path: &Path) -> Result<()> {
        let relative = self.index_path(path)?;
        let mut index = self.repo.index()?;
        index.read(false)?;
        index.add_path(&relative)?;
        index.write()?;
        tracing::info!(path = %relative.display(), "Added to git index");
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<()> {
        let relative = self.index_path(path)?;
        let mut index = self.repo.index()?;
        index.read(false)?;
        index.remove_path(&relative)?;
        index.write()?;

        if path.exists() {
            fs::remove_file(path).map_err(|e| layout_fs::Error::io(path, e))?;
        }
        tracing::info!(path = %relative.display(), "Removed from git index and working tree");
        Ok(())
    }
}

fn canonical(path: &Path) -> Result<PathBuf> {
    dunce::canonicalize(path).map_err(|e| Error::Fs(layout_fs::Error::io(path, e)))
}
