//! Backend selection from the checkout's metadata directory

use std::path::Path;

use layout_fs::VcsDir;

use crate::{GitBackend, NoVcs, Result, SvnBackend, VersionControl};

/// Pick a backend for the checkout rooted at `root`.
///
/// `.git` selects git, `.svn` selects subversion, anything else yields
/// [`NoVcs`].
pub fn detect(root: &Path) -> Result<Box<dyn VersionControl>> {
    if root.join(VcsDir::Git.as_str()).exists() {
        return Ok(Box::new(GitBackend::open(root)?));
    }
    if root.join(VcsDir::Subversion.as_str()).is_dir() {
        return Ok(Box::new(SvnBackend::new()));
    }
    tracing::debug!(root = %root.display(), "No version control detected");
    Ok(Box::new(NoVcs))
}
