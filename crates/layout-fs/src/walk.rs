//! Iterative tree scanning

use std::path::Path;

use walkdir::WalkDir;

use crate::{Error, NormalizedPath, Result, VcsDir};

/// List every regular file below `root`, relative to `root`.
///
/// Version-control metadata directories (see [`VcsDir`]) are pruned without
/// being entered. Symbolic links count as files when they resolve to one;
/// anything else that is neither a file nor a directory is skipped with a
/// warning. The result is sorted.
pub fn scan_files(root: &Path) -> Result<Vec<NormalizedPath>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !(entry.file_type().is_dir()
                    && VcsDir::matches(&entry.file_name().to_string_lossy()))
        });

    for entry in walker {
        let entry = entry.map_err(|e| Error::Walk {
            path: e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            message: e.to_string(),
        })?;

        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        if !(file_type.is_file() || entry.path().is_file()) {
            tracing::warn!(
                path = %entry.path().display(),
                "Skipped entry which is neither file nor directory"
            );
            continue;
        }

        let relative = entry.path().strip_prefix(root).map_err(|e| Error::Walk {
            path: entry.path().to_path_buf(),
            message: e.to_string(),
        })?;
        files.push(NormalizedPath::new(relative));
    }

    files.sort();
    Ok(files)
}
