//! Files on disk that the manifest does not mention

use std::collections::HashSet;
use std::path::Path;

use layout_fs::{NormalizedPath, scan_files};

use crate::Result;
use crate::manifest::Manifest;

/// List project files not referenced by any manifest entry.
///
/// Paths are relative to `project_root` and sorted. Version-control
/// metadata directories are never entered.
pub fn find_uncovered(manifest: &Manifest, project_root: &Path) -> Result<Vec<NormalizedPath>> {
    let covered: HashSet<&str> = manifest.files().map(|f| f.relative.as_str()).collect();
    let uncovered: Vec<NormalizedPath> = scan_files(project_root)?
        .into_iter()
        .filter(|path| !covered.contains(path.as_str()))
        .collect();
    tracing::debug!(
        covered = covered.len(),
        uncovered = uncovered.len(),
        "Scanned for uncovered files"
    );
    Ok(uncovered)
}
