//! Cutting a release manifest
//!
//! The original manifest lists `md5` without values. A release stamps the
//! current checksum of each of those files and writes the result as the
//! manifest projects check against.

use std::path::Path;

use layout_fs::NormalizedPath;
use layout_fs::io::write_atomic;

use crate::Result;
use crate::config::LayoutConfig;
use crate::manifest::{Manifest, render};

/// Outcome of [`create_release`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Where the release manifest was written
    pub path: NormalizedPath,
    pub text: String,
}

/// Render `manifest` with `header` comment lines above it.
pub fn release_text(manifest: &mut Manifest, header: &[String]) -> Result<String> {
    let mut text = String::new();
    for line in header {
        if line.is_empty() {
            text.push_str("#\n");
        } else {
            text.push_str("# ");
            text.push_str(line);
            text.push('\n');
        }
    }
    text.push_str(&render(manifest)?);
    Ok(text)
}

/// Regenerate the checksummed manifest of the project at `project_root`
/// from its original manifest.
pub fn create_release(project_root: &Path, config: &LayoutConfig) -> Result<Release> {
    let original = config.original_manifest_path(project_root);
    let mut manifest = Manifest::load(&original.to_native(), project_root)?;
    let text = release_text(&mut manifest, &config.release_header)?;

    let path = config.manifest_path(project_root);
    write_atomic(&path, text.as_bytes())?;
    tracing::info!(path = %path, from = %original, "Created release manifest");
    Ok(Release { path, text })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lines_become_comments() {
        let mut manifest = Manifest::new("/p");
        manifest.directory_or_insert(".");
        let header = vec!["Release".to_string(), String::new()];
        assert_eq!(
            release_text(&mut manifest, &header).unwrap(),
            "# Release\n#\nDirectory . \n"
        );
    }
}
