//! Project context shared by the commands

use std::path::{Path, PathBuf};

use layout_core::{DesignSource, LayoutConfig, Manifest, XmlDesign, augment};

use crate::error::{CliError, Result};

/// A resolved project directory and its configuration.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub root: PathBuf,
    pub config: LayoutConfig,
}

impl ProjectContext {
    /// Resolve `path` and load its configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let root = dunce::canonicalize(path).map_err(|_| {
            CliError::user(format!("Project directory {} does not exist", path.display()))
        })?;
        if !root.is_dir() {
            return Err(CliError::user(format!(
                "Project path {} is not a directory",
                root.display()
            )));
        }
        let config = LayoutConfig::load(&root)?;
        tracing::debug!(root = %root.display(), "Loaded project context");
        Ok(Self { root, config })
    }

    /// Load the checksummed manifest.
    pub fn manifest(&self) -> Result<Manifest> {
        let path = self.config.manifest_path(&self.root);
        Ok(Manifest::load(&path.to_native(), self.root.as_path())?)
    }

    /// Load the checksummed manifest with the generated device files of
    /// the design folded in. A project without a design gets none.
    pub fn augmented_manifest(&self) -> Result<Manifest> {
        let mut manifest = self.manifest()?;
        let design = self.config.design_path(&self.root);
        if design.is_file() {
            let classes = XmlDesign::new(design.to_native()).classes()?;
            augment(&mut manifest, &classes);
        } else {
            tracing::debug!(path = %design, "No design file, skipping device files");
        }
        Ok(manifest)
    }
}
