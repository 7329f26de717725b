//! Project configuration
//!
//! Paths and external commands used by the operations, with defaults that
//! fit a stock project. A project can override any of them in
//! `.layout.toml`, `.layout.json` or `.layout.yaml` at its root:
//!
//! ```toml
//! manifest = "FrameworkInternals/files.txt"
//!
//! [merge_tool]
//! program = "meld"
//! args = ["{source}", "{target}", "-o", "{output}"]
//! ```

use std::path::Path;

use layout_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Config file names looked up at the project root, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = [".layout.toml", ".layout.json", ".layout.yaml"];

/// Everything the operations need to know about a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Checksummed manifest, relative to the project root
    pub manifest: String,
    /// Unchecksummed manifest a release is cut from
    pub original_manifest: String,
    /// Design description
    pub design: String,
    pub merge_tool: MergeToolConfig,
    pub generator: GeneratorConfig,
    /// Comment lines written above a release manifest, without `#`
    pub release_header: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            manifest: "FrameworkInternals/files.txt".into(),
            original_manifest: "FrameworkInternals/original_files.txt".into(),
            design: "Design/Design.xml".into(),
            merge_tool: MergeToolConfig::default(),
            generator: GeneratorConfig::default(),
            release_header: vec![
                String::new(),
                "This file lists files which should be installed in the target project.".into(),
                "It is a derivative of original_files.txt with md5 checksums applied.".into(),
            ],
        }
    }
}

/// External three-way merge program.
///
/// `{source}`, `{target}` and `{output}` in `args` are replaced by the
/// respective paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeToolConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for MergeToolConfig {
    fn default() -> Self {
        Self {
            program: "kdiff3".into(),
            args: ["-o", "{output}", "{source}", "{target}"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Scripts that generate device file stubs for a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory the scripts run in, relative to the project root
    pub program_dir: String,
    pub header: String,
    pub body: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            program_dir: "Device".into(),
            header: "./generateDeviceHeader.sh".into(),
            body: "./generateDeviceBody.sh".into(),
        }
    }
}

impl LayoutConfig {
    /// Load the configuration of the project at `project_root`.
    ///
    /// Falls back to defaults when the project has no config file.
    pub fn load(project_root: &Path) -> Result<Self> {
        let root = NormalizedPath::new(project_root);
        let candidates: Vec<NormalizedPath> =
            CONFIG_FILE_NAMES.iter().map(|name| root.join(name)).collect();

        let config = ConfigStore::new()
            .load_first::<Self>(&candidates)?
            .unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no operation could work with.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("manifest", &self.manifest),
            ("original_manifest", &self.original_manifest),
            ("design", &self.design),
            ("merge_tool.program", &self.merge_tool.program),
            ("generator.header", &self.generator.header),
            ("generator.body", &self.generator.body),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Configuration {
                    message: format!("{key} must not be empty"),
                });
            }
        }
        Ok(())
    }

    pub fn manifest_path(&self, project_root: &Path) -> NormalizedPath {
        NormalizedPath::new(project_root).join(&self.manifest)
    }

    pub fn original_manifest_path(&self, project_root: &Path) -> NormalizedPath {
        NormalizedPath::new(project_root).join(&self.original_manifest)
    }

    pub fn design_path(&self, project_root: &Path) -> NormalizedPath {
        NormalizedPath::new(project_root).join(&self.design)
    }
}
