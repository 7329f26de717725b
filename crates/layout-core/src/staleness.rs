//! Device files compared against the design they were generated from

use std::fmt;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::SystemTime;

use layout_fs::NormalizedPath;
use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::design::{DEVICE_INCLUDE_DIR, DEVICE_SRC_DIR, DesignClass};
use crate::{Error, Result};

/// Which of the two device files of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceFileKind {
    Header,
    Body,
}

impl DeviceFileKind {
    pub fn file_name(&self, class: &DesignClass) -> String {
        match self {
            Self::Header => class.device_header_name(),
            Self::Body => class.device_body_name(),
        }
    }

    fn directory(&self) -> &'static str {
        match self {
            Self::Header => DEVICE_INCLUDE_DIR,
            Self::Body => DEVICE_SRC_DIR,
        }
    }
}

/// A device file that is missing or older than the design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StaleFinding {
    Missing {
        class: String,
        kind: DeviceFileKind,
        path: NormalizedPath,
    },
    Outdated {
        class: String,
        kind: DeviceFileKind,
        path: NormalizedPath,
    },
}

impl StaleFinding {
    pub fn path(&self) -> &NormalizedPath {
        match self {
            Self::Missing { path, .. } | Self::Outdated { path, .. } => path,
        }
    }
}

impl fmt::Display for StaleFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { path, .. } => {
                write!(f, "Device file doesnt exist, the build will most likely fail: {path}")
            }
            Self::Outdated { path, .. } => {
                write!(f, "Device file is older than the design file: {path}")
            }
        }
    }
}

/// Check the device files of every class with device logic.
///
/// Bodies are checked before headers, for each class in design order.
pub fn check(
    project_root: &Path,
    design_path: &Path,
    classes: &[DesignClass],
) -> Result<Vec<StaleFinding>> {
    let design_mtime = modified(design_path)?;
    let root = NormalizedPath::new(project_root);
    let mut findings = Vec::new();

    for class in classes.iter().filter(|c| c.has_device_logic) {
        for kind in [DeviceFileKind::Body, DeviceFileKind::Header] {
            let path = root.join(kind.directory()).join(&kind.file_name(class));
            let class_name = class.name.clone();
            if !path.is_file() {
                findings.push(StaleFinding::Missing {
                    class: class_name,
                    kind,
                    path,
                });
            } else if modified(&path.to_native())? < design_mtime {
                findings.push(StaleFinding::Outdated {
                    class: class_name,
                    kind,
                    path,
                });
            }
        }
    }

    tracing::debug!(findings = findings.len(), "Compared device files with design");
    Ok(findings)
}

fn modified(path: &Path) -> Result<SystemTime> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| Error::io(path, e))
}

/// Runs the project's stub generator scripts.
#[derive(Debug, Clone)]
pub struct StubGenerator {
    config: GeneratorConfig,
}

impl StubGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate an empty stub of one device file. Returns whether the
    /// generator succeeded.
    pub fn generate(&self, project_root: &Path, class: &str, kind: DeviceFileKind) -> Result<bool> {
        let program = match kind {
            DeviceFileKind::Header => &self.config.header,
            DeviceFileKind::Body => &self.config.body,
        };
        let dir = project_root.join(&self.config.program_dir);
        tracing::info!(program = %program, class, dir = %dir.display(), "Generating stub");

        let status = Command::new(program)
            .arg(class)
            .current_dir(&dir)
            .status()
            .map_err(|source| Error::Spawn {
                program: program.clone(),
                source,
            })?;
        if !status.success() {
            tracing::warn!(program = %program, class, ?status, "Stub generator failed");
        }
        Ok(status.success())
    }
}
