//! Installing framework files from a source tree into a target tree
//!
//! Directories flagged `install=create` are created when missing, then each
//! installable file is handled according to its [`InstallAction`]. The run is
//! not transactional: it stops at the first error or declined merge, and
//! whatever was installed up to that point stays installed.
//!
//! Two installers working on the same target at once interleave in no
//! defined way; callers must not do that.

use std::fmt;
use std::fs;
use std::path::Path;

use layout_fs::NormalizedPath;
use layout_fs::io::{copy_preserving, files_identical};
use serde::Serialize;

use crate::manifest::{DirectoryAction, DirectoryEntry, FileEntry, InstallAction, Manifest};
use crate::merge::MergeTool;
use crate::prompt::Prompt;
use crate::{Error, Result};

/// Question asked when the merge tool exits unsuccessfully.
pub const MERGE_FAILED_QUESTION: &str = "Merge tool returned non-zero, wanna continue?";

/// What happened to one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InstallEventKind {
    CreatedDirectory,
    /// Target did not exist
    Copied,
    /// Target existed and was replaced
    Overwritten,
    /// Target already matched the source
    Identical,
    Merged,
    /// The merge tool failed and the user chose to go on
    MergeToolFailed { status: String },
    /// Target existed and was left alone
    KeptExisting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallEvent {
    /// Path in the target tree
    pub path: NormalizedPath,
    #[serde(flatten)]
    pub kind: InstallEventKind,
}

impl fmt::Display for InstallEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = &self.path;
        match &self.kind {
            InstallEventKind::CreatedDirectory => write!(f, "Created directory {path}"),
            InstallEventKind::Copied => write!(f, "Copied {path}"),
            InstallEventKind::Overwritten => write!(f, "Overwrote {path}"),
            InstallEventKind::Identical => write!(f, "Unchanged {path}"),
            InstallEventKind::Merged => write!(f, "Merged {path}"),
            InstallEventKind::MergeToolFailed { status } => {
                write!(f, "Merge tool failed ({status}) for {path}")
            }
            InstallEventKind::KeptExisting => write!(f, "Kept existing {path}"),
        }
    }
}

/// Everything an installation run did, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub events: Vec<InstallEvent>,
}

impl InstallReport {
    /// Number of events of a given kind.
    pub fn count(&self, matches: impl Fn(&InstallEventKind) -> bool) -> usize {
        self.events.iter().filter(|e| matches(&e.kind)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn record(&mut self, path: &NormalizedPath, kind: InstallEventKind) {
        tracing::info!(path = %path, ?kind, "Installed");
        self.events.push(InstallEvent {
            path: path.clone(),
            kind,
        });
    }
}

/// One installation run from `source_root` into `target_root`.
///
/// Keeps its report when the run fails, so callers can show what was done
/// before the failure.
pub struct Installer<'a> {
    source_root: NormalizedPath,
    target_root: NormalizedPath,
    merge_tool: &'a dyn MergeTool,
    prompt: &'a dyn Prompt,
    report: InstallReport,
}

impl<'a> Installer<'a> {
    pub fn new(
        source_root: &Path,
        target_root: &Path,
        merge_tool: &'a dyn MergeTool,
        prompt: &'a dyn Prompt,
    ) -> Self {
        Self {
            source_root: NormalizedPath::new(source_root),
            target_root: NormalizedPath::new(target_root),
            merge_tool,
            prompt,
            report: InstallReport::default(),
        }
    }

    /// Install every entry of `manifest`.
    ///
    /// Fails without touching anything when the target root is not an
    /// existing directory.
    pub fn run(&mut self, manifest: &Manifest) -> Result<()> {
        if !self.target_root.is_dir() {
            return Err(Error::TargetNotDirectory {
                path: self.target_root.to_native(),
            });
        }
        tracing::debug!(
            source = %self.source_root,
            target = %self.target_root,
            "Installing"
        );

        for directory in &manifest.directories {
            self.install_directory(directory)?;
            for file in &directory.files {
                if let Some(action) = file.flags.install {
                    self.install_file(file, action)?;
                }
            }
        }
        Ok(())
    }

    pub fn report(&self) -> &InstallReport {
        &self.report
    }

    pub fn into_report(self) -> InstallReport {
        self.report
    }

    /// Only a single level is created; parents are expected to be declared
    /// earlier in the manifest.
    fn install_directory(&mut self, directory: &DirectoryEntry) -> Result<()> {
        match directory.install {
            Some(DirectoryAction::Create) => {
                let target = self.target_root.join(directory.relative.as_str());
                if !target.is_dir() {
                    let native = target.to_native();
                    fs::create_dir(&native).map_err(|e| Error::io(&native, e))?;
                    self.report.record(&target, InstallEventKind::CreatedDirectory);
                }
            }
            None => {}
        }
        Ok(())
    }

    fn install_file(&mut self, file: &FileEntry, action: InstallAction) -> Result<()> {
        let source = self.source_root.join(file.relative.as_str());
        let target = self.target_root.join(file.relative.as_str());
        tracing::debug!(path = %file.relative, %action, "Installing file");

        match action {
            InstallAction::Overwrite => {
                let existed = target.is_file();
                copy(&source, &target)?;
                let kind = if existed {
                    InstallEventKind::Overwritten
                } else {
                    InstallEventKind::Copied
                };
                self.report.record(&target, kind);
            }
            InstallAction::AskToMerge => {
                if !target.is_file() {
                    copy(&source, &target)?;
                    self.report.record(&target, InstallEventKind::Copied);
                } else if files_identical(&source.to_native(), &target.to_native())? {
                    self.report.record(&target, InstallEventKind::Identical);
                } else {
                    self.merge(&source, &target)?;
                }
            }
            InstallAction::CopyIfNotExisting => {
                if target.is_file() {
                    self.report.record(&target, InstallEventKind::KeptExisting);
                } else {
                    copy(&source, &target)?;
                    self.report.record(&target, InstallEventKind::Copied);
                }
            }
            InstallAction::DontTouch => {}
        }
        Ok(())
    }

    /// A failing merge tool only aborts the run when the user says so.
    fn merge(&mut self, source: &NormalizedPath, target: &NormalizedPath) -> Result<()> {
        let target_native = target.to_native();
        let outcome = self
            .merge_tool
            .merge(&source.to_native(), &target_native, &target_native)?;
        if outcome.is_success() {
            self.report.record(target, InstallEventKind::Merged);
            return Ok(());
        }

        let status = outcome.describe();
        tracing::warn!(path = %target, %status, "Merge tool failed");
        if !self.prompt.confirm(MERGE_FAILED_QUESTION)? {
            return Err(Error::MergeAborted {
                path: target_native,
                status,
            });
        }
        self.report
            .record(target, InstallEventKind::MergeToolFailed { status });
        Ok(())
    }
}

fn copy(source: &NormalizedPath, target: &NormalizedPath) -> Result<()> {
    copy_preserving(&source.to_native(), &target.to_native())?;
    Ok(())
}

/// Install `manifest` from `source_root` into `target_root`.
pub fn install(
    manifest: &Manifest,
    source_root: &Path,
    target_root: &Path,
    merge_tool: &dyn MergeTool,
    prompt: &dyn Prompt,
) -> Result<InstallReport> {
    let mut installer = Installer::new(source_root, target_root, merge_tool, prompt);
    installer.run(manifest)?;
    Ok(installer.into_report())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::MergeOutcome;
    use crate::prompt::FixedAnswer;
    use std::cell::Cell;
    use tempfile::tempdir;

    struct CountingMerge {
        code: i32,
        calls: Cell<usize>,
    }

    impl CountingMerge {
        fn exiting(code: i32) -> Self {
            Self {
                code,
                calls: Cell::new(0),
            }
        }
    }

    impl MergeTool for CountingMerge {
        fn merge(&self, _source: &Path, _target: &Path, _output: &Path) -> Result<MergeOutcome> {
            self.calls.set(self.calls.get() + 1);
            Ok(MergeOutcome {
                code: Some(self.code),
            })
        }
    }

    fn manifest(text: &str) -> Manifest {
        Manifest::parse(text, "/unused").unwrap()
    }

    #[test]
    fn missing_target_fails_before_anything_happens() {
        let source = tempdir().unwrap();
        let target = source.path().join("nope");
        let merge = CountingMerge::exiting(0);
        let result = install(
            &manifest("Directory bin install=create\n"),
            source.path(),
            &target,
            &merge,
            &FixedAnswer::YES,
        );
        assert!(matches!(result, Err(Error::TargetNotDirectory { .. })));
        assert!(!target.exists());
    }

    #[test]
    fn identical_files_skip_merge() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        fs::write(source.path().join("a.txt"), "same").unwrap();
        fs::write(target.path().join("a.txt"), "same").unwrap();
        let merge = CountingMerge::exiting(0);

        let report = install(
            &manifest("Directory .\nFile a.txt install=ask_to_merge\n"),
            source.path(),
            target.path(),
            &merge,
            &FixedAnswer::NO,
        )
        .unwrap();
        assert_eq!(merge.calls.get(), 0);
        assert_eq!(report.events[0].kind, InstallEventKind::Identical);
    }

    #[test]
    fn declined_merge_failure_aborts_and_keeps_partial_report() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        fs::write(source.path().join("a.txt"), "new").unwrap();
        fs::write(target.path().join("a.txt"), "old").unwrap();
        fs::write(source.path().join("b.txt"), "b").unwrap();
        let merge = CountingMerge::exiting(1);
        let text = "Directory .\nFile a.txt install=ask_to_merge\nFile b.txt install=overwrite\n";

        let manifest = manifest(text);
        let mut installer = Installer::new(source.path(), target.path(), &merge, &FixedAnswer::NO);
        let result = installer.run(&manifest);

        assert!(matches!(result, Err(Error::MergeAborted { .. })));
        assert!(installer.report().is_empty());
        assert!(!target.path().join("b.txt").exists());
    }

    #[test]
    fn accepted_merge_failure_continues() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        fs::write(source.path().join("a.txt"), "new").unwrap();
        fs::write(target.path().join("a.txt"), "old").unwrap();
        fs::write(source.path().join("b.txt"), "b").unwrap();
        let merge = CountingMerge::exiting(2);
        let text = "Directory .\nFile a.txt install=ask_to_merge\nFile b.txt install=overwrite\n";

        let report = install(
            &manifest(text),
            source.path(),
            target.path(),
            &merge,
            &FixedAnswer::YES,
        )
        .unwrap();
        assert_eq!(
            report.events[0].kind,
            InstallEventKind::MergeToolFailed {
                status: "exit code 2".into()
            }
        );
        assert_eq!(fs::read_to_string(target.path().join("b.txt")).unwrap(), "b");
    }

    #[test]
    fn dont_touch_and_uninstallable_files_are_ignored() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        fs::write(source.path().join("a.txt"), "a").unwrap();
        fs::write(source.path().join("b.txt"), "b").unwrap();
        let merge = CountingMerge::exiting(0);

        let report = install(
            &manifest("Directory .\nFile a.txt install=dont_touch\nFile b.txt must_exist\n"),
            source.path(),
            target.path(),
            &merge,
            &FixedAnswer::YES,
        )
        .unwrap();
        assert!(report.is_empty());
        assert!(!target.path().join("a.txt").exists());
        assert!(!target.path().join("b.txt").exists());
    }

    #[test]
    fn missing_source_is_an_io_error() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        let merge = CountingMerge::exiting(0);
        let result = install(
            &manifest("Directory .\nFile a.txt install=overwrite\n"),
            source.path(),
            target.path(),
            &merge,
            &FixedAnswer::YES,
        );
        assert!(matches!(result, Err(Error::Fs(_))));
    }
}
