//! Consistency checking of a project against its manifest
//!
//! Every file entry goes through the same four checks in a fixed order:
//! existence, version-control membership, checksum and deprecation. The
//! checks are independent of each other and a problem with one file never
//! stops the scan, so a single run reports everything that is wrong.
//!
//! With remediation enabled the user is asked before an unversioned file
//! is added to version control or a deprecated file is removed. A declined
//! or failed fix is reported like any other problem.

mod problem;
mod uncovered;

pub use problem::{Problem, ProblemKind};
pub use uncovered::find_uncovered;

use std::fs;
use std::path::Path;

use layout_fs::checksum::compute_file_checksum;
use layout_vcs::VersionControl;

use crate::manifest::{ExpectedChecksum, FileEntry, Manifest};
use crate::prompt::Prompt;

/// Switches for a consistency check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Offer to fix unversioned and deprecated files
    pub remediate: bool,
}

/// Check every file of `manifest` against the filesystem and `vcs`.
///
/// Never fails: backend and I/O errors are reported as problems of the file
/// they occurred for.
pub fn check(
    manifest: &Manifest,
    vcs: &dyn VersionControl,
    prompt: &dyn Prompt,
    options: &CheckOptions,
) -> Vec<Problem> {
    let checker = Checker {
        vcs,
        prompt,
        options,
    };
    let mut problems = Vec::new();
    for file in manifest.files() {
        checker.check_file(file, &mut problems);
    }
    tracing::info!(
        files = manifest.files().count(),
        problems = problems.len(),
        backend = vcs.name(),
        "Consistency check finished"
    );
    problems
}

struct Checker<'a> {
    vcs: &'a dyn VersionControl,
    prompt: &'a dyn Prompt,
    options: &'a CheckOptions,
}

impl Checker<'_> {
    fn check_file(&self, file: &FileEntry, problems: &mut Vec<Problem>) {
        let path = file.path.to_native();
        tracing::debug!(path = %file.path, "Checking file");

        if file.flags.must_exist && !path.is_file() {
            problems.push(Problem::new(&file.path, ProblemKind::Missing));
        }

        if file.flags.must_be_versioned && path.is_file() {
            self.check_versioned(file, &path, problems);
        }

        if let Some(expected) = &file.flags.md5 {
            check_checksum(file, &path, expected, problems);
        }

        if file.flags.deprecated && path.is_file() {
            self.check_deprecated(file, &path, problems);
        }
    }

    fn check_versioned(&self, file: &FileEntry, path: &Path, problems: &mut Vec<Problem>) {
        match self.vcs.is_versioned(path) {
            Ok(true) => {}
            Ok(false) => {
                let question = format!("File {} is not versioned. Add it?", file.path);
                if self.confirm_fix(&question) {
                    match self.vcs.add(path) {
                        Ok(()) => {
                            tracing::info!(path = %file.path, "Added file to version control");
                        }
                        Err(e) => problems.push(Problem::new(
                            &file.path,
                            ProblemKind::RemediationFailed {
                                message: e.to_string(),
                            },
                        )),
                    }
                } else {
                    problems.push(Problem::new(&file.path, ProblemKind::NotVersioned));
                }
            }
            Err(e) => problems.push(Problem::new(
                &file.path,
                ProblemKind::VersionControl {
                    message: e.to_string(),
                },
            )),
        }
    }

    fn check_deprecated(&self, file: &FileEntry, path: &Path, problems: &mut Vec<Problem>) {
        let question = format!("File {} is deprecated. Remove it?", file.path);
        if !self.confirm_fix(&question) {
            problems.push(Problem::new(&file.path, ProblemKind::Deprecated));
            return;
        }

        if let Err(message) = self.remove(path) {
            problems.push(Problem::new(
                &file.path,
                ProblemKind::RemediationFailed { message },
            ));
        }
    }

    /// Tracked files go through version control and still need a commit;
    /// untracked ones are simply deleted.
    fn remove(&self, path: &Path) -> Result<(), String> {
        let tracked = self.vcs.is_versioned(path).map_err(|e| e.to_string())?;
        if tracked {
            self.vcs.remove(path).map_err(|e| e.to_string())?;
            tracing::info!(
                path = %path.display(),
                backend = self.vcs.name(),
                "Removed deprecated file, commit the removal"
            );
        } else {
            fs::remove_file(path).map_err(|e| e.to_string())?;
            tracing::info!(path = %path.display(), "Deleted deprecated file");
        }
        Ok(())
    }

    fn confirm_fix(&self, question: &str) -> bool {
        if !self.options.remediate {
            return false;
        }
        match self.prompt.confirm(question) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "Prompt failed, leaving file as is");
                false
            }
        }
    }
}

fn check_checksum(
    file: &FileEntry,
    path: &Path,
    expected: &ExpectedChecksum,
    problems: &mut Vec<Problem>,
) {
    if !path.is_file() {
        problems.push(Problem::new(&file.path, ProblemKind::ChecksumMissingFile));
        return;
    }

    let Some(expected) = expected.value() else {
        problems.push(Problem::new(&file.path, ProblemKind::ChecksumUnrecorded));
        return;
    };

    match compute_file_checksum(path) {
        Ok(obtained) if obtained == expected => {}
        Ok(obtained) => problems.push(Problem::new(
            &file.path,
            ProblemKind::ChecksumMismatch {
                obtained,
                expected: expected.to_string(),
            },
        )),
        Err(e) => problems.push(Problem::new(
            &file.path,
            ProblemKind::ChecksumUnreadable {
                message: e.to_string(),
            },
        )),
    }
}
