//! Git repository fixtures at three realism levels.
//!
//! Choose the lowest-realism fixture that satisfies your test's needs:
//! fakes are faster and have fewer external dependencies.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Creates a minimal `.git` directory structure **without** initialising a real
/// git repository.
///
/// Realism level: **FAKE**: directory structure only, no git object store.
///
/// Use for: tests that only need a `.git` marker, such as tree scans that must
/// skip version-control metadata.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn fake_git_dir(path: &Path) {
    fs::create_dir(path.join(".git"))
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to create .git: {e}"));
    fs::write(path.join(".git/HEAD"), "ref: refs/heads/main\n")
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to write HEAD: {e}"));
    fs::create_dir_all(path.join(".git/refs/heads"))
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to create refs/heads: {e}"));
}

/// Initialises a real git repository using `git2` (no initial commit, no config).
///
/// Realism level: **REAL**: valid git object store, empty index.
///
/// Use for: tests that query or mutate the index through the git backend.
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> git2::Repository {
    git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Stages `relative` in the index of the repository at `path` using `git2`.
///
/// # Panics
/// Panics if the index cannot be updated.
pub fn stage(path: &Path, relative: &str) {
    let repo = git2::Repository::open(path)
        .unwrap_or_else(|e| panic!("stage: failed to open {}: {e}", path.display()));
    let mut index = repo
        .index()
        .unwrap_or_else(|e| panic!("stage: failed to load index: {e}"));
    index
        .add_path(Path::new(relative))
        .unwrap_or_else(|e| panic!("stage: failed to add {relative}: {e}"));
    index
        .write()
        .unwrap_or_else(|e| panic!("stage: failed to write index: {e}"));
}

/// Initialises a real git repository with an initial commit using the `git` CLI.
///
/// Realism level: **REAL WITH HISTORY**: valid git state, one commit that
/// tracks every file already present in `path`.
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commit(path: &Path) {
    let run = |args: &[&str]| {
        let output = Command::new("git")
            .args(args)
            .current_dir(path)
            .output()
            .unwrap_or_else(|e| {
                panic!("real_git_repo_with_commit: failed to run `git {args:?}`: {e}")
            });
        if !output.status.success() {
            panic!(
                "real_git_repo_with_commit: `git {args:?}` failed:\n{}",
                String::from_utf8_lossy(&output.stderr)
            );
        }
    };

    run(&["init"]);
    run(&["config", "user.email", "test@test.com"]);
    run(&["config", "user.name", "Test User"]);
    run(&["config", "commit.gpgsign", "false"]);

    if !path.join("README.md").exists() {
        fs::write(path.join("README.md"), "# Test").unwrap_or_else(|e| {
            panic!("real_git_repo_with_commit: failed to write README.md: {e}")
        });
    }

    run(&["add", "."]);
    run(&["commit", "-m", "Initial commit"]);
}
