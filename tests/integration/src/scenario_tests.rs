//! Behavioural scenarios of the manifest tools
//!
//! Each test builds a small tree, runs one operation and checks the
//! observable result on disk and in the returned values.

use std::path::Path;

use assert_fs::TempDir;
use assert_fs::prelude::*;
use layout_core::merge::{MergeOutcome, MergeTool};
use layout_core::{
    CheckOptions, Error, FixedAnswer, InstallReport, Manifest, ParseError, Problem, ProblemKind,
    check, find_uncovered, install, render,
};
use layout_fs::checksum::compute_content_checksum;
use layout_vcs::NoVcs;
use predicates::prelude::*;

/// Never expected to run in these scenarios.
struct NoMerge;

impl MergeTool for NoMerge {
    fn merge(
        &self,
        source: &Path,
        _target: &Path,
        _output: &Path,
    ) -> layout_core::Result<MergeOutcome> {
        panic!("merge tool invoked for {}", source.display());
    }
}

fn run_install(text: &str, source: &TempDir, target: &TempDir) -> InstallReport {
    let manifest = Manifest::parse(text, source.path()).unwrap();
    install(&manifest, source.path(), target.path(), &NoMerge, &FixedAnswer::NO).unwrap()
}

fn check_tree(text: &str, root: &TempDir) -> Vec<Problem> {
    let manifest = Manifest::parse(text, root.path()).unwrap();
    check(&manifest, &NoVcs, &FixedAnswer::NO, &CheckOptions::default())
}

#[test]
fn test_create_directory_and_copy_once() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    source.child("bin/app.cfg").write_str("first").unwrap();
    let text = "Directory bin install=create\nFile app.cfg install=copy_if_not_existing\n";

    run_install(text, &source, &target);
    target.child("bin/app.cfg").assert("first");

    source.child("bin/app.cfg").write_str("second").unwrap();
    run_install(text, &source, &target);
    target.child("bin/app.cfg").assert("first");
}

#[test]
fn test_deprecated_file_is_reported_not_removed() {
    let root = TempDir::new().unwrap();
    root.child("legacy.py").write_str("print()").unwrap();

    let problems = check_tree("Directory .\nFile legacy.py deprecated\n", &root);

    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].kind, ProblemKind::Deprecated);
    assert!(problems[0].to_string().contains("please remove"));
    root.child("legacy.py").assert(predicate::path::exists());
}

#[test]
fn test_unknown_key_rejects_whole_manifest() {
    let result: Result<Manifest, ParseError> =
        Manifest::parse("Directory .\nFile ok.txt must_exist\nFile foo.txt unknownkey\n", "/p");

    let err = result.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("unknownkey"), "{message}");
    assert!(message.contains(
        "must_exist, must_be_versioned, md5, install, always_autogenerated, deprecated"
    ));
}

#[test]
fn test_single_byte_change_gives_one_checksum_problem() {
    let root = TempDir::new().unwrap();
    root.child("a.bin").write_binary(&[1, 2, 3, 4]).unwrap();
    root.child("b.bin").write_binary(&[5, 6]).unwrap();
    let text = format!(
        "Directory .\nFile a.bin md5={}\nFile b.bin md5={}\n",
        compute_content_checksum(&[1, 2, 3, 4]),
        compute_content_checksum(&[5, 6])
    );
    assert!(check_tree(&text, &root).is_empty());

    root.child("a.bin").write_binary(&[1, 2, 3, 5]).unwrap();
    let problems = check_tree(&text, &root);

    assert_eq!(problems.len(), 1);
    assert!(problems[0].path.as_str().ends_with("/a.bin"));
    assert!(matches!(problems[0].kind, ProblemKind::ChecksumMismatch { .. }));
}

#[test]
fn test_must_exist_problem_disappears_after_creation() {
    let root = TempDir::new().unwrap();
    let text = "Directory .\nFile needed.txt must_exist\n";

    assert_eq!(check_tree(text, &root).len(), 1);
    root.child("needed.txt").touch().unwrap();
    assert!(check_tree(text, &root).is_empty());
}

#[test]
fn test_extra_file_is_uncovered_exactly_once() {
    let root = TempDir::new().unwrap();
    root.child("a.txt").touch().unwrap();
    root.child("src/b.cpp").touch().unwrap();
    root.child(".svn/entries").touch().unwrap();
    let text = "Directory .\nFile a.txt\nDirectory src\nFile b.cpp\n";
    let manifest = Manifest::parse(text, root.path()).unwrap();

    assert!(find_uncovered(&manifest, root.path()).unwrap().is_empty());

    root.child("src/extra.cpp").touch().unwrap();
    let uncovered = find_uncovered(&manifest, root.path()).unwrap();
    let names: Vec<&str> = uncovered.iter().map(|p| p.as_str()).collect();
    assert_eq!(names, vec!["src/extra.cpp"]);
}

#[test]
fn test_overwrite_twice_matches_once() {
    let source = TempDir::new().unwrap();
    let once = TempDir::new().unwrap();
    let twice = TempDir::new().unwrap();
    source.child("lib/util.h").write_str("#pragma once").unwrap();
    let text = "Directory lib install=create\nFile util.h install=overwrite\n";

    run_install(text, &source, &once);
    run_install(text, &source, &twice);
    run_install(text, &source, &twice);

    once.child("lib/util.h").assert("#pragma once");
    twice.child("lib/util.h").assert("#pragma once");
}

#[test]
fn test_rendered_manifest_parses_back_identically() {
    let root = TempDir::new().unwrap();
    root.child("a.txt").write_str("a").unwrap();
    let text = "Directory . \nFile a.txt deprecated,md5,must_exist\n\
                Directory docs install=create\nFile guide.md install=dont_touch\n";
    let mut manifest = Manifest::parse(text, root.path()).unwrap();

    let rendered = render(&mut manifest).unwrap();
    let mut reparsed = Manifest::parse(&rendered, root.path()).unwrap();

    assert_eq!(render(&mut reparsed).unwrap(), rendered);
}

#[test]
fn test_install_into_file_is_rejected() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    target.child("not-a-dir").touch().unwrap();
    let manifest = Manifest::parse("Directory .\n", source.path()).unwrap();

    let result = install(
        &manifest,
        source.path(),
        target.child("not-a-dir").path(),
        &NoMerge,
        &FixedAnswer::NO,
    );
    assert!(matches!(result, Err(Error::TargetNotDirectory { .. })));
}
