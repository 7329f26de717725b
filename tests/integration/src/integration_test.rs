//! End-to-end flow across the crates
//!
//! A framework tree cuts a release manifest, installs itself into a fresh
//! project, and the project then checks clean against the installed
//! manifest.

use layout_core::{
    CheckOptions, DesignSource, ExternalMergeTool, FixedAnswer, InstallEventKind, LayoutConfig,
    Manifest, ProblemKind, XmlDesign, augment, check, create_release, find_uncovered, install,
};
use layout_test_utils::git::real_git_repo;
use layout_test_utils::project::TestProject;
use layout_vcs::{GitBackend, VersionControl};

const ORIGINAL: &str = "\
# framework layout
Directory .
File CMakeLists.txt must_exist,must_be_versioned,md5,install=overwrite
Directory FrameworkInternals install=create
File files.txt must_exist,install=overwrite
File original_files.txt
Directory bin install=create
File config.xml must_exist,install=ask_to_merge
Directory Device install=create
Directory Device/include install=create
Directory Device/src install=create
";

fn framework() -> TestProject {
    let framework = TestProject::new();
    framework.write("CMakeLists.txt", "project(framework)");
    framework.write("bin/config.xml", "<config/>");
    framework.write_original_manifest(ORIGINAL);
    framework
}

fn load(project: &TestProject) -> Manifest {
    let config = LayoutConfig::load(project.root()).unwrap();
    Manifest::load(&config.manifest_path(project.root()).to_native(), project.root()).unwrap()
}

#[test]
fn test_release_install_check_flow() {
    let framework = framework();
    create_release(framework.root(), &LayoutConfig::default()).unwrap();

    let project = TestProject::new();
    let manifest = load(&framework);
    let merge = ExternalMergeTool::from_config(&LayoutConfig::default().merge_tool);
    let report = install(
        &manifest,
        framework.root(),
        project.root(),
        &merge,
        &FixedAnswer::NO,
    )
    .unwrap();

    assert_eq!(report.count(|k| *k == InstallEventKind::CreatedDirectory), 5);
    project.assert_file_contains("CMakeLists.txt", "project(framework)");
    project.assert_file_exists("Device/include");

    real_git_repo(project.root());
    let installed = load(&project);
    let vcs = GitBackend::open(project.root()).unwrap();
    vcs.add(&project.path("CMakeLists.txt")).unwrap();

    let problems = check(&installed, &vcs, &FixedAnswer::NO, &CheckOptions::default());
    assert!(problems.is_empty(), "{problems:?}");
    assert!(find_uncovered(&installed, project.root()).unwrap().is_empty());
}

#[test]
fn test_modified_framework_file_is_detected_after_install() {
    let framework = framework();
    create_release(framework.root(), &LayoutConfig::default()).unwrap();
    let project = TestProject::new();
    let merge = ExternalMergeTool::from_config(&LayoutConfig::default().merge_tool);
    install(&load(&framework), framework.root(), project.root(), &merge, &FixedAnswer::NO).unwrap();

    project.write("CMakeLists.txt", "project(edited)");
    let problems = check(
        &load(&project),
        &layout_vcs::NoVcs,
        &FixedAnswer::NO,
        &CheckOptions::default(),
    );

    let kinds: Vec<&ProblemKind> = problems.iter().map(|p| &p.kind).collect();
    assert_eq!(kinds.len(), 2);
    assert_eq!(kinds[0], &ProblemKind::NotVersioned);
    assert!(matches!(kinds[1], ProblemKind::ChecksumMismatch { .. }));
}

#[test]
fn test_design_device_files_join_the_check() {
    let framework = framework();
    create_release(framework.root(), &LayoutConfig::default()).unwrap();
    let project = TestProject::new();
    let merge = ExternalMergeTool::from_config(&LayoutConfig::default().merge_tool);
    install(&load(&framework), framework.root(), project.root(), &merge, &FixedAnswer::NO).unwrap();
    project.write_design(&[("Pump", true)]);
    project.write("Device/include/DPump.h", "");
    project.write("Device/src/DPump.cpp", "");

    let mut manifest = load(&project);
    let classes = XmlDesign::new(project.path(TestProject::DESIGN)).classes().unwrap();
    augment(&mut manifest, &classes);

    let uncovered = find_uncovered(&manifest, project.root()).unwrap();
    let uncovered: Vec<&str> = uncovered.iter().map(|p| p.as_str()).collect();
    assert_eq!(uncovered, vec!["Design/Design.xml"]);

    let vcs = layout_vcs::MemoryBackend::with_tracked([project.path("CMakeLists.txt")]);
    let problems = check(&manifest, &vcs, &FixedAnswer::YES, &CheckOptions { remediate: true });
    assert!(problems.is_empty(), "{problems:?}");
    assert_eq!(vcs.tracked().len(), 3);
}
