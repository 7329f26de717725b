//! Manifest writer: stamping, format and round-trip stability

use layout_core::manifest::{ExpectedChecksum, Manifest, render};
use layout_fs::checksum::compute_content_checksum;
use layout_test_utils::project::TestProject;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_render_stamps_pending_checksums() {
    let project = TestProject::new();
    project.write("bin/ServerConfig.xml", "<config/>");
    let text = "Directory . \nDirectory bin install=create,\n\
                File ServerConfig.xml md5,install=ask_to_merge,\n";
    let mut manifest = Manifest::parse(text, project.root()).unwrap();

    let rendered = render(&mut manifest).unwrap();

    let md5 = compute_content_checksum(b"<config/>");
    assert_eq!(
        rendered,
        format!(
            "Directory . \nDirectory bin install=create,\n\
             File ServerConfig.xml md5={md5},install=ask_to_merge,\n"
        )
    );
    let file = manifest.directory("bin").unwrap().file("ServerConfig.xml").unwrap();
    assert_eq!(file.flags.md5, Some(ExpectedChecksum::Value(md5)));
}

#[test]
fn test_render_restamps_outdated_checksum() {
    let project = TestProject::new();
    project.write("a.txt", "new content");
    let text = "Directory .\nFile a.txt md5=00000000000000000000000000000000,\n";
    let mut manifest = Manifest::parse(text, project.root()).unwrap();

    let rendered = render(&mut manifest).unwrap();
    assert!(rendered.contains(&compute_content_checksum(b"new content")));
}

#[test]
fn test_rendering_twice_is_byte_identical() {
    let project = TestProject::new();
    project.write("a.txt", "a");
    project.write("src/b.cpp", "b");
    let text = "Directory .\nFile a.txt must_exist,md5\nDirectory src\nFile b.cpp md5,deprecated\n";
    let mut manifest = Manifest::parse(text, project.root()).unwrap();

    let first = render(&mut manifest).unwrap();
    let second = render(&mut manifest).unwrap();
    assert_eq!(first, second);
}

fn flag_options() -> impl Strategy<Value = String> {
    (
        any::<bool>(),
        any::<bool>(),
        prop::option::of("[0-9a-f]{32}"),
        prop::option::of(prop::sample::select(vec![
            "overwrite",
            "ask_to_merge",
            "copy_if_not_existing",
            "dont_touch",
        ])),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(exist, versioned, md5, install, generated, deprecated)| {
            let mut options = Vec::new();
            if deprecated {
                options.push("deprecated".to_string());
            }
            if let Some(action) = install {
                options.push(format!("install={action}"));
            }
            if generated {
                options.push("always_autogenerated".to_string());
            }
            if let Some(md5) = md5 {
                options.push(format!("md5={md5}"));
            }
            if versioned {
                options.push("must_be_versioned".to_string());
            }
            if exist {
                options.push("must_exist".to_string());
            }
            options.join(",")
        })
}

fn manifest_text() -> impl Strategy<Value = String> {
    let file = ("[A-Za-z][A-Za-z0-9_]{0,8}\\.[a-z]{1,3}", flag_options());
    let directory = (
        "(\\.|[a-z]{1,6}(/[a-z]{1,6}){0,2})",
        any::<bool>(),
        prop::collection::vec(file, 0..4),
    );
    prop::collection::vec(directory, 1..5).prop_map(|directories| {
        let mut text = String::new();
        let mut seen = Vec::new();
        for (name, create, files) in directories {
            if seen.contains(&name) {
                continue;
            }
            let install = if create { "install=create" } else { "" };
            text.push_str(&format!("Directory {name} {install}\n"));
            for (file, options) in files {
                text.push_str(&format!("File {file} {options}\n"));
            }
            seen.push(name);
        }
        text
    })
}

proptest! {
    #[test]
    fn test_text_round_trip_is_stable(text in manifest_text()) {
        let parsed = Manifest::parse(&text, "/p").unwrap();
        let rendered = parsed.to_text();
        let reparsed = Manifest::parse(&rendered, "/p").unwrap();

        prop_assert_eq!(&reparsed, &parsed);
        prop_assert_eq!(reparsed.to_text(), rendered);
    }
}
