//! [`TestProject`] builder for manifest-driven test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project tree with helper methods for test setup and
/// assertion.
///
/// # Example
///
/// ```rust,no_run
/// use layout_test_utils::project::TestProject;
///
/// let project = TestProject::new();
/// project.write("bin/app.cfg", "port = 4841\n");
/// project.write_manifest("Directory bin install=create\nFile app.cfg install=overwrite\n");
/// project.assert_file_exists("bin/app.cfg");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Relative location of the manifest inside a project.
    pub const MANIFEST: &'static str = "FrameworkInternals/files.txt";

    /// Relative location of the unchecksummed manifest inside a project.
    pub const ORIGINAL_MANIFEST: &'static str = "FrameworkInternals/original_files.txt";

    /// Relative location of the design description inside a project.
    pub const DESIGN: &'static str = "Design/Design.xml";

    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the project.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        full_path
    }

    /// Create the directory `relative` (and its parents).
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let full_path = self.path(relative);
        fs::create_dir_all(&full_path).unwrap();
        full_path
    }

    /// Read the file at `relative` as text.
    pub fn read(&self, relative: &str) -> String {
        let full_path = self.path(relative);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Write the checksummed manifest.
    pub fn write_manifest(&self, content: &str) -> PathBuf {
        self.write(Self::MANIFEST, content)
    }

    /// Write the unchecksummed manifest.
    pub fn write_original_manifest(&self, content: &str) -> PathBuf {
        self.write(Self::ORIGINAL_MANIFEST, content)
    }

    /// Write a design description declaring `classes`, each given as
    /// `(name, has_device_logic)`.
    pub fn write_design(&self, classes: &[(&str, bool)]) -> PathBuf {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <d:design xmlns:d=\"http://cern.ch/quasar/Design\" projectShortName=\"Test\">\n",
        );
        for (name, has_device_logic) in classes {
            if *has_device_logic {
                xml.push_str(&format!(
                    "  <d:class name=\"{name}\">\n    <d:devicelogic/>\n  </d:class>\n"
                ));
            } else {
                xml.push_str(&format!("  <d:class name=\"{name}\"/>\n"));
            }
        }
        xml.push_str("</d:design>\n");
        self.write(Self::DESIGN, &xml)
    }

    /// Assert that `path` (relative to the project root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the project root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to root) contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            self.path(path).display(),
            content,
            file_content
        );
    }
}
