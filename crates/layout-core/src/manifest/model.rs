//! In-memory manifest model
//!
//! A [`Manifest`] is an ordered list of [`DirectoryEntry`], each owning an
//! ordered list of [`FileEntry`]. Declaration order is preserved end to end
//! so a rendered manifest lists entries exactly as they were authored.

use std::fmt;

use layout_fs::NormalizedPath;
use serde::{Deserialize, Serialize};

/// What the installer does with a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallAction {
    /// Copy over the target unconditionally
    Overwrite,
    /// Copy when absent, otherwise hand differing files to the merge tool
    AskToMerge,
    /// Copy only when the target is absent
    CopyIfNotExisting,
    /// Never touch the target
    DontTouch,
}

impl InstallAction {
    /// Every action, in manifest spelling.
    pub const NAMES: [&'static str; 4] = [
        "overwrite",
        "ask_to_merge",
        "copy_if_not_existing",
        "dont_touch",
    ];

    /// Manifest spelling of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::AskToMerge => "ask_to_merge",
            Self::CopyIfNotExisting => "copy_if_not_existing",
            Self::DontTouch => "dont_touch",
        }
    }

    /// Parse the manifest spelling of an action.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "overwrite" => Some(Self::Overwrite),
            "ask_to_merge" => Some(Self::AskToMerge),
            "copy_if_not_existing" => Some(Self::CopyIfNotExisting),
            "dont_touch" => Some(Self::DontTouch),
            _ => None,
        }
    }
}

impl fmt::Display for InstallAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the installer does with a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryAction {
    /// Create the directory in the target when it is missing
    Create,
}

impl DirectoryAction {
    pub const NAMES: [&'static str; 1] = ["create"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "create" => Some(Self::Create),
            _ => None,
        }
    }
}

impl fmt::Display for DirectoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `md5` flag of a file.
///
/// An unchecksummed manifest carries the bare flag; release creation turns
/// it into a recorded value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedChecksum {
    /// Flagged for verification but no value recorded yet
    Pending,
    /// Hex-encoded MD5 digest the file must match
    Value(String),
}

impl ExpectedChecksum {
    /// The recorded value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Pending => None,
            Self::Value(value) => Some(value),
        }
    }
}

/// Per-file policy flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFlags {
    pub must_exist: bool,
    pub must_be_versioned: bool,
    /// Presence means the file is checksum-verified
    pub md5: Option<ExpectedChecksum>,
    /// Absence means the file is not installable
    pub install: Option<InstallAction>,
    pub always_autogenerated: bool,
    pub deprecated: bool,
}

impl FileFlags {
    /// Flags of a generated file that must be present and tracked.
    pub fn required() -> Self {
        Self {
            must_exist: true,
            must_be_versioned: true,
            ..Self::default()
        }
    }
}

/// A file declared in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Base file name
    pub name: String,
    /// Location under the project root
    pub path: NormalizedPath,
    /// Location relative to the project root
    pub relative: NormalizedPath,
    pub flags: FileFlags,
}

/// A directory declared in the manifest, with the files listed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Directory as written in the manifest; `.` is the project root
    pub name: String,
    /// Location under the project root
    pub path: NormalizedPath,
    /// Location relative to the project root, empty for the root itself
    pub relative: NormalizedPath,
    pub install: Option<DirectoryAction>,
    pub files: Vec<FileEntry>,
}

impl DirectoryEntry {
    /// Create an empty directory entry under `root`.
    pub fn new(root: &NormalizedPath, name: impl Into<String>) -> Self {
        let name = name.into();
        let relative = NormalizedPath::new("").join(relative_dir(&name));
        Self {
            path: root.join(relative.as_str()),
            relative,
            name,
            install: None,
            files: Vec::new(),
        }
    }

    /// Whether this entry stands for the project root.
    pub fn is_root(&self) -> bool {
        self.relative.as_str().is_empty()
    }

    /// Append a file, deriving its paths from this directory.
    pub fn add_file(&mut self, name: impl Into<String>, flags: FileFlags) -> &mut FileEntry {
        let name = name.into();
        let entry = FileEntry {
            path: self.path.join(&name),
            relative: self.relative.join(&name),
            name,
            flags,
        };
        self.files.push(entry);
        let last = self.files.len() - 1;
        &mut self.files[last]
    }

    /// Find a file by base name.
    pub fn file(&self, name: &str) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.name == name)
    }
}

/// Strip the spellings that all mean "this directory" so `./bin/`, `bin/`
/// and `bin` resolve to the same place.
fn relative_dir(name: &str) -> &str {
    let mut trimmed = name.trim_end_matches('/');
    while let Some(rest) = trimmed.strip_prefix("./") {
        trimmed = rest;
    }
    if trimmed == "." { "" } else { trimmed }
}

/// An ordered set of directory entries loaded from one manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Project root every entry path is resolved against
    pub root: NormalizedPath,
    pub directories: Vec<DirectoryEntry>,
}

impl Manifest {
    /// An empty manifest for the project at `root`.
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self {
            root: root.into(),
            directories: Vec::new(),
        }
    }

    /// Find a directory by its manifest name.
    pub fn directory(&self, name: &str) -> Option<&DirectoryEntry> {
        self.directories.iter().find(|d| d.name == name)
    }

    /// Find a directory by its manifest name, appending an empty one when
    /// it is not declared.
    pub fn directory_or_insert(&mut self, name: &str) -> &mut DirectoryEntry {
        let index = match self.directories.iter().position(|d| d.name == name) {
            Some(index) => index,
            None => {
                self.directories.push(DirectoryEntry::new(&self.root, name));
                self.directories.len() - 1
            }
        };
        &mut self.directories[index]
    }

    /// Every file entry, in declaration order.
    pub fn files(&self) -> impl Iterator<Item = &FileEntry> {
        self.directories.iter().flat_map(|d| d.files.iter())
    }

    /// Every file entry, mutably, in declaration order.
    pub fn files_mut(&mut self) -> impl Iterator<Item = &mut FileEntry> {
        self.directories.iter_mut().flat_map(|d| d.files.iter_mut())
    }
}
