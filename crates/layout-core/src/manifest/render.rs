//! Manifest writer
//!
//! Each line lists its flags in the fixed key order, every flag followed by
//! a comma, so rendering unchanged input is byte-for-byte repeatable:
//!
//! ```text
//! Directory bin install=create,
//! File ServerConfig.xml must_exist,md5=5eb63bbbe01eeed093cb22bb8f5acdc3,install=ask_to_merge,
//! ```

use std::fmt::Write;

use layout_fs::checksum::compute_file_checksum;

use super::model::{DirectoryEntry, ExpectedChecksum, FileEntry, Manifest};
use crate::{Error, Result};

impl Manifest {
    /// Serialize to manifest text without touching the filesystem.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for directory in &self.directories {
            write_directory(&mut out, directory);
        }
        out
    }
}

/// Record the current checksum of every checksum-flagged file.
///
/// Returns how many files were stamped.
pub fn stamp_checksums(manifest: &mut Manifest) -> Result<usize> {
    let mut stamped = 0;
    for file in manifest.files_mut() {
        if file.flags.md5.is_none() {
            continue;
        }
        let native = file.path.to_native();
        let value = compute_file_checksum(&native).map_err(|e| Error::io(&native, e))?;
        tracing::debug!(path = %file.path, md5 = %value, "Stamped checksum");
        file.flags.md5 = Some(ExpectedChecksum::Value(value));
        stamped += 1;
    }
    Ok(stamped)
}

/// Stamp checksums, then serialize.
pub fn render(manifest: &mut Manifest) -> Result<String> {
    stamp_checksums(manifest)?;
    Ok(manifest.to_text())
}

fn write_directory(out: &mut String, directory: &DirectoryEntry) {
    let mut flags = String::new();
    if let Some(action) = directory.install {
        push_flag(&mut flags, "install", Some(action.as_str()));
    }
    let _ = writeln!(out, "Directory {} {}", directory.name, flags);
    for file in &directory.files {
        write_file(out, file);
    }
}

fn write_file(out: &mut String, file: &FileEntry) {
    let f = &file.flags;
    let mut flags = String::new();
    if f.must_exist {
        push_flag(&mut flags, "must_exist", None);
    }
    if f.must_be_versioned {
        push_flag(&mut flags, "must_be_versioned", None);
    }
    if let Some(md5) = &f.md5 {
        push_flag(&mut flags, "md5", md5.value());
    }
    if let Some(action) = f.install {
        push_flag(&mut flags, "install", Some(action.as_str()));
    }
    if f.always_autogenerated {
        push_flag(&mut flags, "always_autogenerated", None);
    }
    if f.deprecated {
        push_flag(&mut flags, "deprecated", None);
    }
    let _ = writeln!(out, "File {} {}", file.name, flags);
}

fn push_flag(flags: &mut String, key: &str, value: Option<&str>) {
    flags.push_str(key);
    if let Some(value) = value {
        flags.push('=');
        flags.push_str(value);
    }
    flags.push(',');
}
