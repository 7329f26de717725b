//! Line-oriented manifest parser
//!
//! ```text
//! Directory <relpath-or-.> [key[=value][,key[=value]...]]
//! File <filename> [key[=value][,key[=value]...]]
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Any error aborts the
//! whole load; no partial manifest is ever returned.

use std::path::Path;

use layout_fs::checksum;
use layout_fs::{NormalizedPath, io};

use super::model::{
    DirectoryAction, DirectoryEntry, ExpectedChecksum, FileFlags, InstallAction, Manifest,
};

/// Keys accepted on a `Directory` line.
pub const DIRECTORY_KEYS: [&str; 1] = ["install"];

/// Keys accepted on a `File` line, in the order they are rendered.
pub const FILE_KEYS: [&str; 6] = [
    "must_exist",
    "must_be_versioned",
    "md5",
    "install",
    "always_autogenerated",
    "deprecated",
];

/// A manifest syntax error with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

/// What was wrong with a manifest line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("First word of line: {token} unknown")]
    UnknownEntryType { token: String },

    #[error("{entry} line without a name")]
    MissingName { entry: &'static str },

    #[error("key: {key} is not in list of allowed keys: [{}]", .allowed.join(", "))]
    UnknownKey {
        key: String,
        allowed: Vec<&'static str>,
    },

    #[error("key: {key} requires a value")]
    MissingValue { key: String },

    #[error("key: {key} takes no value, got {key}={value}")]
    UnexpectedValue { key: String, value: String },

    #[error("{key}={value} not valid, expected one of [{}]", .allowed.join(", "))]
    InvalidValue {
        key: String,
        value: String,
        allowed: Vec<&'static str>,
    },

    #[error("md5={value} is not a 32-character hex checksum")]
    InvalidChecksum { value: String },

    #[error("File {name} appears before any Directory line")]
    FileBeforeDirectory { name: String },

    #[error("Directory {name} is declared more than once")]
    DuplicateDirectory { name: String },
}

impl Manifest {
    /// Parse manifest text, resolving entry paths against `root`.
    pub fn parse(text: &str, root: impl Into<NormalizedPath>) -> Result<Self, ParseError> {
        let mut manifest = Manifest::new(root);

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            parse_line(&mut manifest, raw).map_err(|kind| ParseError { line, kind })?;
        }

        tracing::debug!(
            directories = manifest.directories.len(),
            files = manifest.files().count(),
            "Parsed manifest"
        );
        Ok(manifest)
    }

    /// Read and parse the manifest file at `path`.
    pub fn load(path: &Path, root: impl Into<NormalizedPath>) -> crate::Result<Self> {
        let text = io::read_text(&NormalizedPath::new(path))?;
        Self::parse(&text, root).map_err(|source| crate::Error::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn parse_line(manifest: &mut Manifest, raw: &str) -> Result<(), ParseErrorKind> {
    if raw.starts_with('#') {
        return Ok(());
    }
    let mut tokens = raw.split_whitespace();
    let Some(entry_type) = tokens.next() else {
        return Ok(());
    };
    let name = tokens.next();
    let options: Vec<&str> = tokens.collect();
    let pairs = key_value_pairs(&options);

    match entry_type {
        "Directory" => {
            let name = name.ok_or(ParseErrorKind::MissingName { entry: "Directory" })?;
            if manifest.directory(name).is_some() {
                return Err(ParseErrorKind::DuplicateDirectory { name: name.into() });
            }
            let mut directory = DirectoryEntry::new(&manifest.root, name);
            for (key, value) in pairs {
                match key.as_str() {
                    "install" => {
                        let value = require_value(&key, value)?;
                        directory.install = Some(DirectoryAction::parse(&value).ok_or_else(
                            || ParseErrorKind::InvalidValue {
                                key,
                                value,
                                allowed: DirectoryAction::NAMES.to_vec(),
                            },
                        )?);
                    }
                    _ => return Err(unknown_key(key, &DIRECTORY_KEYS)),
                }
            }
            manifest.directories.push(directory);
            Ok(())
        }
        "File" => {
            let name = name.ok_or(ParseErrorKind::MissingName { entry: "File" })?;
            let flags = file_flags(pairs)?;
            let directory = manifest
                .directories
                .last_mut()
                .ok_or_else(|| ParseErrorKind::FileBeforeDirectory { name: name.into() })?;
            directory.add_file(name, flags);
            Ok(())
        }
        other => Err(ParseErrorKind::UnknownEntryType {
            token: other.into(),
        }),
    }
}

/// Split the option tokens of a line into `key` / `key=value` pairs.
///
/// Options are comma-separated; whitespace inside an option is ignored and
/// empty options (such as the trailing comma the writer emits) are skipped.
fn key_value_pairs(options: &[&str]) -> Vec<(String, Option<String>)> {
    let joined = options.join(" ");
    let mut pairs = Vec::new();
    for chunk in joined.split(',') {
        let option: String = chunk.split_whitespace().collect();
        if option.is_empty() {
            continue;
        }
        match option.split_once('=') {
            Some((key, value)) => pairs.push((key.to_string(), Some(value.to_string()))),
            None => pairs.push((option, None)),
        }
    }
    pairs
}

fn file_flags(pairs: Vec<(String, Option<String>)>) -> Result<FileFlags, ParseErrorKind> {
    let mut flags = FileFlags::default();
    for (key, value) in pairs {
        match key.as_str() {
            "must_exist" => flags.must_exist = require_no_value(&key, value)?,
            "must_be_versioned" => flags.must_be_versioned = require_no_value(&key, value)?,
            "always_autogenerated" => flags.always_autogenerated = require_no_value(&key, value)?,
            "deprecated" => flags.deprecated = require_no_value(&key, value)?,
            "md5" => {
                flags.md5 = Some(match value.filter(|v| !v.is_empty()) {
                    None => ExpectedChecksum::Pending,
                    Some(value) if checksum::is_checksum(&value) => {
                        ExpectedChecksum::Value(value.to_ascii_lowercase())
                    }
                    Some(value) => return Err(ParseErrorKind::InvalidChecksum { value }),
                });
            }
            "install" => {
                let value = require_value(&key, value)?;
                flags.install = Some(InstallAction::parse(&value).ok_or_else(|| {
                    ParseErrorKind::InvalidValue {
                        key,
                        value,
                        allowed: InstallAction::NAMES.to_vec(),
                    }
                })?);
            }
            _ => return Err(unknown_key(key, &FILE_KEYS)),
        }
    }
    Ok(flags)
}

fn unknown_key(key: String, allowed: &[&'static str]) -> ParseErrorKind {
    ParseErrorKind::UnknownKey {
        key,
        allowed: allowed.to_vec(),
    }
}

fn require_value(key: &str, value: Option<String>) -> Result<String, ParseErrorKind> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ParseErrorKind::MissingValue { key: key.into() })
}

fn require_no_value(key: &str, value: Option<String>) -> Result<bool, ParseErrorKind> {
    match value {
        None => Ok(true),
        Some(value) => Err(ParseErrorKind::UnexpectedValue {
            key: key.into(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let manifest = Manifest::parse("# header\n\n   \nDirectory .\n", "/p").unwrap();
        assert_eq!(manifest.directories.len(), 1);
    }

    #[test]
    fn options_tolerate_spaces_and_trailing_comma() {
        let manifest = Manifest::parse(
            "Directory .\nFile a.txt must_exist, must_be_versioned,\n",
            "/p",
        )
        .unwrap();
        let flags = &manifest.directories[0].files[0].flags;
        assert!(flags.must_exist);
        assert!(flags.must_be_versioned);
    }

    #[test]
    fn bare_md5_is_pending() {
        let manifest = Manifest::parse("Directory .\nFile a.txt md5\n", "/p").unwrap();
        assert_eq!(
            manifest.directories[0].files[0].flags.md5,
            Some(ExpectedChecksum::Pending)
        );
    }

    #[test]
    fn error_reports_one_based_line() {
        let err = Manifest::parse("# c\nDirectory .\nFolder x\n", "/p").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(
            err.kind,
            ParseErrorKind::UnknownEntryType {
                token: "Folder".into()
            }
        );
    }
}
