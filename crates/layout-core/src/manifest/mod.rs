//! Manifest model, text parser and writer

pub mod model;
pub mod parse;
pub mod render;

pub use model::{
    DirectoryAction, DirectoryEntry, ExpectedChecksum, FileEntry, FileFlags, InstallAction,
    Manifest,
};
pub use parse::{DIRECTORY_KEYS, FILE_KEYS, ParseError, ParseErrorKind};
pub use render::{render, stamp_checksums};
