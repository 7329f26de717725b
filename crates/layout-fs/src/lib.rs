//! Filesystem primitives for Layout Manager
//!
//! Provides normalized paths, checksums, safe I/O and tree scanning used by
//! the manifest checker and installer.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod walk;

pub use config::{ConfigFormat, ConfigStore};
pub use constants::VcsDir;
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use walk::scan_files;
