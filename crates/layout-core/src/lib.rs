//! Manifest-driven project layout management
//!
//! A manifest declares which directories and files a project consists of,
//! with a policy per file. This crate loads and writes manifests, checks a
//! project against one, and installs framework files into a project
//! according to their policies.
//!
//! ```no_run
//! use std::path::Path;
//! use layout_core::{CheckOptions, FixedAnswer, LayoutConfig, Manifest, check};
//!
//! let root = Path::new(".");
//! let config = LayoutConfig::load(root)?;
//! let manifest = Manifest::load(&config.manifest_path(root).to_native(), root)?;
//! let vcs = layout_vcs::detect(root)?;
//! for problem in check(&manifest, vcs.as_ref(), &FixedAnswer::NO, &CheckOptions::default()) {
//!     println!("{problem}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod check;
pub mod config;
pub mod design;
pub mod error;
pub mod install;
pub mod manifest;
pub mod merge;
pub mod prompt;
pub mod release;
pub mod staleness;

pub use check::{CheckOptions, Problem, ProblemKind, check, find_uncovered};
pub use config::LayoutConfig;
pub use design::{DesignClass, DesignSource, StaticDesign, XmlDesign, augment};
pub use error::{Error, Result};
pub use install::{InstallEvent, InstallEventKind, InstallReport, Installer, install};
pub use manifest::{
    DirectoryAction, DirectoryEntry, ExpectedChecksum, FileEntry, FileFlags, InstallAction,
    Manifest, ParseError, render,
};
pub use merge::{ExternalMergeTool, MergeOutcome, MergeTool};
pub use prompt::{FixedAnswer, Prompt};
pub use release::create_release;
