//! Version-control capability for Layout Manager
//!
//! The consistency checker only needs to ask whether a path is tracked and
//! to add or remove one. [`VersionControl`] captures exactly that, with a
//! git backend, a subversion backend and two backends for tests and
//! untracked checkouts.

pub mod detect;
pub mod error;
pub mod git;
pub mod memory;
pub mod provider;
pub mod svn;

pub use detect::detect;
pub use error::{Error, Result};
pub use git::GitBackend;
pub use memory::{MemoryBackend, NoVcs};
pub use provider::VersionControl;
pub use svn::SvnBackend;
