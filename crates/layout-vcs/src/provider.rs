//! Version-control capability trait

use std::path::Path;

use crate::Result;

/// The three questions the checker asks of a version-control system.
///
/// Calls are synchronous and are not retried; a failure surfaces to the
/// caller immediately.
pub trait VersionControl {
    /// Short backend name used in log and error messages.
    fn name(&self) -> &'static str;

    /// Whether `path` is tracked.
    fn is_versioned(&self, path: &Path) -> Result<bool>;

    /// Schedule `path` for addition.
    fn add(&self, path: &Path) -> Result<()>;

    /// Remove `path` from version control and from the working copy.
    ///
    /// The removal still has to be committed by the user.
    fn remove(&self, path: &Path) -> Result<()>;
}
