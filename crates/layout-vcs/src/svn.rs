//! Subversion backend driving the `svn` command-line client

use std::path::Path;
use std::process::{Command, Output};

use crate::{Error, Result, VersionControl};

/// Shells out to `svn` for every question.
#[derive(Debug, Clone)]
pub struct SvnBackend {
    program: String,
}

impl Default for SvnBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SvnBackend {
    /// Use the `svn` found on `PATH`.
    pub fn new() -> Self {
        Self::with_program("svn")
    }

    /// Use a specific client executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str], path: &Path) -> Result<Output> {
        Command::new(&self.program)
            .args(args)
            .arg(path)
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })
    }

    fn run_checked(&self, args: &[&str], path: &Path) -> Result<()> {
        let output = self.run(args, path)?;
        if output.status.success() {
            Ok(())
        } else {
            Err(Error::CommandFailed {
                command: format!("{} {} {}", self.program, args.join(" "), path.display()),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl VersionControl for SvnBackend {
    fn name(&self) -> &'static str {
        "svn"
    }

    fn is_versioned(&self, path: &Path) -> Result<bool> {
        // `svn info` fails for unversioned paths
        let output = self.run(&["info", "--non-interactive"], path)?;
        Ok(output.status.success())
    }

    fn add(&self, path: &Path) -> Result<()> {
        self.run_checked(&["add", "--non-interactive"], path)?;
        tracing::info!(path = %path.display(), "Scheduled for addition in svn");
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<()> {
        self.run_checked(&["rm", "--non-interactive"], path)?;
        tracing::info!(path = %path.display(), "Scheduled for removal in svn");
        Ok(())
    }
}
