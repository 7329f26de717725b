//! Interactive merge tool seam

use std::path::Path;
use std::process::Command;

use crate::config::MergeToolConfig;
use crate::{Error, Result};

/// How a merge tool run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Exit code, `None` when the tool was killed by a signal
    pub code: Option<i32>,
}

impl MergeOutcome {
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Exit status for messages.
    pub fn describe(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {code}"),
            None => "termination by signal".into(),
        }
    }
}

/// Merges `source` into `target`, writing the result to `output`.
///
/// Blocks until the merge is finished.
pub trait MergeTool {
    fn merge(&self, source: &Path, target: &Path, output: &Path) -> Result<MergeOutcome>;
}

/// Runs an external program.
#[derive(Debug, Clone)]
pub struct ExternalMergeTool {
    program: String,
    args: Vec<String>,
}

impl ExternalMergeTool {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &MergeToolConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    /// Arguments with the path placeholders filled in.
    pub fn arguments(&self, source: &Path, target: &Path, output: &Path) -> Vec<String> {
        let source = source.to_string_lossy();
        let target = target.to_string_lossy();
        let output = output.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{source}", &source)
                    .replace("{target}", &target)
                    .replace("{output}", &output)
            })
            .collect()
    }
}

impl MergeTool for ExternalMergeTool {
    fn merge(&self, source: &Path, target: &Path, output: &Path) -> Result<MergeOutcome> {
        let args = self.arguments(source, target, output);
        tracing::info!(program = %self.program, ?args, "Running merge tool");
        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;
        Ok(MergeOutcome {
            code: status.code(),
        })
    }
}
