//! Consistency check command

use std::path::Path;

use colored::Colorize;
use layout_core::{CheckOptions, FixedAnswer, Problem, Prompt, check, find_uncovered};
use layout_fs::NormalizedPath;
use serde::Serialize;

use crate::context::ProjectContext;
use crate::error::Result;
use crate::interactive::DialoguerPrompt;

/// Machine-readable check result.
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub problems: Vec<Problem>,
    pub uncovered: Vec<NormalizedPath>,
}

/// Run the check command.
///
/// Returns whether the project is free of problems. Uncovered files are
/// informational and do not count.
pub fn run_check(path: &Path, ask: bool, json: bool) -> Result<bool> {
    let context = ProjectContext::load(path)?;
    let manifest = context.augmented_manifest()?;
    let vcs = layout_vcs::detect(&context.root)?;

    let prompt: &dyn Prompt = if ask { &DialoguerPrompt } else { &FixedAnswer::NO };
    let options = CheckOptions { remediate: ask };

    if !json {
        println!(
            "{} Checking {} ({} version control)...",
            "=>".blue().bold(),
            context.root.display(),
            vcs.name()
        );
    }

    let uncovered = find_uncovered(&manifest, &context.root)?;
    let problems = check(&manifest, &*vcs, prompt, &options);
    let clean = problems.is_empty();

    if json {
        let output = CheckOutput {
            problems,
            uncovered,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(clean);
    }

    if !uncovered.is_empty() {
        println!(
            "{} Files not covered by the manifest (#files={}):",
            "INFO".cyan().bold(),
            uncovered.len()
        );
        for path in &uncovered {
            println!("   {} {}", "?".cyan(), path);
        }
        println!();
    }

    if clean {
        println!("{} No problems found.", "OK".green().bold());
    } else {
        println!(
            "{} Found consistency problems (#problems={}):",
            "PROBLEMS".red().bold(),
            problems.len()
        );
        for problem in &problems {
            println!("   {} {}", "!".red(), problem);
        }
    }

    Ok(clean)
}
