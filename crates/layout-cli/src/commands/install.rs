//! Install command

use std::path::Path;

use colored::Colorize;
use layout_core::{ExternalMergeTool, InstallEventKind, InstallReport, Installer};

use crate::context::ProjectContext;
use crate::error::{CliError, Result};
use crate::interactive::DialoguerPrompt;

/// Run the install command.
///
/// The manifest is read from the project; `source` and `target` are the
/// trees files are copied between. What was installed before a failure is
/// printed before the error is returned.
pub fn run_install(path: &Path, source: &Path, target: &Path) -> Result<()> {
    if !source.is_dir() {
        return Err(CliError::user(format!(
            "Source directory {} doesn't exist or is not a directory",
            source.display()
        )));
    }
    let context = ProjectContext::load(path)?;
    let manifest = context.manifest()?;
    let merge_tool = ExternalMergeTool::from_config(&context.config.merge_tool);

    println!(
        "{} Installing from {} into {}...",
        "=>".blue().bold(),
        source.display(),
        target.display()
    );

    let mut installer = Installer::new(source, target, &merge_tool, &DialoguerPrompt);
    let result = installer.run(&manifest);
    print_report(installer.report());

    match result {
        Ok(()) => {
            println!("{} Installation complete.", "OK".green().bold());
            Ok(())
        }
        Err(e) => {
            println!(
                "{} Installation did not complete; files listed above stay installed.",
                "FAILED".red().bold()
            );
            Err(e.into())
        }
    }
}

fn print_report(report: &InstallReport) {
    for event in &report.events {
        let marker = match event.kind {
            InstallEventKind::CreatedDirectory | InstallEventKind::Copied => "+".green(),
            InstallEventKind::Overwritten | InstallEventKind::Merged => "~".yellow(),
            InstallEventKind::MergeToolFailed { .. } => "!".red(),
            InstallEventKind::Identical | InstallEventKind::KeptExisting => "=".dimmed(),
        };
        println!("   {marker} {event}");
    }
}
