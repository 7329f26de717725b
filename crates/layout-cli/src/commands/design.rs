//! Design-vs-device staleness command

use std::path::Path;

use colored::Colorize;
use layout_core::staleness::{self, StaleFinding, StubGenerator};
use layout_core::{DesignSource, XmlDesign};

use crate::context::ProjectContext;
use crate::error::Result;

/// Run the design-vs-device command.
pub fn run_design_vs_device(path: &Path, generate: bool) -> Result<()> {
    let context = ProjectContext::load(path)?;
    let design = context.config.design_path(&context.root).to_native();
    let classes = XmlDesign::new(&design).classes()?;
    let findings = staleness::check(&context.root, &design, &classes)?;

    if findings.is_empty() {
        println!("{} Device files are up to date.", "OK".green().bold());
        return Ok(());
    }

    let generator = StubGenerator::new(context.config.generator.clone());
    let mut missing = 0;
    for finding in &findings {
        match finding {
            StaleFinding::Missing { class, kind, .. } => {
                println!("{} {}", "ERROR".red().bold(), finding);
                if generate {
                    if generator.generate(&context.root, class, *kind)? {
                        println!("   {} Generated empty stub", "+".green());
                    } else {
                        println!("   {} Stub generator failed", "!".red());
                    }
                } else {
                    missing += 1;
                }
            }
            StaleFinding::Outdated { .. } => {
                println!("{} {}", "WARNING".yellow().bold(), finding);
            }
        }
    }

    if missing > 0 {
        println!();
        println!(
            "Run {} to generate empty stubs.",
            "layout design-vs-device --generate".cyan()
        );
    }
    Ok(())
}
