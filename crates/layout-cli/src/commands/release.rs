//! Release manifest command

use std::path::Path;

use colored::Colorize;
use layout_core::create_release;

use crate::context::ProjectContext;
use crate::error::Result;

/// Run the create-release command.
pub fn run_create_release(path: &Path) -> Result<()> {
    let context = ProjectContext::load(path)?;
    let release = create_release(&context.root, &context.config)?;
    println!(
        "{} Created {}",
        "OK".green().bold(),
        release.path.as_str().cyan()
    );
    Ok(())
}
