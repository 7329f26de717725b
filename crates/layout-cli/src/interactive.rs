//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based confirmation.

use dialoguer::Confirm;
use layout_core::Prompt;

/// Asks on the terminal; the default answer is "no".
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompt;

impl Prompt for DialoguerPrompt {
    fn confirm(&self, question: &str) -> layout_core::Result<bool> {
        Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(|e| layout_core::Error::Prompt {
                message: e.to_string(),
            })
    }
}
