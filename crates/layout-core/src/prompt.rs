//! Yes/no decisions delegated to the caller

use crate::Result;

/// Asks the user a yes/no question.
///
/// The checker uses it before remediating, the installer before continuing
/// past a failed merge.
pub trait Prompt {
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Answers every question the same way without asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAnswer(pub bool);

impl FixedAnswer {
    pub const YES: Self = Self(true);
    pub const NO: Self = Self(false);
}

impl Prompt for FixedAnswer {
    fn confirm(&self, question: &str) -> Result<bool> {
        tracing::debug!(question, answer = self.0, "Answered prompt without asking");
        Ok(self.0)
    }
}
