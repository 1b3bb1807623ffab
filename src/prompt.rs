use dialoguer::{Confirm, Select, theme::ColorfulTheme};

use crate::error::Result;

/// Interactive prompts behind a seam so orchestration runs against
/// canned answers in tests. `None` means the user dismissed the prompt;
/// callers treat it as the safest negative choice.
pub trait Prompter {
    fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>>;
    fn select(&mut self, message: &str, items: &[String], default: usize) -> Result<Option<usize>>;
}

pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>> {
        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(default)
            .interact_opt()?;
        Ok(answer)
    }

    fn select(&mut self, message: &str, items: &[String], default: usize) -> Result<Option<usize>> {
        let answer = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .items(items)
            .default(default)
            .interact_opt()?;
        Ok(answer)
    }
}
