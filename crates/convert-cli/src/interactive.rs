//! Interactive prompts
//!
//! Uses dialoguer for terminal confirmation.

use std::io::IsTerminal;

use colored::Colorize;
use dialoguer::Confirm;

use convert_core::Prompt;

/// Asks on the terminal; declines when stdin is not a terminal.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&self, question: &str) -> convert_core::Result<bool> {
        if !std::io::stdin().is_terminal() {
            println!(
                "{} Not running in a terminal; pass {} to apply without confirmation.",
                "!".yellow().bold(),
                "--force".cyan()
            );
            return Ok(false);
        }

        let confirmed = Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(|dialoguer::Error::IO(e)| e)?;
        Ok(confirmed)
    }
}
