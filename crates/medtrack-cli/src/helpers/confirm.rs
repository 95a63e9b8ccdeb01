use std::io::IsTerminal;

use crate::app::AppContext;
use crate::errors::CliError;

/// Ask before a destructive action.
///
/// `--yes` answers for the user. Without a terminal to ask on, the action is
/// refused rather than assumed.
pub fn confirm(ctx: &AppContext, prompt: &str) -> anyhow::Result<bool> {
    if ctx.cli().yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::invalid_input(format!(
            "{}\nConfirmation required. Re-run with --yes or on a TTY.",
            prompt
        ))
        .into());
    }
    let proceed = dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(proceed)
}
